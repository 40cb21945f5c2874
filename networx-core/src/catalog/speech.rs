//! Spoken announcements

pub const ARMING_STAY: &str = "Alarm system arming in Stay Mode";
pub const ARMED_STAY: &str = "Alarm system armed in Stay Mode";
pub const ARMING_AWAY: &str = "Alarm system arming in Away Mode";
pub const ARMED_AWAY: &str = "Alarm system armed in Away Mode";
pub const ARMED: &str = "Alarm system Armed";
pub const DISARMED: &str = "Alarm system Disarmed. Welcome Home";
pub const EXIT_DELAY_WARNING: &str = "Warning - exit delay expires in 10 seconds";
pub const FAILED_TO_ARM: &str = "Alarm system Failed To Arm";
pub const ZONE_TRIPPED: &str = "Intruder Alert, sensor tripped in";
pub const FIRE_PANIC: &str =
    "The fire alarm has been activated. Please evacuate the building immediately";
pub const MEDICAL_PANIC: &str =
    "A medical emergency has been activated. An Ambulance has been called";
pub const POLICE_PANIC: &str = "A duress alert has been activated. The police have been called";

/// Intruder alert naming the breached zone
pub fn zone_tripped(zone_name: &str) -> String {
    format!("{ZONE_TRIPPED} {zone_name}")
}
