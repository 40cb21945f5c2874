//! Log event catalog
//!
//! Event types 0..=57 and 119..=127 are documented. Each type names what
//! byte 5 of the Log Event Message refers to and whether byte 6 holds a
//! partition number.

/// What the subject byte of a log event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Zone,
    User,
    Device,
    None,
}

/// Description used when an event type is not in the catalog
pub const NO_SUCH_EVENT: &str = "No such event";

/// Highest documented event type; larger values are special events
pub const MAX_DOCUMENTED_EVENT: u8 = 127;

/// One documented event type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInfo {
    pub description: &'static str,
    pub subject: SubjectKind,
    pub partition_valid: bool,
}

const fn info(description: &'static str, subject: SubjectKind, partition_valid: bool) -> EventInfo {
    EventInfo {
        description,
        subject,
        partition_valid,
    }
}

use SubjectKind::{Device, None as NoSubject, User, Zone};

static EVENTS_0_TO_57: [EventInfo; 58] = [
    info("Alarm", Zone, true),
    info("Alarm Restore", Zone, true),
    info("Bypass", Zone, true),
    info("Bypass Restore", Zone, true),
    info("Tamper", Zone, true),
    info("Tamper Restore", Zone, true),
    info("Trouble", Zone, true),
    info("Trouble Restore", Zone, true),
    info("Tx Low Battery", Zone, true),
    info("Tx Low Battery Restore", Zone, true),
    info("Zone Lost", Zone, true),
    info("Zone Lost Restore", Zone, true),
    info("Not Used", Zone, true),
    info("Not Used", NoSubject, false),
    info("Not Used", NoSubject, false),
    info("Not Used", NoSubject, false),
    info("Not Used", NoSubject, false),
    info("Special Expansion Event", NoSubject, false),
    info("Duress", NoSubject, true),
    info("Fire Alert (Manual)", NoSubject, true),
    info("Medical Alert", NoSubject, true),
    info("Not Used", NoSubject, false),
    info("Police Panic", NoSubject, true),
    info("Keypad Tamper", NoSubject, true),
    info("Control Box Tamper", Device, false),
    info("Control Box Tamper Restore", Device, false),
    info("AC Failure", Device, false),
    info("AC Failure Restore", Device, false),
    info("Low Battery", Device, false),
    info("Low Battery Restore", Device, false),
    info("Over-current", Device, false),
    info("Over-current Restore", Device, false),
    info("Siren Tamper", Device, false),
    info("Siren Tamper Restore", Device, false),
    info("Telephone Fault", NoSubject, false),
    info("Telephone Fault Restore", NoSubject, false),
    info("Expander Trouble", Device, false),
    info("Expander Trouble Restore", Device, false),
    info("Fail To Communicate", NoSubject, false),
    info("Log Full", NoSubject, false),
    info("Opening", User, true),
    info("Closing", User, true),
    info("Exit Error", User, true),
    info("Recent Closing", User, true),
    info("Auto Test", NoSubject, false),
    info("Start Program", NoSubject, false),
    info("End Program", NoSubject, false),
    info("Start Download", NoSubject, false),
    info("End Download", NoSubject, false),
    info("Cancel", User, true),
    info("Ground Fault", NoSubject, false),
    info("Ground Fault Restore", NoSubject, false),
    info("Manual Test", NoSubject, false),
    info("Closed with Zones Bypassed", User, true),
    info("Start of Listen In", NoSubject, false),
    info("Technician On Site", NoSubject, false),
    info("Technician Left", NoSubject, false),
    info("Control Power Up", NoSubject, false),
];

static EVENTS_119_TO_127: [EventInfo; 9] = [
    info("Not Used", NoSubject, false),
    info("First To Open", User, true),
    info("Last to Close", User, true),
    info("Pin Entered with Bit 7 Set", User, true),
    info("Begin Walk Test", NoSubject, false),
    info("End Walk Test", NoSubject, false),
    info("Re-Exit", NoSubject, true),
    info("Output Trip", User, false),
    info("Data Lost", NoSubject, false),
];

/// Catalog entry for an event type
pub fn lookup(event_type: u8) -> Option<&'static EventInfo> {
    match event_type {
        0..=57 => EVENTS_0_TO_57.get(usize::from(event_type)),
        119..=127 => EVENTS_119_TO_127.get(usize::from(event_type - 119)),
        _ => None,
    }
}

/// Description of an event type, [`NO_SUCH_EVENT`] when undocumented
pub fn description(event_type: u8) -> &'static str {
    lookup(event_type).map_or(NO_SUCH_EVENT, |info| info.description)
}

/// Subject of an event type, [`SubjectKind::None`] when undocumented
pub fn subject_kind(event_type: u8) -> SubjectKind {
    lookup(event_type).map_or(SubjectKind::None, |info| info.subject)
}

/// Whether byte 6 carries a partition for this event type
pub fn partition_valid(event_type: u8) -> bool {
    lookup(event_type).is_some_and(|info| info.partition_valid)
}

/// Event types above the documented range that carry their own wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialEvent {
    SupervisionLost,
    SupervisionRestored,
    Disarmed,
    Armed,
    ProgramModeEntered,
    ProgramModeExited,
    ModuleRegistered,
    TimeDateConfirmed,
}

impl SpecialEvent {
    pub fn from_type(event_type: u8) -> Option<Self> {
        let special = match event_type {
            138 => SpecialEvent::SupervisionLost,
            139 => SpecialEvent::SupervisionRestored,
            168 => SpecialEvent::Disarmed,
            169 => SpecialEvent::Armed,
            173 => SpecialEvent::ProgramModeEntered,
            174 => SpecialEvent::ProgramModeExited,
            245 => SpecialEvent::ModuleRegistered,
            247 => SpecialEvent::TimeDateConfirmed,
            _ => return None,
        };
        Some(special)
    }

    /// Leading text of the host log line
    pub fn label(self) -> &'static str {
        match self {
            SpecialEvent::SupervisionLost => "Loss of Supervision (wireless)",
            SpecialEvent::SupervisionRestored => "Loss of Supervision RESTORED (wireless)",
            SpecialEvent::Disarmed => "system DISARMED",
            SpecialEvent::Armed => "system ARMED",
            SpecialEvent::ProgramModeEntered => "entering program mode",
            SpecialEvent::ProgramModeExited => "exiting program mode",
            SpecialEvent::ModuleRegistered => "registering module",
            SpecialEvent::TimeDateConfirmed => "confirm alarm system time and date set",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_ranges() {
        assert_eq!(description(0), "Alarm");
        assert_eq!(description(57), "Control Power Up");
        assert_eq!(description(119), "Not Used");
        assert_eq!(description(127), "Data Lost");
        assert_eq!(description(58), NO_SUCH_EVENT);
        assert_eq!(description(118), NO_SUCH_EVENT);
        assert_eq!(description(200), NO_SUCH_EVENT);
    }

    #[test]
    fn test_subject_kinds() {
        assert_eq!(subject_kind(4), SubjectKind::Zone);
        assert_eq!(subject_kind(12), SubjectKind::Zone);
        assert_eq!(subject_kind(26), SubjectKind::Device);
        assert_eq!(subject_kind(37), SubjectKind::Device);
        assert_eq!(subject_kind(34), SubjectKind::None);
        assert_eq!(subject_kind(41), SubjectKind::User);
        assert_eq!(subject_kind(126), SubjectKind::User);
        assert_eq!(subject_kind(90), SubjectKind::None);
    }

    #[test]
    fn test_partition_validity() {
        assert!(partition_valid(0));
        assert!(partition_valid(22));
        assert!(partition_valid(125));
        assert!(!partition_valid(21));
        assert!(!partition_valid(26));
        assert!(!partition_valid(126));
        assert!(!partition_valid(58));
    }

    #[test]
    fn test_special_events() {
        assert_eq!(SpecialEvent::from_type(168), Some(SpecialEvent::Disarmed));
        assert_eq!(SpecialEvent::from_type(247), Some(SpecialEvent::TimeDateConfirmed));
        assert_eq!(SpecialEvent::from_type(200), None);
        assert_eq!(SpecialEvent::from_type(0), None);
        assert_eq!(SpecialEvent::Armed.label(), "system ARMED");
    }
}
