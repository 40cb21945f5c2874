//! Keypad display model
//!
//! Partition 1's snapshot byte selects one of thirteen alarm display
//! states. Each state carries the text the panel keypad would show and a
//! short condition key for the host. Bit 4 of the byte is chime mode and
//! does not change the state.

/// Chime mode bit of a partition snapshot byte
const CHIME_MODE_BIT: u8 = 0x10;

/// One alarm display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub index: u8,
    /// Partition state text
    pub name: &'static str,
    /// Security condition key
    pub condition: &'static str,
    pub lcd_line_1: &'static str,
    /// `None` when the line shows the breached zone
    pub lcd_line_2: Option<&'static str>,
}

const fn state(
    index: u8,
    name: &'static str,
    condition: &'static str,
    lcd_line_1: &'static str,
    lcd_line_2: Option<&'static str>,
) -> DisplayState {
    DisplayState {
        index,
        name,
        condition,
        lcd_line_1,
        lcd_line_2,
    }
}

pub static DISPLAY_STATES: [DisplayState; 13] = [
    state(0, "Multiple State Changes", "multipleChanges", " ", Some(" ")),
    state(1, "Disarmed", "disarmed", "System Ready", Some("Type code to arm")),
    state(2, "Not Ready", "notReady", "System Not Ready", Some("For help, press ->")),
    state(3, "Arming (exit)", "armingExit", "System Arming ...", Some("Zone(s) Bypassed")),
    state(4, "Arming Not Ready", "armingNotReady", "Alarm Intruder", None),
    state(5, "Armed Stay", "armedStay", "System Armed", Some("Zone(s) Bypassed")),
    state(6, "Alarm (entry)", "alarmEntry", "Type code to", Some("Disarm")),
    state(7, "ALARM Intruder", "alarmIntruder", "Alarm Intruder", None),
    state(8, "Arming (exit)", "armingExit", "System Arming ...", Some("All Zones Secure")),
    state(9, "ALARM Intruder", "alarmIntruder", "Alarm Intruder ", None),
    state(10, "Armed Away", "armedAway", "System Armed", Some("Away Mode")),
    state(11, "Alarm (entry)", "alarmEntry", "Type code to", Some("Disarm")),
    state(12, "ALARM Intruder", "alarmIntruder", "Alarm Intruder", None),
];

pub const DISARMED: u8 = 1;
pub const ARMED_STAY: u8 = 5;
pub const ARMED_AWAY: u8 = 10;

/// Display state for a partition snapshot byte
pub fn classify(snapshot: u8) -> &'static DisplayState {
    let index = match snapshot & !CHIME_MODE_BIT {
        0b0000_0011 => 1,
        0b0000_0001 => 2,
        0b0100_1111 => 3,
        0b1100_1111 => 4,
        0b0000_1111 => 5,
        0b0010_1101 | 0b0010_1111 => 6,
        0b1000_1111 => 7,
        0b0100_0111 => 8,
        0b1100_0101 | 0b1100_0111 => 9,
        0b0000_0111 => 10,
        0b0010_0101 | 0b0010_0111 => 11,
        0b1000_0101 | 0b1000_0111 => 12,
        _ => 0,
    };
    &DISPLAY_STATES[index]
}

impl DisplayState {
    /// Second LCD line with the breached zone filled in
    pub fn line_2<'a>(&self, breached_zone: &'a str) -> &'a str {
        self.lcd_line_2.unwrap_or(breached_zone)
    }

    /// Returning here forgets the breached zone
    pub fn clears_breach(&self) -> bool {
        self.index == DISARMED
    }

    pub fn is_armed(&self) -> bool {
        self.index == ARMED_STAY || self.index == ARMED_AWAY
    }
}
