//! Zone group classification
//!
//! A zone's behaviour is configured as three type-flag bytes. The panel
//! documentation lists thirty standard groups, each a fixed combination of
//! those flags. Several groups share a fingerprint, so a lookup can match
//! more than one group; every candidate is reported rather than guessing.

use core::fmt;

/// Reported when a fingerprint matches no documented group
pub const NO_MATCH: &str = "no zone group match";

/// A documented zone group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneGroup {
    pub number: u8,
    /// Type flags 1-3 packed as `0x00_t1_t2_t3`
    pub fingerprint: u32,
    pub description: &'static str,
}

macro_rules! group {
    ($number:literal, $fingerprint:literal, $description:literal) => {
        ZoneGroup {
            number: $number,
            fingerprint: $fingerprint,
            description: $description,
        }
    };
}

/// Every documented group, in panel order
pub static ZONE_GROUPS: [ZoneGroup; 30] = [
    group!(1, 0x0013f4, "Day/Night Alarm"),
    group!(2, 0x0213c0, "Panic Alarm"),
    group!(3, 0x101bf0, "Entry/Exit (delay1)"),
    group!(4, 0x1813f0, "Interior Alarm"),
    group!(5, 0x5813f0, "Interior Alarm"),
    group!(6, 0x001bf0, "Perimeter Alarm"),
    group!(7, 0x0200c0, "Silent Panic"),
    group!(8, 0x0105c4, "Fire Alarm"),
    group!(9, 0x201bf0, "Entry/Exit (delay2)"),
    group!(10, 0x0a10c0, "Tamper Alarm"),
    group!(11, 0x040000, "Arm/Disarm (momentary keyswitch)"),
    group!(12, 0x5813f8, "Interior Alarm (cross zone)"),
    group!(13, 0x009bf0, "Perimeter Alarm (entry guard)"),
    group!(14, 0x103bf0, "Entry/Exit (delay1, group bypass)"),
    group!(15, 0x5833f0, "Interior Alarm (group bypass)"),
    group!(16, 0x003bf0, "Perimeter Alarm (group bypass)"),
    group!(17, 0x101bf2, "Arm/Disarm (maintained keyswitch)"),
    group!(18, 0x5813f2, "Entry/Exit (delay1, force armable)"),
    group!(19, 0x001bf2, "Entry/Exit (delay2, force armable)"),
    group!(20, 0x201bf2, "Entry/Exit (delay2, chime enabled)"),
    group!(21, 0x0a11c0, "Gas Detected or Low/High Temp"),
    group!(22, 0x0a11c0, "Freeze Alarm"),
    group!(23, 0x0a11c0, "Interior Alarm"),
    group!(24, 0x0105c4, "Perimeter Alarm"),
    group!(25, 0x8a1800, "Interior Alarm"),
    group!(26, 0x6813f0, "Burglary Alarm (supervised local)"),
    group!(27, 0x5853f0, "Perimeter Alarm (activity monitor)"),
    group!(28, 0x205bf0, "Perimeter Alarm (request to exit)"),
    group!(29, 0x5813f0, "Interior Alarm (request access to entry)"),
    group!(30, 0x101bf0, "Medical Alarm"),
];

/// Pack the three zone type-flag bytes
pub fn fingerprint(type_flags_1: u8, type_flags_2: u8, type_flags_3: u8) -> u32 {
    u32::from_be_bytes([0, type_flags_1, type_flags_2, type_flags_3])
}

/// Result of classifying a fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneGroupMatch {
    Unique(&'static ZoneGroup),
    /// The documented catalog lists this fingerprint under several groups
    Ambiguous(Vec<&'static ZoneGroup>),
    NoMatch,
}

impl ZoneGroupMatch {
    /// Group number text, e.g. `"03"` or `"21/22/23"`
    pub fn group_type(&self) -> String {
        match self {
            ZoneGroupMatch::Unique(group) => format!("{:02}", group.number),
            ZoneGroupMatch::Ambiguous(groups) => groups
                .iter()
                .map(|g| format!("{:02}", g.number))
                .collect::<Vec<_>>()
                .join("/"),
            ZoneGroupMatch::NoMatch => NO_MATCH.to_owned(),
        }
    }

    /// Group description text, candidates joined by `" | "`
    pub fn description(&self) -> String {
        match self {
            ZoneGroupMatch::Unique(group) => group.description.to_owned(),
            ZoneGroupMatch::Ambiguous(groups) => groups
                .iter()
                .map(|g| g.description)
                .collect::<Vec<_>>()
                .join(" | "),
            ZoneGroupMatch::NoMatch => NO_MATCH.to_owned(),
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, ZoneGroupMatch::NoMatch)
    }
}

impl fmt::Display for ZoneGroupMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneGroupMatch::NoMatch => f.write_str(NO_MATCH),
            _ => write!(f, "{} ({})", self.group_type(), self.description()),
        }
    }
}

/// Look a fingerprint up in the catalog
pub fn classify(fingerprint: u32) -> ZoneGroupMatch {
    let mut candidates: Vec<&'static ZoneGroup> = ZONE_GROUPS
        .iter()
        .filter(|group| group.fingerprint == fingerprint)
        .collect();

    match candidates.len() {
        0 => ZoneGroupMatch::NoMatch,
        1 => ZoneGroupMatch::Unique(candidates.remove(0)),
        _ => ZoneGroupMatch::Ambiguous(candidates),
    }
}
