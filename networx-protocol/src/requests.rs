//! Outbound requests and commands
//!
//! Zone and partition numbers are 1-based here and 0-based on the wire.
//! User numbers and log event numbers are sent as given.

use core::fmt;

use crate::frame::{Frame, FrameError};
use crate::messages::*;

/// Highest zone number the largest panel supports
pub const MAX_ZONES: u16 = 192;

/// Partitions per panel
pub const MAX_PARTITIONS: u8 = 8;

/// Zones covered by one Zones Snapshot block
pub const ZONES_PER_SNAPSHOT_BLOCK: u16 = 16;

/// Zones Snapshot blocks needed for [`MAX_ZONES`]
pub const SNAPSHOT_BLOCKS: u8 = (MAX_ZONES / ZONES_PER_SNAPSHOT_BLOCK) as u8;

/// Highest user number
pub const MAX_USERS: u8 = 99;

/// Errors building a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    ZoneOutOfRange(u16),
    PartitionOutOfRange(u8),
    SnapshotBlockOutOfRange(u8),
    UserOutOfRange(u8),
    InvalidClock,
    Frame(FrameError),
}

impl From<FrameError> for RequestError {
    fn from(err: FrameError) -> Self {
        RequestError::Frame(err)
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::ZoneOutOfRange(z) => write!(f, "zone {} out of range 1..={}", z, MAX_ZONES),
            RequestError::PartitionOutOfRange(p) => {
                write!(f, "partition {} out of range 1..={}", p, MAX_PARTITIONS)
            }
            RequestError::SnapshotBlockOutOfRange(b) => {
                write!(f, "snapshot block {} out of range 0..{}", b, SNAPSHOT_BLOCKS)
            }
            RequestError::UserOutOfRange(u) => write!(f, "user {} out of range 1..={}", u, MAX_USERS),
            RequestError::InvalidClock => f.write_str("invalid clock setting"),
            RequestError::Frame(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RequestError {}

/// Primary keypad functions (sent without PIN)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PrimaryFunction {
    TurnOffSounderOrAlarm = 0,
    Disarm = 1,
    ArmAway = 2,
    ArmStay = 3,
    Cancel = 4,
    InitiateAutoArm = 5,
    StartWalkTest = 6,
    StopWalkTest = 7,
}

/// Secondary keypad functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SecondaryFunction {
    StayOneButtonArmToggleInteriors = 0,
    ChimeToggle = 1,
    ExitOneButtonArmToggleInstant = 2,
    BypassInteriors = 3,
    FirePanic = 4,
    MedicalPanic = 5,
    PolicePanic = 6,
    SmokeDetectorReset = 7,
    AutoCallbackDownload = 8,
    ManualPickupDownload = 9,
    EnableSilentExit = 10,
    PerformTest = 11,
    GroupBypass = 12,
    AuxiliaryFunction1 = 13,
    AuxiliaryFunction2 = 14,
    StartKeypadSounder = 15,
}

/// Date and time for the Set Clock / Calendar command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSetting {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    weekday: u8,
}

impl ClockSetting {
    /// Validate a calendar setting
    ///
    /// `weekday` counts from Sunday = 1 to Saturday = 7, as the panel
    /// expects. Only years 2000-2099 fit the panel's two-digit year.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        weekday: u8,
    ) -> Result<Self, RequestError> {
        let valid = (2000..=2099).contains(&year)
            && (1..=12).contains(&month)
            && (1..=31).contains(&day)
            && hour < 24
            && minute < 60
            && (1..=7).contains(&weekday);
        if !valid {
            return Err(RequestError::InvalidClock);
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            weekday,
        })
    }

    fn to_payload(self) -> [u8; 6] {
        [
            (self.year - 2000) as u8,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.weekday,
        ]
    }
}

/// Requests and commands the host can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    InterfaceConfiguration,
    ZoneName { zone: u16 },
    ZoneStatus { zone: u16 },
    ZonesSnapshot { block: u8 },
    PartitionStatus { partition: u8 },
    PartitionsSnapshot,
    SystemStatus,
    LogEvent { event: u8 },
    UserInformation { user: u8 },
    ZoneBypassToggle { zone: u16 },
    SetClockCalendar(ClockSetting),
    PrimaryKeypad {
        function: PrimaryFunction,
        partition_mask: u8,
        user: u8,
    },
    SecondaryKeypad {
        function: SecondaryFunction,
        partition_mask: u8,
    },
}

impl Request {
    /// Primary keypad function on partition 1 as user 1
    pub fn primary(function: PrimaryFunction) -> Self {
        Request::PrimaryKeypad {
            function,
            partition_mask: 0x01,
            user: 0x01,
        }
    }

    /// Secondary keypad function on partition 1
    pub fn secondary(function: SecondaryFunction) -> Self {
        Request::SecondaryKeypad {
            function,
            partition_mask: 0x01,
        }
    }

    /// Type byte sent on the wire, acknowledge flag included
    pub fn type_byte(&self) -> u8 {
        match self {
            Request::InterfaceConfiguration => MSG_INTERFACE_CONFIGURATION_REQUEST,
            Request::ZoneName { .. } => MSG_ZONE_NAME_REQUEST,
            Request::ZoneStatus { .. } => MSG_ZONE_STATUS_REQUEST,
            Request::ZonesSnapshot { .. } => MSG_ZONES_SNAPSHOT_REQUEST,
            Request::PartitionStatus { .. } => MSG_PARTITION_STATUS_REQUEST,
            Request::PartitionsSnapshot => MSG_PARTITIONS_SNAPSHOT_REQUEST,
            Request::SystemStatus => MSG_SYSTEM_STATUS_REQUEST,
            Request::LogEvent { .. } => MSG_LOG_EVENT_REQUEST,
            Request::UserInformation { .. } => MSG_USER_INFORMATION_REQUEST,
            Request::SetClockCalendar(_) => MSG_SET_CLOCK_CALENDAR,
            // Commands that change panel state ask for an acknowledge
            Request::ZoneBypassToggle { .. } => MSG_ZONE_BYPASS_TOGGLE | ACK_REQUEST_FLAG,
            Request::PrimaryKeypad { .. } => MSG_PRIMARY_KEYPAD_FUNCTION | ACK_REQUEST_FLAG,
            Request::SecondaryKeypad { .. } => MSG_SECONDARY_KEYPAD_FUNCTION | ACK_REQUEST_FLAG,
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        message_name(self.type_byte())
    }

    /// Encode this request into a frame
    pub fn to_frame(&self) -> Result<Frame, RequestError> {
        let type_byte = self.type_byte();
        let frame = match *self {
            Request::InterfaceConfiguration
            | Request::PartitionsSnapshot
            | Request::SystemStatus => Frame::empty(type_byte),
            Request::ZoneName { zone }
            | Request::ZoneStatus { zone }
            | Request::ZoneBypassToggle { zone } => Frame::new(type_byte, &[zone_index(zone)?])?,
            Request::ZonesSnapshot { block } => {
                if block >= SNAPSHOT_BLOCKS {
                    return Err(RequestError::SnapshotBlockOutOfRange(block));
                }
                Frame::new(type_byte, &[block])?
            }
            Request::PartitionStatus { partition } => {
                Frame::new(type_byte, &[partition_index(partition)?])?
            }
            Request::LogEvent { event } => Frame::new(type_byte, &[event])?,
            Request::UserInformation { user } => {
                if user == 0 || user > MAX_USERS {
                    return Err(RequestError::UserOutOfRange(user));
                }
                Frame::new(type_byte, &[user])?
            }
            Request::SetClockCalendar(setting) => Frame::new(type_byte, &setting.to_payload())?,
            Request::PrimaryKeypad {
                function,
                partition_mask,
                user,
            } => Frame::new(type_byte, &[function as u8, partition_mask, user])?,
            Request::SecondaryKeypad {
                function,
                partition_mask,
            } => Frame::new(type_byte, &[function as u8, partition_mask])?,
        };
        Ok(frame)
    }
}

/// 1-based zone number to wire index
fn zone_index(zone: u16) -> Result<u8, RequestError> {
    if zone == 0 || zone > MAX_ZONES {
        return Err(RequestError::ZoneOutOfRange(zone));
    }
    Ok((zone - 1) as u8)
}

/// 1-based partition number to wire index
fn partition_index(partition: u8) -> Result<u8, RequestError> {
    if partition == 0 || partition > MAX_PARTITIONS {
        return Err(RequestError::PartitionOutOfRange(partition));
    }
    Ok(partition - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(request: Request) -> heapless::Vec<u8, 16> {
        heapless::Vec::from_slice(request.to_frame().unwrap().as_bytes()).unwrap()
    }

    #[test]
    fn test_keypad_command_templates() {
        assert_eq!(bytes(Request::primary(PrimaryFunction::Disarm)), [0x04, 0xBD, 0x01, 0x01, 0x01]);
        assert_eq!(bytes(Request::primary(PrimaryFunction::ArmAway)), [0x04, 0xBD, 0x02, 0x01, 0x01]);
        assert_eq!(bytes(Request::primary(PrimaryFunction::ArmStay)), [0x04, 0xBD, 0x03, 0x01, 0x01]);
        assert_eq!(
            bytes(Request::primary(PrimaryFunction::TurnOffSounderOrAlarm)),
            [0x04, 0xBD, 0x00, 0x01, 0x01]
        );
        assert_eq!(bytes(Request::secondary(SecondaryFunction::FirePanic)), [0x03, 0xBE, 0x04, 0x01]);
        assert_eq!(
            bytes(Request::secondary(SecondaryFunction::StartKeypadSounder)),
            [0x03, 0xBE, 0x0F, 0x01]
        );
    }

    #[test]
    fn test_status_requests() {
        assert_eq!(bytes(Request::InterfaceConfiguration), [0x01, 0x21]);
        assert_eq!(bytes(Request::PartitionsSnapshot), [0x01, 0x27]);
        assert_eq!(bytes(Request::SystemStatus), [0x01, 0x28]);
        assert_eq!(bytes(Request::LogEvent { event: 25 }), [0x02, 0x2A, 0x19]);
        assert_eq!(bytes(Request::UserInformation { user: 1 }), [0x02, 0x33, 0x01]);
        assert_eq!(bytes(Request::ZonesSnapshot { block: 11 }), [0x02, 0x25, 0x0B]);
    }

    #[test]
    fn test_zone_and_partition_are_zero_based_on_wire() {
        assert_eq!(bytes(Request::ZoneStatus { zone: 1 }), [0x02, 0x24, 0x00]);
        assert_eq!(bytes(Request::ZoneName { zone: 192 }), [0x02, 0x23, 0xBF]);
        assert_eq!(bytes(Request::ZoneBypassToggle { zone: 3 }), [0x02, 0xBF, 0x02]);
        assert_eq!(bytes(Request::PartitionStatus { partition: 1 }), [0x02, 0x26, 0x00]);
    }

    #[test]
    fn test_range_checks() {
        assert_eq!(
            Request::ZoneStatus { zone: 0 }.to_frame(),
            Err(RequestError::ZoneOutOfRange(0))
        );
        assert_eq!(
            Request::ZoneStatus { zone: 193 }.to_frame(),
            Err(RequestError::ZoneOutOfRange(193))
        );
        assert_eq!(
            Request::PartitionStatus { partition: 9 }.to_frame(),
            Err(RequestError::PartitionOutOfRange(9))
        );
        assert_eq!(
            Request::ZonesSnapshot { block: 12 }.to_frame(),
            Err(RequestError::SnapshotBlockOutOfRange(12))
        );
        assert_eq!(
            Request::UserInformation { user: 0 }.to_frame(),
            Err(RequestError::UserOutOfRange(0))
        );
    }

    #[test]
    fn test_set_clock() {
        // Friday 2024-03-15 13:45, weekday Friday = 6
        let setting = ClockSetting::new(2024, 3, 15, 13, 45, 6).unwrap();
        assert_eq!(
            bytes(Request::SetClockCalendar(setting)),
            [0x07, 0x3B, 0x18, 0x03, 0x0F, 0x0D, 0x2D, 0x06]
        );
        assert_eq!(ClockSetting::new(1999, 1, 1, 0, 0, 1), Err(RequestError::InvalidClock));
        assert_eq!(ClockSetting::new(2024, 13, 1, 0, 0, 1), Err(RequestError::InvalidClock));
        assert_eq!(ClockSetting::new(2024, 1, 1, 0, 0, 0), Err(RequestError::InvalidClock));
    }

    #[test]
    fn test_request_names() {
        assert_eq!(Request::ZoneStatus { zone: 1 }.name(), "Zone Status Request");
        assert_eq!(
            Request::primary(PrimaryFunction::Disarm).name(),
            "Primary Keypad Function without Pin"
        );
    }
}
