//! Message catalog for the NetworX serial protocol
//!
//! Message types are divided into two categories:
//! - Panel → Host: status broadcasts, replies and control codes (0x01-0x1F)
//! - Host → Panel: requests and commands (0x21-0x3F)
//!
//! The top two bits of the type byte are flags. Bit 7 asks the receiver
//! to acknowledge; bit 6 is an alternate selector the host never sets.

use crate::frame::Frame;

/// Type byte flag: sender requests an acknowledge
pub const ACK_REQUEST_FLAG: u8 = 0x80;

/// Mask selecting the 6-bit canonical type
pub const TYPE_MASK: u8 = 0x3F;

// Message type IDs: Panel → Host
pub const MSG_INTERFACE_CONFIGURATION: u8 = 0x01;
pub const MSG_ZONE_NAME: u8 = 0x03;
pub const MSG_ZONE_STATUS: u8 = 0x04;
pub const MSG_ZONES_SNAPSHOT: u8 = 0x05;
pub const MSG_PARTITION_STATUS: u8 = 0x06;
pub const MSG_PARTITIONS_SNAPSHOT: u8 = 0x07;
pub const MSG_SYSTEM_STATUS: u8 = 0x08;
pub const MSG_X10_RECEIVED: u8 = 0x09;
pub const MSG_LOG_EVENT: u8 = 0x0A;
pub const MSG_KEYPAD_BUTTON: u8 = 0x0B;
pub const MSG_PROGRAM_DATA_REPLY: u8 = 0x10;
pub const MSG_USER_INFORMATION_REPLY: u8 = 0x12;
pub const MSG_FAILED: u8 = 0x1C;
pub const MSG_ACK: u8 = 0x1D;
pub const MSG_NAK: u8 = 0x1E;
pub const MSG_CAN: u8 = 0x1F;

// Message type IDs: Host → Panel
pub const MSG_INTERFACE_CONFIGURATION_REQUEST: u8 = 0x21;
pub const MSG_ZONE_NAME_REQUEST: u8 = 0x23;
pub const MSG_ZONE_STATUS_REQUEST: u8 = 0x24;
pub const MSG_ZONES_SNAPSHOT_REQUEST: u8 = 0x25;
pub const MSG_PARTITION_STATUS_REQUEST: u8 = 0x26;
pub const MSG_PARTITIONS_SNAPSHOT_REQUEST: u8 = 0x27;
pub const MSG_SYSTEM_STATUS_REQUEST: u8 = 0x28;
pub const MSG_SEND_X10: u8 = 0x29;
pub const MSG_LOG_EVENT_REQUEST: u8 = 0x2A;
pub const MSG_SEND_KEYPAD_TEXT: u8 = 0x2B;
pub const MSG_KEYPAD_TERMINAL_MODE_REQUEST: u8 = 0x2C;
pub const MSG_PROGRAM_DATA_REQUEST: u8 = 0x30;
pub const MSG_PROGRAM_DATA_COMMAND: u8 = 0x31;
pub const MSG_USER_INFORMATION_REQUEST_PIN: u8 = 0x32;
pub const MSG_USER_INFORMATION_REQUEST: u8 = 0x33;
pub const MSG_SET_USER_CODE_PIN: u8 = 0x34;
pub const MSG_SET_USER_CODE: u8 = 0x35;
pub const MSG_SET_USER_AUTHORIZATION_PIN: u8 = 0x36;
pub const MSG_SET_USER_AUTHORIZATION: u8 = 0x37;
pub const MSG_STORE_COMMUNICATION_EVENT: u8 = 0x3A;
pub const MSG_SET_CLOCK_CALENDAR: u8 = 0x3B;
pub const MSG_PRIMARY_KEYPAD_FUNCTION_PIN: u8 = 0x3C;
pub const MSG_PRIMARY_KEYPAD_FUNCTION: u8 = 0x3D;
pub const MSG_SECONDARY_KEYPAD_FUNCTION: u8 = 0x3E;
pub const MSG_ZONE_BYPASS_TOGGLE: u8 = 0x3F;

/// Messages the panel sends to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MessageType {
    InterfaceConfiguration = MSG_INTERFACE_CONFIGURATION,
    ZoneName = MSG_ZONE_NAME,
    ZoneStatus = MSG_ZONE_STATUS,
    ZonesSnapshot = MSG_ZONES_SNAPSHOT,
    PartitionStatus = MSG_PARTITION_STATUS,
    PartitionsSnapshot = MSG_PARTITIONS_SNAPSHOT,
    SystemStatus = MSG_SYSTEM_STATUS,
    X10Received = MSG_X10_RECEIVED,
    LogEvent = MSG_LOG_EVENT,
    KeypadButton = MSG_KEYPAD_BUTTON,
    ProgramDataReply = MSG_PROGRAM_DATA_REPLY,
    UserInformationReply = MSG_USER_INFORMATION_REPLY,
    Failed = MSG_FAILED,
    Ack = MSG_ACK,
    Nak = MSG_NAK,
    Rejected = MSG_CAN,
}

impl MessageType {
    /// Look up a canonical (flag-free) type code
    pub fn from_canonical(code: u8) -> Option<Self> {
        let kind = match code {
            MSG_INTERFACE_CONFIGURATION => MessageType::InterfaceConfiguration,
            MSG_ZONE_NAME => MessageType::ZoneName,
            MSG_ZONE_STATUS => MessageType::ZoneStatus,
            MSG_ZONES_SNAPSHOT => MessageType::ZonesSnapshot,
            MSG_PARTITION_STATUS => MessageType::PartitionStatus,
            MSG_PARTITIONS_SNAPSHOT => MessageType::PartitionsSnapshot,
            MSG_SYSTEM_STATUS => MessageType::SystemStatus,
            MSG_X10_RECEIVED => MessageType::X10Received,
            MSG_LOG_EVENT => MessageType::LogEvent,
            MSG_KEYPAD_BUTTON => MessageType::KeypadButton,
            MSG_PROGRAM_DATA_REPLY => MessageType::ProgramDataReply,
            MSG_USER_INFORMATION_REPLY => MessageType::UserInformationReply,
            MSG_FAILED => MessageType::Failed,
            MSG_ACK => MessageType::Ack,
            MSG_NAK => MessageType::Nak,
            MSG_CAN => MessageType::Rejected,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical type code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// ACK, NAK, CAN and Command/Request Failed carry no data
    pub fn is_control(self) -> bool {
        matches!(
            self,
            MessageType::Failed | MessageType::Ack | MessageType::Nak | MessageType::Rejected
        )
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        message_name(self.code())
    }
}

/// Human readable name of any type byte, flags ignored
pub fn message_name(type_byte: u8) -> &'static str {
    match type_byte & TYPE_MASK {
        MSG_INTERFACE_CONFIGURATION => "Interface Configuration Message",
        MSG_ZONE_NAME => "Zone Name Message",
        MSG_ZONE_STATUS => "Zone Status Message",
        MSG_ZONES_SNAPSHOT => "Zones Snapshot Message",
        MSG_PARTITION_STATUS => "Partition Status Message",
        MSG_PARTITIONS_SNAPSHOT => "Partitions Snapshot Message",
        MSG_SYSTEM_STATUS => "System Status Message",
        MSG_X10_RECEIVED => "X-10 Message Received",
        MSG_LOG_EVENT => "Log Event Message",
        MSG_KEYPAD_BUTTON => "Keypad Message Received",
        MSG_PROGRAM_DATA_REPLY => "Program Data Reply",
        MSG_USER_INFORMATION_REPLY => "User Information Reply",
        MSG_FAILED => "Command / Request Failed",
        MSG_ACK => "ACK",
        MSG_NAK => "NAK",
        MSG_CAN => "CAN",
        MSG_INTERFACE_CONFIGURATION_REQUEST => "Interface Configuration Request",
        MSG_ZONE_NAME_REQUEST => "Zone Name Request",
        MSG_ZONE_STATUS_REQUEST => "Zone Status Request",
        MSG_ZONES_SNAPSHOT_REQUEST => "Zones Snapshot Request",
        MSG_PARTITION_STATUS_REQUEST => "Partition Status Request",
        MSG_PARTITIONS_SNAPSHOT_REQUEST => "Partitions Snapshot Request",
        MSG_SYSTEM_STATUS_REQUEST => "System Status Request",
        MSG_SEND_X10 => "Send X-10 Message",
        MSG_LOG_EVENT_REQUEST => "Log Event Request",
        MSG_SEND_KEYPAD_TEXT => "Send Keypad Text Message",
        MSG_KEYPAD_TERMINAL_MODE_REQUEST => "Keypad Terminal Mode Request",
        MSG_PROGRAM_DATA_REQUEST => "Program Data Request",
        MSG_PROGRAM_DATA_COMMAND => "Program Data Command",
        MSG_USER_INFORMATION_REQUEST_PIN => "User Information Request with Pin",
        MSG_USER_INFORMATION_REQUEST => "User Information Request without Pin",
        MSG_SET_USER_CODE_PIN => "Set User Code Command with Pin",
        MSG_SET_USER_CODE => "Set User Code Command without Pin",
        MSG_SET_USER_AUTHORIZATION_PIN => "Set User Authorisation Command with Pin",
        MSG_SET_USER_AUTHORIZATION => "Set User Authorisation Command without Pin",
        MSG_STORE_COMMUNICATION_EVENT => "Store Communication Event Command",
        MSG_SET_CLOCK_CALENDAR => "Set Clock / Calendar Command",
        MSG_PRIMARY_KEYPAD_FUNCTION_PIN => "Primary Keypad Function with Pin",
        MSG_PRIMARY_KEYPAD_FUNCTION => "Primary Keypad Function without Pin",
        MSG_SECONDARY_KEYPAD_FUNCTION => "Secondary Keypad Function",
        MSG_ZONE_BYPASS_TOGGLE => "Zone Bypass Toggle",
        _ => "Unknown Message",
    }
}

/// Replies the host sends back to an unsolicited panel message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlReply {
    /// Message received and processed
    Ack,
    /// Message received but could not be processed
    Nak,
    /// Message type not supported
    Can,
}

impl ControlReply {
    /// Type code of the reply
    pub fn code(self) -> u8 {
        match self {
            ControlReply::Ack => MSG_ACK,
            ControlReply::Nak => MSG_NAK,
            ControlReply::Can => MSG_CAN,
        }
    }

    /// The reply as a frame (`01 1d`, `01 1e` or `01 1f`)
    pub fn to_frame(self) -> Frame {
        Frame::empty(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_set() {
        let known = [
            0x01, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x10, 0x12, 0x1C, 0x1D,
            0x1E, 0x1F,
        ];
        for code in 0..=TYPE_MASK {
            let kind = MessageType::from_canonical(code);
            assert_eq!(kind.is_some(), known.contains(&code), "code {:#04x}", code);
            if let Some(kind) = kind {
                assert_eq!(kind.code(), code);
            }
        }
    }

    #[test]
    fn test_names_ignore_flags() {
        assert_eq!(message_name(0x84), "Zone Status Message");
        assert_eq!(message_name(0xBD), "Primary Keypad Function without Pin");
        assert_eq!(message_name(0x15), "Unknown Message");
        assert_eq!(MessageType::LogEvent.name(), "Log Event Message");
    }

    #[test]
    fn test_control_replies() {
        assert_eq!(ControlReply::Ack.to_frame().as_bytes(), &[0x01, 0x1D]);
        assert_eq!(ControlReply::Nak.to_frame().as_bytes(), &[0x01, 0x1E]);
        assert_eq!(ControlReply::Can.to_frame().as_bytes(), &[0x01, 0x1F]);
        assert!(MessageType::Rejected.is_control());
        assert!(!MessageType::ZoneStatus.is_control());
    }
}
