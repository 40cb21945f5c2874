//! Interface Configuration Message (0x01)

use networx_protocol::tables::INTERFACE_CONFIGURATION_TABLES;
use networx_protocol::{bit_map, decode_tables, Field, FlagByte, Frame};

use super::field_count;
use crate::error::DecodeError;

const NAME: &str = "Interface Configuration Message";

const FIRMWARE_START: usize = 2;
const FIRMWARE_LEN: usize = 4;
const FLAGS_START: usize = 6;

/// Firmware version and the broadcasts and requests the interface allows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceConfiguration {
    pub firmware: String,
    /// Transition broadcasts 1-2, then request/command flags 1-4
    pub flags: [FlagByte; 6],
}

impl InterfaceConfiguration {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let body = frame.as_bytes();
        let firmware = bit_map(body, FIRMWARE_START, FIRMWARE_LEN).map_err(field_count(NAME))?;
        let flags = decode_tables(body, FLAGS_START, INTERFACE_CONFIGURATION_TABLES, &[])
            .map_err(field_count(NAME))?;
        Ok(Self {
            firmware: String::from_utf8_lossy(firmware).into_owned(),
            flags,
        })
    }

    /// Transition broadcasts the panel will send
    pub fn broadcasts(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        self.flags[..2].iter().flat_map(|flags| flags.iter())
    }

    /// Requests and commands the panel will accept
    pub fn requests(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        self.flags[2..].iter().flat_map(|flags| flags.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::frame;

    fn sample() -> Frame {
        frame(
            0x01,
            &[b'1', b'.', b'0', b'4', 0xF2, 0x0F, 0xF2, 0x0B, 0x00, 0xFC],
        )
    }

    #[test]
    fn test_firmware_and_flags() {
        let config = InterfaceConfiguration::decode(&sample()).unwrap();
        assert_eq!(config.firmware, "1.04");
        assert_eq!(config.flags[0].raw(), 0xF2);
        assert!(config.flags[0].is_set(Field::ZoneStatusMessage));
        assert!(config.flags[1].is_set(Field::SystemStatusMessage));
        assert!(config.flags[5].is_set(Field::ZoneBypassToggle));
        assert!(!config.flags[4].is_set(Field::ProgramDataRequest));
    }

    #[test]
    fn test_broadcasts_and_requests_are_split() {
        let config = InterfaceConfiguration::decode(&sample()).unwrap();
        assert!(config
            .broadcasts()
            .any(|(field, on)| field == Field::PartitionSnapshotMessage && on));
        assert!(config
            .requests()
            .any(|(field, on)| field == Field::SecondaryKeypadFunction && on));
        assert!(config.broadcasts().all(|(field, _)| field != Field::ZoneBypassToggle));
    }

    #[test]
    fn test_short_message_is_rejected() {
        let short = frame(0x01, &[b'1', b'.', b'0', b'4', 0xF2]);
        assert!(matches!(
            InterfaceConfiguration::decode(&short),
            Err(DecodeError::FieldCount { message: NAME, .. })
        ));
    }
}
