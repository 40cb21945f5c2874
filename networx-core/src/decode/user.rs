//! User Information Reply (0x12)

use networx_protocol::tables::{
    USER_AUTHORISED_PARTITIONS, USER_AUTHORITY_FLAGS, USER_OUTPUT_AUTHORITY_FLAGS,
};
use networx_protocol::{bit_map, FlagByte, Frame};

use super::{byte_at, field_count};
use crate::error::{ConfigError, DecodeError};

const USER_INFORMATION: &str = "User Information Reply";

const PIN_START: usize = 3;
const PIN_BYTES: usize = 3;
const AUTHORITY_INDEX: usize = 6;
const PARTITIONS_INDEX: usize = 7;

/// Selects the output variant of the authority byte
const OUTPUT_AUTHORITY_BIT: u8 = 0x80;

/// A user's code, authority and partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInformation {
    /// User number as the panel reports it
    pub user: u8,
    /// Packed BCD, low nibble first
    pub pin_bytes: [u8; PIN_BYTES],
    pub authority: FlagByte,
    pub partitions: FlagByte,
}

impl UserInformation {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let user = byte_at(frame, 2, USER_INFORMATION)?;
        let pin = bit_map(frame.as_bytes(), PIN_START, PIN_BYTES)
            .map_err(field_count(USER_INFORMATION))?;
        let mut pin_bytes = [0; PIN_BYTES];
        pin_bytes.copy_from_slice(pin);

        let raw_authority = byte_at(frame, AUTHORITY_INDEX, USER_INFORMATION)?;
        let table = if raw_authority & OUTPUT_AUTHORITY_BIT == 0 {
            &USER_AUTHORITY_FLAGS
        } else {
            &USER_OUTPUT_AUTHORITY_FLAGS
        };
        let partitions = byte_at(frame, PARTITIONS_INDEX, USER_INFORMATION)?;
        Ok(Self {
            user,
            pin_bytes,
            authority: FlagByte::new(table, raw_authority),
            partitions: FlagByte::new(&USER_AUTHORISED_PARTITIONS, partitions),
        })
    }

    /// PIN digits for a panel using `code_length` digit codes
    pub fn pin(&self, code_length: u8) -> Result<String, ConfigError> {
        let digits = match code_length {
            4 | 6 => usize::from(code_length),
            other => return Err(ConfigError::CodeLength(other)),
        };
        Ok(self
            .pin_bytes
            .iter()
            .flat_map(|&byte| [byte & 0x0F, byte >> 4])
            .take(digits)
            .map(|nibble| format!("{nibble:x}"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::frame;
    use networx_protocol::Field;

    fn sample(authority: u8) -> UserInformation {
        UserInformation::decode(&frame(0x12, &[0x03, 0x21, 0x43, 0x65, authority, 0x03])).unwrap()
    }

    #[test]
    fn test_pin_low_nibble_first() {
        let info = sample(0x10);
        assert_eq!(info.user, 3);
        assert_eq!(info.pin(4).unwrap(), "1234");
        assert_eq!(info.pin(6).unwrap(), "123456");
    }

    #[test]
    fn test_unprogrammed_digits_are_lowercase_hex() {
        let info =
            UserInformation::decode(&frame(0x12, &[0x03, 0x21, 0xF3, 0xAF, 0x10, 0x03])).unwrap();
        assert_eq!(info.pin(4).unwrap(), "123f");
        assert_eq!(info.pin(6).unwrap(), "123ffa");
    }

    #[test]
    fn test_other_code_lengths_are_errors() {
        assert!(matches!(sample(0x10).pin(5), Err(ConfigError::CodeLength(5))));
    }

    #[test]
    fn test_authority_table_follows_bit_7() {
        let plain = sample(0x10);
        assert!(plain.authority.is_set(Field::ArmDisarmEnabled));
        assert_eq!(plain.authority.get(Field::Output1Enable), None);

        let output = sample(0x81);
        assert!(output.authority.is_set(Field::Output1Enable));
        assert_eq!(output.authority.get(Field::MasterProgram), None);

        assert!(plain.partitions.is_set(Field::AuthorisedForPartition1));
        assert!(plain.partitions.is_set(Field::AuthorisedForPartition2));
        assert!(!plain.partitions.is_set(Field::AuthorisedForPartition3));
    }
}
