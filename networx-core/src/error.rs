//! Error types for the panel engine
//!
//! Only [`EngineError`] ever stops the communication loop. Everything else
//! is logged and the loop carries on with the next message.

use networx_protocol::{BitMapError, FrameError, RequestError};
use thiserror::Error;

/// Failure reading or writing one frame on the serial link
#[derive(Debug, Error)]
pub enum LinkError {
    /// Bad delimiter, bad escape sequence or a frame cut short
    #[error("framing error: {0}")]
    Framing(FrameError),

    /// Frame arrived complete but its checksum did not verify
    #[error("checksum mismatch: expected {expected:#06x}, received {received:#06x}")]
    Checksum { expected: u16, received: u16 },

    /// Nothing arrived while a reply was expected
    #[error("no data within {0} ms while a reply was expected")]
    Timeout(u32),

    /// The serial port itself reported an error
    #[error("serial port error: {0}")]
    Port(String),
}

impl LinkError {
    /// Wrap any HAL error
    pub fn port<E: core::fmt::Debug>(error: E) -> Self {
        LinkError::Port(format!("{error:?}"))
    }
}

impl From<FrameError> for LinkError {
    fn from(error: FrameError) -> Self {
        match error {
            FrameError::InvalidChecksum { expected, received } => {
                LinkError::Checksum { expected, received }
            }
            other => LinkError::Framing(other),
        }
    }
}

/// A received frame could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A fixed-position scalar field lies past the end of the frame
    #[error("{message}: byte {index} missing from a {len} byte frame")]
    Truncated {
        message: &'static str,
        index: usize,
        len: usize,
    },

    /// The payload is shorter than the flag tables expect
    #[error("{message}: {region}")]
    FieldCount {
        message: &'static str,
        region: BitMapError,
    },

    /// A scalar field holds a value the panel never sends
    #[error("{message}: invalid value {value:#04x} at byte {index}")]
    InvalidValue {
        message: &'static str,
        index: usize,
        value: u8,
    },
}

/// Configuration could not be loaded or is out of range
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or type error
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// PIN code length other than 4 or 6 digits
    #[error("unsupported PIN code length {0}, expected 4 or 6")]
    CodeLength(u8),

    /// Zone count outside 1..=192
    #[error("zone count {0} out of range 1..=192")]
    ZoneCount(u16),

    /// Partition count outside 1..=8
    #[error("partition count {0} out of range 1..=8")]
    PartitionCount(u8),

    /// User count outside 0..=99
    #[error("user count {0} out of range 0..=99")]
    UserCount(u8),

    /// A timing value that would stall the loop
    #[error("{name} must be greater than zero")]
    ZeroTiming { name: &'static str },
}

/// Conditions that stop the communication loop
#[derive(Debug, Error)]
pub enum EngineError {
    /// The serial port could not be opened at startup
    #[error("failed to open serial port {port}: {reason}")]
    PortOpen { port: String, reason: String },

    /// The serial port failed in a way the loop cannot recover from
    #[error(transparent)]
    Link(#[from] LinkError),

    /// A command could not be encoded
    #[error("invalid command: {0}")]
    Request(RequestError),

    /// The engine has stopped and no longer accepts commands
    #[error("command channel closed")]
    ChannelClosed,
}

impl From<RequestError> for EngineError {
    fn from(error: RequestError) -> Self {
        EngineError::Request(error)
    }
}

impl From<FrameError> for EngineError {
    fn from(error: FrameError) -> Self {
        EngineError::Request(RequestError::Frame(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_frame_error_maps_to_checksum_variant() {
        let error = LinkError::from(FrameError::InvalidChecksum {
            expected: 0x11c4,
            received: 0x0000,
        });
        assert!(matches!(
            error,
            LinkError::Checksum {
                expected: 0x11c4,
                received: 0
            }
        ));
    }

    #[test]
    fn test_other_frame_errors_are_framing() {
        let error = LinkError::from(FrameError::InvalidEscape(0x41));
        assert!(matches!(error, LinkError::Framing(FrameError::InvalidEscape(0x41))));
    }

    #[test]
    fn test_decode_error_message_names_the_message() {
        let error = DecodeError::Truncated {
            message: "Zone Status Message",
            index: 2,
            len: 2,
        };
        assert_eq!(
            error.to_string(),
            "Zone Status Message: byte 2 missing from a 2 byte frame"
        );
    }
}
