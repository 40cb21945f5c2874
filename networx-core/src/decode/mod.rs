//! Per-message decoders
//!
//! Each decoder turns a validated [`Frame`] into a fixed-shape struct.
//! Frame bytes are indexed the way the panel documentation numbers them:
//! byte 0 is the length, byte 1 the type and byte 2 the first payload byte.
//!
//! Zone and partition numbers travel 0-based and are surfaced 1-based.

pub mod interface;
pub mod keypad;
pub mod log_event;
pub mod partition;
pub mod system;
pub mod user;
pub mod zone;

use networx_protocol::{BitMapError, Frame, MessageType};

use crate::error::DecodeError;

pub use interface::InterfaceConfiguration;
pub use keypad::{KeypadButton, KeypadKey};
pub use log_event::LogEvent;
pub use partition::{PartitionStatus, PartitionsSnapshot};
pub use system::{PanelModel, SystemStatus, X10Function, X10Message};
pub use user::UserInformation;
pub use zone::{ZoneName, ZoneSnapshotFlags, ZoneState, ZoneStatus, ZonesSnapshot};

/// A decoded panel message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    InterfaceConfiguration(InterfaceConfiguration),
    ZoneName(ZoneName),
    ZoneStatus(ZoneStatus),
    ZonesSnapshot(ZonesSnapshot),
    PartitionStatus(PartitionStatus),
    PartitionsSnapshot(PartitionsSnapshot),
    SystemStatus(SystemStatus),
    X10Received(X10Message),
    LogEvent(LogEvent),
    KeypadButton(KeypadButton),
    /// Recognised but not interpreted
    ProgramDataReply(Vec<u8>),
    UserInformation(UserInformation),
    Failed,
    Ack,
    Nak,
    Rejected,
}

impl Message {
    pub fn kind(&self) -> MessageType {
        match self {
            Message::InterfaceConfiguration(_) => MessageType::InterfaceConfiguration,
            Message::ZoneName(_) => MessageType::ZoneName,
            Message::ZoneStatus(_) => MessageType::ZoneStatus,
            Message::ZonesSnapshot(_) => MessageType::ZonesSnapshot,
            Message::PartitionStatus(_) => MessageType::PartitionStatus,
            Message::PartitionsSnapshot(_) => MessageType::PartitionsSnapshot,
            Message::SystemStatus(_) => MessageType::SystemStatus,
            Message::X10Received(_) => MessageType::X10Received,
            Message::LogEvent(_) => MessageType::LogEvent,
            Message::KeypadButton(_) => MessageType::KeypadButton,
            Message::ProgramDataReply(_) => MessageType::ProgramDataReply,
            Message::UserInformation(_) => MessageType::UserInformationReply,
            Message::Failed => MessageType::Failed,
            Message::Ack => MessageType::Ack,
            Message::Nak => MessageType::Nak,
            Message::Rejected => MessageType::Rejected,
        }
    }
}

/// Decode a frame whose type is already known to be `kind`
pub fn decode(kind: MessageType, frame: &Frame) -> Result<Message, DecodeError> {
    let message = match kind {
        MessageType::InterfaceConfiguration => {
            Message::InterfaceConfiguration(InterfaceConfiguration::decode(frame)?)
        }
        MessageType::ZoneName => Message::ZoneName(ZoneName::decode(frame)?),
        MessageType::ZoneStatus => Message::ZoneStatus(ZoneStatus::decode(frame)?),
        MessageType::ZonesSnapshot => Message::ZonesSnapshot(ZonesSnapshot::decode(frame)?),
        MessageType::PartitionStatus => Message::PartitionStatus(PartitionStatus::decode(frame)?),
        MessageType::PartitionsSnapshot => {
            Message::PartitionsSnapshot(PartitionsSnapshot::decode(frame)?)
        }
        MessageType::SystemStatus => Message::SystemStatus(SystemStatus::decode(frame)?),
        MessageType::X10Received => Message::X10Received(X10Message::decode(frame)?),
        MessageType::LogEvent => Message::LogEvent(LogEvent::decode(frame)?),
        MessageType::KeypadButton => Message::KeypadButton(KeypadButton::decode(frame)?),
        MessageType::ProgramDataReply => Message::ProgramDataReply(frame.payload().to_vec()),
        MessageType::UserInformationReply => {
            Message::UserInformation(UserInformation::decode(frame)?)
        }
        MessageType::Failed => Message::Failed,
        MessageType::Ack => Message::Ack,
        MessageType::Nak => Message::Nak,
        MessageType::Rejected => Message::Rejected,
    };
    Ok(message)
}

/// Fixed-position scalar field
pub(crate) fn byte_at(frame: &Frame, index: usize, message: &'static str) -> Result<u8, DecodeError> {
    frame.get(index).ok_or(DecodeError::Truncated {
        message,
        index,
        len: frame.len(),
    })
}

/// 0-based wire number surfaced 1-based
pub(crate) fn one_based(frame: &Frame, index: usize, message: &'static str) -> Result<u8, DecodeError> {
    let raw = byte_at(frame, index, message)?;
    raw.checked_add(1).ok_or(DecodeError::InvalidValue {
        message,
        index,
        value: raw,
    })
}

pub(crate) fn field_count(message: &'static str) -> impl FnOnce(BitMapError) -> DecodeError {
    move |region| DecodeError::FieldCount { message, region }
}

#[cfg(test)]
pub(crate) fn frame(type_byte: u8, payload: &[u8]) -> Frame {
    Frame::new(type_byte, payload).unwrap()
}
