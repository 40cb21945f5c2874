//! Message dispatcher
//!
//! Classifies a validated frame, decodes it and decides which control
//! reply, if any, goes back to the panel:
//!
//! - unknown canonical type: CAN, always
//! - decoded and ACK requested: ACK, sent only after decoding succeeded
//! - decode failed and ACK requested: NAK
//!
//! Received control messages (failed, ACK, NAK, CAN) are never answered.

use log::{debug, error, warn};
use networx_protocol::{ControlReply, Frame, MessageType};

use crate::decode::{self, Message};
use crate::error::DecodeError;

/// Result of dispatching one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Decoded {
        message: Message,
        reply: Option<ControlReply>,
    },
    Unsupported {
        type_byte: u8,
    },
    Rejected {
        kind: MessageType,
        error: DecodeError,
        reply: Option<ControlReply>,
    },
}

impl Outcome {
    /// Control frame to send back to the panel
    pub fn reply(&self) -> Option<ControlReply> {
        match self {
            Outcome::Decoded { reply, .. } | Outcome::Rejected { reply, .. } => *reply,
            Outcome::Unsupported { .. } => Some(ControlReply::Can),
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            Outcome::Decoded { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn into_message(self) -> Option<Message> {
        match self {
            Outcome::Decoded { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Decode `frame` and pick the reply
pub fn dispatch(frame: &Frame) -> Outcome {
    let ack_requested = frame.ack_requested();
    let Some(kind) = frame.message_type() else {
        error!(
            "unsupported message type {:#04x} (canonical {:#04x}), sending CAN",
            frame.type_byte(),
            frame.canonical_type()
        );
        return Outcome::Unsupported {
            type_byte: frame.type_byte(),
        };
    };

    if kind.is_control() {
        debug!("received {}", kind.name());
        return Outcome::Decoded {
            message: control_message(kind),
            reply: None,
        };
    }

    match decode::decode(kind, frame) {
        Ok(message) => {
            debug!("received {}: {}", kind.name(), frame);
            Outcome::Decoded {
                message,
                reply: ack_requested.then_some(ControlReply::Ack),
            }
        }
        Err(error) => {
            warn!("discarding {}: {}", kind.name(), error);
            Outcome::Rejected {
                kind,
                error,
                reply: ack_requested.then_some(ControlReply::Nak),
            }
        }
    }
}

fn control_message(kind: MessageType) -> Message {
    match kind {
        MessageType::Ack => Message::Ack,
        MessageType::Nak => Message::Nak,
        MessageType::Rejected => Message::Rejected,
        _ => Message::Failed,
    }
}
