//! Command channel
//!
//! Any number of producers hold a [`CommandSender`]; the communication
//! loop owns the single [`CommandQueue`]. Shutdown travels through the
//! same channel as a sentinel, so it takes effect only when the loop
//! reaches it.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use networx_protocol::{Frame, Request};

use crate::error::EngineError;

/// One entry on the command channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    /// A frame to send, with the name used in status strings
    Command { name: &'static str, frame: Frame },
    /// Stop the loop
    Shutdown,
}

/// Producer side of the command channel
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<QueueItem>,
}

impl CommandSender {
    pub fn enqueue(&self, request: &Request) -> Result<(), EngineError> {
        let frame = request.to_frame()?;
        self.send(QueueItem::Command {
            name: request.name(),
            frame,
        })
    }

    /// Queue a command given as hex text, e.g. `"04 bd 01 01 01"`
    pub fn enqueue_hex(&self, hex: &str) -> Result<(), EngineError> {
        let frame = Frame::from_hex(hex)?;
        self.send(QueueItem::Command {
            name: networx_protocol::message_name(frame.type_byte()),
            frame,
        })
    }

    pub fn request_shutdown(&self) -> Result<(), EngineError> {
        self.send(QueueItem::Shutdown)
    }

    fn send(&self, item: QueueItem) -> Result<(), EngineError> {
        self.tx.send(item).map_err(|_| EngineError::ChannelClosed)
    }
}

/// Consumer side, owned by the loop
#[derive(Debug)]
pub struct CommandQueue {
    rx: Receiver<QueueItem>,
}

impl CommandQueue {
    /// Next queued item without waiting
    pub fn try_next(&self) -> Option<QueueItem> {
        match self.rx.try_recv() {
            Ok(item) => Some(item),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

pub fn command_channel() -> (CommandSender, CommandQueue) {
    let (tx, rx) = mpsc::channel();
    (CommandSender { tx }, CommandQueue { rx })
}
