//! Host-side engine for the NetworX panel bridge
//!
//! This crate holds everything between the wire protocol and the
//! automation host:
//!
//! - Per-message decoders and the dispatcher that picks ACK, NAK or CAN
//! - Lookup catalogs (zone groups, log events, bus devices, keypad display)
//! - The communication loop: link, command channel, watchdog
//! - The host collaborator traits the loop reports through
//! - Engine configuration
//!
//! The serial port and clock come in through `networx-hal`, so the whole
//! loop runs against in-memory doubles in tests.

#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod host;
pub mod timefmt;

pub use config::EngineConfig;
pub use decode::Message;
pub use dispatch::{dispatch, Outcome};
pub use engine::{command_channel, CommandSender, Engine, LoopControl};
pub use error::{ConfigError, DecodeError, EngineError, LinkError};
pub use host::{DeviceId, DeviceKind, Host, PortOpener, StateValue, States};
