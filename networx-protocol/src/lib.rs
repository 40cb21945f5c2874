//! NetworX Serial Interface Protocol
//!
//! This crate defines the binary protocol spoken by the NetworX serial
//! interface module (NX-584 compatible) in binary mode: framing, byte
//! stuffing, checksums, the message catalog, outbound requests and the
//! bit tables that name every status flag.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM     │
//! │ 0x7E  │ 1B     │ 1B   │ 0–254B      │ 2B (sum1,2)  │
//! └───────┴────────┴──────┴─────────────┴──────────────┘
//!          └──────────── byte stuffed ─────────────────┘
//! ```
//!
//! The panel broadcasts transitions unsolicited and answers requests; the
//! host answers broadcasts that ask for it with ACK, and rejects types it
//! does not know with CAN.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod bitmap;
pub mod checksum;
pub mod fields;
pub mod frame;
pub mod messages;
pub mod requests;
pub mod stuffing;
pub mod tables;

pub use bitmap::{bit_map, decode_tables, BitMapError, BitString, BitTable, FlagByte};
pub use checksum::{fletcher16, Checksum};
pub use fields::Field;
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{message_name, ControlReply, MessageType};
pub use requests::{ClockSetting, PrimaryFunction, Request, RequestError, SecondaryFunction};
