//! NetworX Hardware Abstraction Layer
//!
//! This crate defines the traits the protocol engine uses to reach the
//! outside world: the serial link to the panel's interface module and a
//! monotonic clock. Host builds implement them over an OS serial port;
//! tests implement them over in-memory buffers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  networx-core (engine, decoders)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  networx-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ serialport    │       │ in-memory     │
//! │ (bridge)      │       │ mocks (tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`clock::Clock`] - Monotonic time and delays

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod uart;

pub use clock::Clock;
pub use embedded_hal::delay::DelayNs;
pub use uart::{Uart, UartConfig, UartRx, UartTx};
