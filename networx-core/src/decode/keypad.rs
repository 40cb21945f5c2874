//! Keypad Message Received (0x0B)

use core::fmt;

use networx_protocol::Frame;

use super::byte_at;
use crate::error::DecodeError;

const KEYPAD_BUTTON: &str = "Keypad Message Received";

/// A key on a panel keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(u8),
    Stay,
    Chime,
    Exit,
    Bypass,
    Cancel,
    Fire,
    Medical,
    Police,
    Star,
    Pound,
    Up,
    Down,
    Auxiliary1,
    Auxiliary2,
    Unknown(u8),
}

impl KeypadKey {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00..=0x09 => KeypadKey::Digit(code),
            0x0A => KeypadKey::Stay,
            0x0B => KeypadKey::Chime,
            0x0C => KeypadKey::Exit,
            0x0D => KeypadKey::Bypass,
            0x0E => KeypadKey::Cancel,
            0x0F => KeypadKey::Fire,
            0x10 => KeypadKey::Medical,
            0x11 => KeypadKey::Police,
            0x12 => KeypadKey::Star,
            0x13 => KeypadKey::Pound,
            0x14 => KeypadKey::Up,
            0x15 => KeypadKey::Down,
            0x80 => KeypadKey::Auxiliary1,
            0x81 => KeypadKey::Auxiliary2,
            other => KeypadKey::Unknown(other),
        }
    }
}

impl fmt::Display for KeypadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeypadKey::Digit(digit) => return write!(f, "{digit}"),
            KeypadKey::Unknown(code) => return write!(f, "unknown ({code:#04x})"),
            KeypadKey::Stay => "Stay",
            KeypadKey::Chime => "Chime",
            KeypadKey::Exit => "Exit",
            KeypadKey::Bypass => "Bypass",
            KeypadKey::Cancel => "Cancel",
            KeypadKey::Fire => "Fire",
            KeypadKey::Medical => "Medical",
            KeypadKey::Police => "Police",
            KeypadKey::Star => "*",
            KeypadKey::Pound => "#",
            KeypadKey::Up => "up",
            KeypadKey::Down => "down",
            KeypadKey::Auxiliary1 => "Auxiliary 1",
            KeypadKey::Auxiliary2 => "Auxiliary 2",
        };
        f.write_str(name)
    }
}

/// A key press on a bus keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// Keypad bus address
    pub keypad: u8,
    pub key: KeypadKey,
}

impl KeypadButton {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        Ok(Self {
            keypad: byte_at(frame, 2, KEYPAD_BUTTON)?,
            key: KeypadKey::from_code(byte_at(frame, 3, KEYPAD_BUTTON)?),
        })
    }
}
