//! Byte stuffing for the frame body.
//!
//! The delimiter 0x7E must never appear inside a frame, so every 0x7E and
//! every escape byte 0x7D between the length byte and the checksum is
//! replaced by a two-byte sequence:
//!
//! | Raw    | On the wire  |
//! |--------|--------------|
//! | `0x7E` | `0x7D 0x5E`  |
//! | `0x7D` | `0x7D 0x5D`  |
//!
//! The leading delimiter itself is never escaped.

use heapless::Vec;

use crate::frame::{FrameError, FRAME_START};

/// Escape marker
pub const ESCAPE: u8 = 0x7D;

/// Second byte of an escaped delimiter
pub const ESCAPED_START: u8 = 0x5E;

/// Second byte of an escaped escape marker
pub const ESCAPED_ESCAPE: u8 = 0x5D;

/// Number of bytes `input` occupies once escaped
pub fn escaped_len(input: &[u8]) -> usize {
    input
        .iter()
        .map(|&b| if b == FRAME_START || b == ESCAPE { 2 } else { 1 })
        .sum()
}

/// Escape `input`, appending the result to `output`
pub fn escape<const N: usize>(input: &[u8], output: &mut Vec<u8, N>) -> Result<(), FrameError> {
    for &byte in input {
        let pushed = match byte {
            FRAME_START => output.extend_from_slice(&[ESCAPE, ESCAPED_START]),
            ESCAPE => output.extend_from_slice(&[ESCAPE, ESCAPED_ESCAPE]),
            other => output.push(other).map_err(|_| ()),
        };
        pushed.map_err(|_| FrameError::BufferTooSmall)?;
    }
    Ok(())
}

/// Map the byte following an escape marker back to its raw value
pub fn unescape_byte(byte: u8) -> Result<u8, FrameError> {
    match byte {
        ESCAPED_START => Ok(FRAME_START),
        ESCAPED_ESCAPE => Ok(ESCAPE),
        other => Err(FrameError::InvalidEscape(other)),
    }
}

/// Unescape `input`, appending the result to `output`
///
/// An escape marker followed by anything other than 0x5E or 0x5D, or a
/// dangling escape marker at the end of the input, is a framing error.
pub fn unescape<const N: usize>(input: &[u8], output: &mut Vec<u8, N>) -> Result<(), FrameError> {
    let mut bytes = input.iter();
    while let Some(&byte) = bytes.next() {
        let raw = if byte == ESCAPE {
            let &next = bytes.next().ok_or(FrameError::Truncated)?;
            unescape_byte(next)?
        } else {
            byte
        };
        output.push(raw).map_err(|_| FrameError::BufferTooSmall)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_bytes_unchanged() {
        let mut out: Vec<u8, 16> = Vec::new();
        escape(&[0x01, 0x21, 0x80], &mut out).unwrap();
        assert_eq!(out.as_slice(), &[0x01, 0x21, 0x80]);
    }

    #[test]
    fn test_escape_delimiter_and_marker() {
        let mut out: Vec<u8, 16> = Vec::new();
        escape(&[0x7E, 0x01, 0x7D], &mut out).unwrap();
        assert_eq!(out.as_slice(), &[0x7D, 0x5E, 0x01, 0x7D, 0x5D]);
        assert_eq!(escaped_len(&[0x7E, 0x01, 0x7D]), 5);
    }

    #[test]
    fn test_unescape_inverse() {
        let mut out: Vec<u8, 16> = Vec::new();
        unescape(&[0x7D, 0x5E, 0x01, 0x7D, 0x5D], &mut out).unwrap();
        assert_eq!(out.as_slice(), &[0x7E, 0x01, 0x7D]);
    }

    #[test]
    fn test_unescape_bad_sequence() {
        let mut out: Vec<u8, 16> = Vec::new();
        assert_eq!(
            unescape(&[0x01, 0x7D, 0x42], &mut out),
            Err(FrameError::InvalidEscape(0x42))
        );
    }

    #[test]
    fn test_unescape_dangling_marker() {
        let mut out: Vec<u8, 16> = Vec::new();
        assert_eq!(unescape(&[0x01, 0x7D], &mut out), Err(FrameError::Truncated));
    }

    #[test]
    fn test_escape_buffer_too_small() {
        let mut out: Vec<u8, 2> = Vec::new();
        assert_eq!(escape(&[0x01, 0x7E], &mut out), Err(FrameError::BufferTooSmall));
    }

    proptest! {
        #[test]
        fn prop_escape_roundtrip(data in proptest::collection::vec(
            prop_oneof![Just(0x7Eu8), Just(0x7Du8), any::<u8>()], 0..64)) {
            let mut escaped: Vec<u8, 128> = Vec::new();
            escape(&data, &mut escaped).unwrap();
            prop_assert!(!escaped.contains(&FRAME_START));
            prop_assert_eq!(escaped.len(), escaped_len(&data));

            let mut restored: Vec<u8, 128> = Vec::new();
            unescape(&escaped, &mut restored).unwrap();
            prop_assert_eq!(restored.as_slice(), data.as_slice());
        }
    }
}
