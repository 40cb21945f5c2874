//! Frame encoding and decoding for the NetworX serial protocol.
//!
//! Frame format on the wire:
//! - START (1 byte): 0x7E delimiter, never escaped
//! - LENGTH (1 byte): number of bytes in TYPE + PAYLOAD
//! - TYPE (1 byte): message type; bit 7 requests an acknowledge
//! - PAYLOAD (0-254 bytes): type-specific data
//! - CHECKSUM (2 bytes): Fletcher-16 over LENGTH, TYPE and PAYLOAD, sum1 first
//!
//! Everything after START is byte-stuffed (see [`crate::stuffing`]).
//!
//! A validated [`Frame`] keeps the unescaped body `[length, type, payload...]`
//! so that decoders can index it directly: index 0 is the length byte,
//! index 1 the type byte and index 2 onwards the payload.

use core::fmt;

use heapless::Vec;

use crate::checksum::{fletcher16, Checksum, CHECKSUM_SIZE};
use crate::messages::{MessageType, ACK_REQUEST_FLAG, TYPE_MASK};
use crate::stuffing::{self, ESCAPE};

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum body size: the length byte plus up to 255 counted bytes
pub const MAX_BODY_SIZE: usize = 1 + u8::MAX as usize;

/// Maximum payload size in bytes (the type byte is counted by LENGTH too)
pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize - 1;

/// Maximum complete frame size with every body byte escaped
pub const MAX_FRAME_SIZE: usize = 1 + 2 * (MAX_BODY_SIZE + CHECKSUM_SIZE);

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A byte other than the delimiter arrived while waiting for a frame
    UnexpectedByte(u8),
    /// Escape marker followed by something other than 0x5E or 0x5D
    InvalidEscape(u8),
    /// Stream ended, or a new delimiter arrived, before the frame was complete
    Truncated,
    /// Received checksum does not match the computed one
    InvalidChecksum { expected: u16, received: u16 },
    /// LENGTH is zero or disagrees with the bytes supplied
    InvalidLength,
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Hex command text is malformed
    InvalidHex,
}

impl FrameError {
    /// Framing errors leave the receive buffer out of sync and call for a flush
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            FrameError::UnexpectedByte(_) | FrameError::InvalidEscape(_) | FrameError::Truncated
        )
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::UnexpectedByte(b) => write!(f, "missing start character, got 0x{:02x}", b),
            FrameError::InvalidEscape(b) => write!(f, "bad byte stuffing 0x7d 0x{:02x}", b),
            FrameError::Truncated => f.write_str("frame truncated"),
            FrameError::InvalidChecksum { expected, received } => write!(
                f,
                "checksum mismatch: computed 0x{:04x}, received 0x{:04x}",
                expected, received
            ),
            FrameError::InvalidLength => f.write_str("invalid length byte"),
            FrameError::PayloadTooLarge => f.write_str("payload too large"),
            FrameError::BufferTooSmall => f.write_str("buffer too small"),
            FrameError::InvalidHex => f.write_str("invalid hex command"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// A validated or constructed frame body
///
/// Holds `[length, type, payload...]` without delimiter, escaping or
/// checksum. The length byte always equals `1 + payload.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    body: Vec<u8, MAX_BODY_SIZE>,
}

impl Frame {
    /// Create a new frame with the given type byte and payload
    pub fn new(type_byte: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }

        let mut body = Vec::new();
        // Capacity is MAX_BODY_SIZE, checked above
        body.push((payload.len() + 1) as u8)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        body.push(type_byte).map_err(|_| FrameError::PayloadTooLarge)?;
        body.extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self { body })
    }

    /// Create a frame with no payload
    pub fn empty(type_byte: u8) -> Self {
        let mut body = Vec::new();
        // Two bytes always fit
        let _ = body.extend_from_slice(&[1, type_byte]);
        Self { body }
    }

    /// Wrap an unescaped body that already carries its length byte
    pub fn from_body(body: &[u8]) -> Result<Self, FrameError> {
        match body.split_first() {
            Some((&length, rest)) if length != 0 && length as usize == rest.len() => {
                let mut vec = Vec::new();
                vec.extend_from_slice(body)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Ok(Self { body: vec })
            }
            _ => Err(FrameError::InvalidLength),
        }
    }

    /// Parse a hex command template such as `"04bd010101"`
    ///
    /// Whitespace may separate byte pairs, e.g. `"04 bd 01 01 01"`.
    pub fn from_hex(text: &str) -> Result<Self, FrameError> {
        let mut body: Vec<u8, MAX_BODY_SIZE> = Vec::new();
        for word in text.split_ascii_whitespace() {
            if word.len() % 2 != 0 {
                return Err(FrameError::InvalidHex);
            }
            for pair in word.as_bytes().chunks(2) {
                let hi = hex_value(pair[0])?;
                let lo = hex_value(pair[1])?;
                body.push((hi << 4) | lo).map_err(|_| FrameError::InvalidHex)?;
            }
        }
        Self::from_body(&body)
    }

    /// The unescaped body `[length, type, payload...]`
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Byte at `index` of the body, if present
    pub fn get(&self, index: usize) -> Option<u8> {
        self.body.get(index).copied()
    }

    /// Number of body bytes including the length byte
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// A frame always carries at least its length and type bytes
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The LENGTH byte
    pub fn length(&self) -> u8 {
        self.body[0]
    }

    /// The raw TYPE byte including flag bits
    pub fn type_byte(&self) -> u8 {
        self.body[1]
    }

    /// TYPE with the acknowledge and alternate bits masked off
    pub fn canonical_type(&self) -> u8 {
        self.type_byte() & TYPE_MASK
    }

    /// Whether the sender asked for an acknowledge
    pub fn ack_requested(&self) -> bool {
        self.type_byte() & ACK_REQUEST_FLAG != 0
    }

    /// Recognized message kind, if any
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_canonical(self.canonical_type())
    }

    /// Bytes after the type byte
    pub fn payload(&self) -> &[u8] {
        &self.body[2..]
    }

    /// Checksum over the body
    pub fn checksum(&self) -> Checksum {
        fletcher16(&self.body)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Appends the checksum, escapes body and checksum, then prepends the
    /// delimiter. Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let encoded = self.encode_to_vec()?;
        if buffer.len() < encoded.len() {
            return Err(FrameError::BufferTooSmall);
        }
        buffer[..encoded.len()].copy_from_slice(&encoded);
        Ok(encoded.len())
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
        out.push(FRAME_START).map_err(|_| FrameError::BufferTooSmall)?;
        stuffing::escape(&self.body, &mut out)?;
        stuffing::escape(&self.checksum().to_le_bytes(), &mut out)?;
        Ok(out)
    }
}

impl fmt::Display for Frame {
    /// Lowercase hex, the same shape as command templates
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.body {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

fn hex_value(c: u8) -> Result<u8, FrameError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(FrameError::InvalidHex),
    }
}

/// Body plus checksum, as accumulated by the parser
const RAW_SIZE: usize = MAX_BODY_SIZE + CHECKSUM_SIZE;

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, RAW_SIZE>,
    remaining: usize,
    escape_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Got START, waiting for LENGTH
    WaitingForLength,
    /// Reading TYPE, PAYLOAD and CHECKSUM
    ReadingBody,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
            remaining: 0,
            escape_pending: false,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
        self.remaining = 0;
        self.escape_pending = false;
    }

    /// True when no partial frame is held
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::WaitingForStart
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// Unlike a resynchronizing parser, a stray byte while waiting for the
    /// delimiter is reported so the caller can flush its input.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        if self.state == ParseState::WaitingForStart {
            if byte == FRAME_START {
                self.state = ParseState::WaitingForLength;
                return Ok(None);
            }
            return Err(FrameError::UnexpectedByte(byte));
        }

        if byte == FRAME_START {
            // A fresh delimiter inside a frame: the previous frame was cut short
            self.reset();
            self.state = ParseState::WaitingForLength;
            return Err(FrameError::Truncated);
        }

        let byte = if self.escape_pending {
            self.escape_pending = false;
            match stuffing::unescape_byte(byte) {
                Ok(raw) => raw,
                Err(e) => {
                    self.reset();
                    return Err(e);
                }
            }
        } else if byte == ESCAPE {
            self.escape_pending = true;
            return Ok(None);
        } else {
            byte
        };

        match self.state {
            ParseState::WaitingForLength => {
                if byte == 0 {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.buffer.clear();
                let _ = self.buffer.push(byte);
                self.remaining = byte as usize + CHECKSUM_SIZE;
                self.state = ParseState::ReadingBody;
                Ok(None)
            }
            ParseState::ReadingBody => {
                // Cannot overflow: LENGTH is at most 255
                let _ = self.buffer.push(byte);
                self.remaining -= 1;
                if self.remaining > 0 {
                    return Ok(None);
                }
                let result = self.verify();
                self.reset();
                result.map(Some)
            }
            ParseState::WaitingForStart => Ok(None),
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    fn verify(&self) -> Result<Frame, FrameError> {
        let split = self.buffer.len() - CHECKSUM_SIZE;
        let (body, trailer) = self.buffer.split_at(split);
        let received = Checksum::from_le_bytes([trailer[0], trailer[1]]);
        let expected = fletcher16(body);
        if received != expected {
            return Err(FrameError::InvalidChecksum {
                expected: expected.value(),
                received: received.value(),
            });
        }
        Frame::from_body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DISARM_WIRE: [u8; 8] = [0x7E, 0x04, 0xBD, 0x01, 0x01, 0x01, 0xC4, 0x11];

    #[test]
    fn test_disarm_golden_frame() {
        let frame = Frame::from_hex("04bd010101").unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        assert_eq!(encoded.as_slice(), &DISARM_WIRE);
    }

    #[test]
    fn test_disarm_roundtrip_through_parser() {
        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&DISARM_WIRE).unwrap().unwrap();

        assert_eq!(frame.as_bytes(), &[0x04, 0xBD, 0x01, 0x01, 0x01]);
        assert_eq!(frame.length(), 4);
        assert_eq!(frame.canonical_type(), 0x3D);
        assert!(frame.ack_requested());
        assert_eq!(frame.payload(), &[0x01, 0x01, 0x01]);
        assert!(parser.is_idle());
    }

    #[test]
    fn test_frame_new_sets_length() {
        let frame = Frame::new(0x24, &[0x00]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x02, 0x24, 0x00]);
        assert_eq!(Frame::empty(0x21).as_bytes(), &[0x01, 0x21]);
    }

    #[test]
    fn test_frame_display_is_hex() {
        let frame = Frame::from_hex("04BD010101").unwrap();
        let mut text: heapless::String<16> = heapless::String::new();
        core::fmt::write(&mut text, format_args!("{}", frame)).unwrap();
        assert_eq!(text.as_str(), "04bd010101");
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert_eq!(Frame::from_hex("04bd01"), Err(FrameError::InvalidLength));
        assert_eq!(Frame::from_hex("0z21"), Err(FrameError::InvalidHex));
        assert_eq!(Frame::from_hex("012"), Err(FrameError::InvalidHex));
        assert_eq!(Frame::from_hex(""), Err(FrameError::InvalidLength));
        assert_eq!(Frame::from_hex("04 bd 0 1 01"), Err(FrameError::InvalidHex));
    }

    #[test]
    fn test_from_hex_accepts_spaced_pairs() {
        let spaced = Frame::from_hex("04 bd 01 01 01").unwrap();
        let packed = Frame::from_hex("04bd010101").unwrap();
        assert_eq!(spaced, packed);
        assert_eq!(spaced.as_bytes(), &[0x04, 0xBD, 0x01, 0x01, 0x01]);
        assert_eq!(Frame::from_hex("  0121\t").unwrap().type_byte(), 0x21);
        assert_eq!(Frame::from_hex("04bd 0101 01").unwrap(), packed);
    }

    #[test]
    fn test_escaped_checksum_roundtrip() {
        // Find a payload whose body or checksum needs escaping
        let frame = Frame::new(0x04, &[0x7E, 0x7D, 0x00]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        assert!(encoded.len() > 1 + frame.len() + CHECKSUM_SIZE);
        assert_eq!(encoded.iter().filter(|&&b| b == FRAME_START).count(), 1);

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded).unwrap(), Some(frame));
    }

    #[test]
    fn test_parser_invalid_checksum() {
        let mut wire = DISARM_WIRE;
        wire[7] ^= 0xFF;

        let mut parser = FrameParser::new();
        let result = parser.feed_bytes(&wire);
        assert!(matches!(result, Err(FrameError::InvalidChecksum { .. })));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_parser_reports_garbage_before_start() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(0x42), Err(FrameError::UnexpectedByte(0x42)));
        assert!(parser.is_idle());
        // Still usable afterwards
        assert!(parser.feed_bytes(&DISARM_WIRE).unwrap().is_some());
    }

    #[test]
    fn test_parser_bad_escape() {
        let mut parser = FrameParser::new();
        let result = parser.feed_bytes(&[0x7E, 0x02, 0x7D, 0x11]);
        assert_eq!(result, Err(FrameError::InvalidEscape(0x11)));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_parser_truncated_by_new_delimiter() {
        let mut parser = FrameParser::new();
        // Length claims 10 bytes, only 4 follow, then a new frame starts
        assert_eq!(parser.feed_bytes(&[0x7E, 0x0A, 0x04, 0x00, 0x01, 0x02]), Ok(None));
        assert!(!parser.is_idle());
        assert_eq!(parser.feed(FRAME_START), Err(FrameError::Truncated));
        // The new delimiter opened the next frame
        assert_eq!(parser.feed_bytes(&DISARM_WIRE[1..]).unwrap().unwrap().length(), 4);
    }

    #[test]
    fn test_parser_zero_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&[0x7E, 0x00]), Err(FrameError::InvalidLength));
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        let result = Frame::new(0x21, &large_payload);
        assert_eq!(result, Err(FrameError::PayloadTooLarge));
        assert!(Frame::new(0x21, &large_payload[1..]).is_ok());
    }

    #[test]
    fn test_encode_into_slice() {
        let frame = Frame::from_hex("04bd010101").unwrap();
        let mut buffer = [0u8; 8];
        assert_eq!(frame.encode(&mut buffer), Ok(8));
        assert_eq!(buffer, DISARM_WIRE);

        let mut short = [0u8; 4];
        assert_eq!(frame.encode(&mut short), Err(FrameError::BufferTooSmall));
    }

    proptest! {
        #[test]
        fn prop_build_then_parse(type_byte in any::<u8>(),
                                 payload in proptest::collection::vec(any::<u8>(), 0..32)) {
            let frame = Frame::new(type_byte, &payload).unwrap();
            let encoded = frame.encode_to_vec().unwrap();
            let mut parser = FrameParser::new();
            prop_assert_eq!(parser.feed_bytes(&encoded).unwrap(), Some(frame));
        }

        #[test]
        fn prop_corrupted_body_rejected(payload in proptest::collection::vec(0u8..0x7D, 1..16),
                                        index in any::<proptest::sample::Index>(),
                                        delta in 1u8..0x40) {
            // Payload bytes below 0x7D keep the encoding free of escapes, so
            // each wire byte maps to exactly one body byte
            let frame = Frame::new(0x04, &payload).unwrap();
            let encoded = frame.encode_to_vec().unwrap();
            prop_assume!(!encoded[1..].contains(&ESCAPE));

            // Corrupt a payload byte (skip delimiter, length and type)
            let i = 3 + index.index(payload.len());
            let mut corrupted = encoded.clone();
            corrupted[i] = corrupted[i].wrapping_add(delta);
            prop_assume!(corrupted[i] != FRAME_START && corrupted[i] != ESCAPE);

            let mut parser = FrameParser::new();
            let result = parser.feed_bytes(&corrupted);
            let rejected = matches!(result, Err(FrameError::InvalidChecksum { .. }));
            prop_assert!(rejected);
        }
    }
}
