//! Frame reader and writer over the serial port
//!
//! The link is the only code that touches the port. Reads come in two
//! modes: non-blocking, which returns at once when nothing is pending, and
//! blocking, which waits up to the reply timeout for a response.
//!
//! A framing error discards everything buffered on the port rather than
//! hunting byte by byte for the next delimiter. A checksum error drops the
//! frame but leaves the buffer alone.

use log::{error, trace};
use networx_hal::Uart;
use networx_protocol::{ControlReply, Frame, FrameError, FrameParser};

use crate::error::LinkError;

/// How long a read may wait for its first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Return `None` when no byte is pending
    NonBlocking,
    /// Wait up to the reply timeout; silence is [`LinkError::Timeout`]
    Blocking,
}

pub struct Link<U> {
    port: U,
    parser: FrameParser,
    reply_timeout_ms: u32,
}

impl<U: Uart> Link<U> {
    pub fn new(port: U, reply_timeout_ms: u32) -> Self {
        Self {
            port,
            parser: FrameParser::new(),
            reply_timeout_ms,
        }
    }

    /// Read one complete, checksum-verified frame
    pub fn read_frame(&mut self, mode: ReadMode) -> Result<Option<Frame>, LinkError> {
        if mode == ReadMode::NonBlocking
            && self.port.bytes_pending().map_err(LinkError::port)? == 0
        {
            return Ok(None);
        }

        self.parser.reset();
        let Some(first) = self.read_byte()? else {
            return match mode {
                ReadMode::NonBlocking => Ok(None),
                ReadMode::Blocking => Err(LinkError::Timeout(self.reply_timeout_ms)),
            };
        };
        let mut next = Some(first);

        loop {
            let Some(byte) = next else {
                return Err(self.discard(FrameError::Truncated));
            };
            match self.parser.feed(byte) {
                Ok(Some(frame)) => {
                    trace!("read {}", frame);
                    return Ok(Some(frame));
                }
                Ok(None) => next = self.read_byte()?,
                Err(e @ FrameError::InvalidChecksum { .. }) => {
                    error!("checksum error, message discarded: {}", e);
                    self.parser.reset();
                    return Err(e.into());
                }
                Err(e) => return Err(self.discard(e)),
            }
        }
    }

    /// Frame, stuff and send
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), LinkError> {
        let bytes = frame.encode_to_vec()?;
        trace!("write {}", frame);
        self.port.write_blocking(&bytes).map_err(LinkError::port)?;
        self.port.flush().map_err(LinkError::port)
    }

    pub fn send_reply(&mut self, reply: ControlReply) -> Result<(), LinkError> {
        self.write_frame(&reply.to_frame())
    }

    /// Drop whatever the port has buffered, e.g. before the first read
    pub fn flush_input(&mut self) -> Result<(), LinkError> {
        self.parser.reset();
        self.port.discard_input().map_err(LinkError::port)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, LinkError> {
        self.port
            .read_byte_timeout(self.reply_timeout_ms)
            .map_err(LinkError::port)
    }

    /// Drop buffered input after a framing error
    fn discard(&mut self, cause: FrameError) -> LinkError {
        error!("framing error, flushing input: {}", cause);
        self.parser.reset();
        match self.port.discard_input() {
            Ok(()) => LinkError::Framing(cause),
            Err(e) => LinkError::port(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{encoded, MockUart};
    use proptest::prelude::*;

    fn disarm() -> Frame {
        Frame::new(0xBD, &[0x01, 0x01, 0x01]).unwrap()
    }

    #[test]
    fn test_non_blocking_returns_none_when_idle() {
        let mut link = Link::new(MockUart::new(), 3000);
        assert!(link.read_frame(ReadMode::NonBlocking).unwrap().is_none());
    }

    #[test]
    fn test_blocking_silence_is_timeout() {
        let mut link = Link::new(MockUart::new(), 3000);
        assert!(matches!(
            link.read_frame(ReadMode::Blocking),
            Err(LinkError::Timeout(3000))
        ));
    }

    #[test]
    fn test_golden_disarm_round_trip() {
        let port = MockUart::new();
        port.push_bytes(&[0x7E, 0x04, 0xBD, 0x01, 0x01, 0x01, 0xC4, 0x11]);
        let mut link = Link::new(port, 3000);
        let frame = link.read_frame(ReadMode::NonBlocking).unwrap().unwrap();
        assert_eq!(frame.as_bytes(), &[0x04, 0xBD, 0x01, 0x01, 0x01]);
        assert_eq!(frame, disarm());
    }

    #[test]
    fn test_write_frame_is_stuffed_and_checksummed() {
        let port = MockUart::new();
        let mut link = Link::new(port.clone(), 3000);
        link.write_frame(&disarm()).unwrap();
        assert_eq!(
            port.state.borrow().written[0],
            vec![0x7E, 0x04, 0xBD, 0x01, 0x01, 0x01, 0xC4, 0x11]
        );
        assert_eq!(port.state.borrow().flushes, 1);
    }

    #[test]
    fn test_control_reply_goes_through_writer() {
        let port = MockUart::new();
        let mut link = Link::new(port.clone(), 3000);
        link.send_reply(ControlReply::Can).unwrap();
        assert_eq!(port.written_types(), vec![0x1F]);
        assert_eq!(port.state.borrow().written[0], encoded(&Frame::empty(0x1F)));
    }

    #[test]
    fn test_stray_byte_flushes_input() {
        let port = MockUart::new();
        port.push_bytes(&[0x41, 0x7E, 0x01, 0x1D]);
        let mut link = Link::new(port.clone(), 3000);
        assert!(matches!(
            link.read_frame(ReadMode::NonBlocking),
            Err(LinkError::Framing(FrameError::UnexpectedByte(0x41)))
        ));
        assert_eq!(port.discards(), 1);
        assert_eq!(port.pending(), 0);
    }

    #[test]
    fn test_truncated_frame_is_framing_error_not_hang() {
        let port = MockUart::new();
        // length claims 10 bytes, four follow
        port.push_bytes(&[0x7E, 0x0A, 0x04, 0x00, 0x01, 0x02]);
        let mut link = Link::new(port.clone(), 3000);
        assert!(matches!(
            link.read_frame(ReadMode::NonBlocking),
            Err(LinkError::Framing(FrameError::Truncated))
        ));
        assert_eq!(port.discards(), 1);
    }

    #[test]
    fn test_checksum_error_discards_frame_only() {
        let port = MockUart::new();
        port.push_bytes(&[0x7E, 0x04, 0xBD, 0x01, 0x01, 0x01, 0xC4, 0x12]);
        port.push_frame(&Frame::empty(0x1D));
        let mut link = Link::new(port.clone(), 3000);
        assert!(matches!(
            link.read_frame(ReadMode::NonBlocking),
            Err(LinkError::Checksum { .. })
        ));
        assert_eq!(port.discards(), 0);
        let next = link.read_frame(ReadMode::NonBlocking).unwrap().unwrap();
        assert_eq!(next.type_byte(), 0x1D);
    }

    #[test]
    fn test_bad_escape_flushes() {
        let port = MockUart::new();
        port.push_bytes(&[0x7E, 0x01, 0x7D, 0x41, 0x00, 0x00]);
        let mut link = Link::new(port.clone(), 3000);
        assert!(matches!(
            link.read_frame(ReadMode::Blocking),
            Err(LinkError::Framing(FrameError::InvalidEscape(0x41)))
        ));
        assert_eq!(port.pending(), 0);
    }

    proptest! {
        #[test]
        fn prop_arbitrary_input_always_drains(data in proptest::collection::vec(any::<u8>(), 0..96)) {
            let port = MockUart::new();
            port.push_bytes(&data);
            let mut link = Link::new(port.clone(), 3000);
            // every read consumes at least one byte or reports idle
            for _ in 0..=data.len() {
                if let Ok(None) = link.read_frame(ReadMode::NonBlocking) {
                    break;
                }
            }
            prop_assert_eq!(port.pending(), 0);
        }
    }
}
