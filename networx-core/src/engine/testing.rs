//! In-memory serial port and clock for engine tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use networx_hal::{Clock, DelayNs, UartConfig, UartRx, UartTx};
use networx_protocol::{Frame, FrameParser};

use crate::host::PortOpener;

#[derive(Debug, Default)]
pub struct MockState {
    pub rx: VecDeque<u8>,
    pub written: Vec<Vec<u8>>,
    /// Bytes made readable after each write, in order
    pub replies: VecDeque<Vec<u8>>,
    pub discards: usize,
    pub flushes: usize,
}

/// Shared handle: clones see the same buffers
#[derive(Debug, Clone, Default)]
pub struct MockUart {
    pub state: Rc<RefCell<MockState>>,
}

pub fn encoded(frame: &Frame) -> Vec<u8> {
    frame.encode_to_vec().unwrap().to_vec()
}

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make raw bytes readable now
    pub fn push_bytes(&self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    /// Make a frame readable now
    pub fn push_frame(&self, frame: &Frame) {
        self.push_bytes(&encoded(frame));
    }

    /// Answer the next write with `frame`
    pub fn reply_with(&self, frame: &Frame) {
        self.state.borrow_mut().replies.push_back(encoded(frame));
    }

    /// Answer the next write with nothing
    pub fn reply_silence(&self) {
        self.state.borrow_mut().replies.push_back(Vec::new());
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().rx.len()
    }

    pub fn discards(&self) -> usize {
        self.state.borrow().discards
    }

    /// Every write parsed back into frames
    pub fn written_frames(&self) -> Vec<Frame> {
        let state = self.state.borrow();
        state
            .written
            .iter()
            .filter_map(|bytes| FrameParser::new().feed_bytes(bytes).ok().flatten())
            .collect()
    }

    /// Type bytes of every write, in order
    pub fn written_types(&self) -> Vec<u8> {
        self.written_frames().iter().map(Frame::type_byte).collect()
    }
}

impl UartTx for MockUart {
    type Error = Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Infallible> {
        let mut state = self.state.borrow_mut();
        state.written.push(data.to_vec());
        if let Some(reply) = state.replies.pop_front() {
            state.rx.extend(reply);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl UartRx for MockUart {
    type Error = Infallible;

    fn bytes_pending(&mut self) -> Result<usize, Infallible> {
        Ok(self.state.borrow().rx.len())
    }

    fn read_byte_timeout(&mut self, _timeout_ms: u32) -> Result<Option<u8>, Infallible> {
        Ok(self.state.borrow_mut().rx.pop_front())
    }

    fn discard_input(&mut self) -> Result<(), Infallible> {
        let mut state = self.state.borrow_mut();
        state.rx.clear();
        state.discards += 1;
        Ok(())
    }
}

/// Opens a fixed mock port, or fails
#[derive(Debug, Default)]
pub struct MockOpener {
    pub port: MockUart,
    pub fail: bool,
    pub opened: Vec<(String, UartConfig)>,
}

impl PortOpener for MockOpener {
    type Port = MockUart;
    type Error = String;

    fn open_port(&mut self, port_id: &str, config: &UartConfig) -> Result<MockUart, String> {
        self.opened.push((port_id.to_owned(), *config));
        if self.fail {
            Err(format!("{port_id}: no such device"))
        } else {
            Ok(self.port.clone())
        }
    }
}

/// Clock that only moves when slept on or advanced
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ns: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ns.set(self.now_ns.get() + ms * 1_000_000);
    }
}

impl DelayNs for ManualClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns.set(self.now_ns.get() + u64::from(ns));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ns.get() / 1_000_000
    }
}
