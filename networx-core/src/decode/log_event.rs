//! Log Event Message (0x0A)

use networx_protocol::Frame;

use super::byte_at;
use crate::catalog::log_event::{self as events, SpecialEvent, SubjectKind};
use crate::error::DecodeError;

const LOG_EVENT: &str = "Log Event Message";

/// One entry from the panel event log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEvent {
    /// Position in the panel log
    pub event_number: u8,
    pub log_size: u8,
    pub event_type: u8,
    /// Zone, user or device, 1-based
    pub subject: u16,
    /// 1-based
    pub partition: u16,
}

impl LogEvent {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        Ok(Self {
            event_number: byte_at(frame, 2, LOG_EVENT)?,
            log_size: byte_at(frame, 3, LOG_EVENT)?,
            event_type: byte_at(frame, 4, LOG_EVENT)?,
            subject: u16::from(byte_at(frame, 5, LOG_EVENT)?) + 1,
            partition: u16::from(byte_at(frame, 6, LOG_EVENT)?) + 1,
        })
    }

    pub fn description(&self) -> &'static str {
        events::description(self.event_type)
    }

    pub fn subject_kind(&self) -> SubjectKind {
        events::subject_kind(self.event_type)
    }

    pub fn partition_valid(&self) -> bool {
        events::partition_valid(self.event_type)
    }

    pub fn special(&self) -> Option<SpecialEvent> {
        SpecialEvent::from_type(self.event_type)
    }

    /// Raw bus address of the reporting device
    pub fn device_address(&self) -> u8 {
        (self.subject - 1) as u8
    }

    /// Event type zero on a zone is an intrusion
    pub fn is_zone_alarm(&self) -> bool {
        self.event_type == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(payload: &[u8]) -> Frame {
        crate::decode::frame(0x0A, payload)
    }

    #[test]
    fn test_zone_alarm_event() {
        let event = LogEvent::decode(&frame(&[0x07, 0xBA, 0x00, 0x0B, 0x00])).unwrap();
        assert_eq!(event.event_number, 7);
        assert_eq!(event.log_size, 0xBA);
        assert_eq!(event.subject, 12);
        assert_eq!(event.partition, 1);
        assert_eq!(event.subject_kind(), SubjectKind::Zone);
        assert!(event.is_zone_alarm());
        assert!(event.partition_valid());
    }

    #[test]
    fn test_subject_byte_ff_does_not_wrap() {
        let event = LogEvent::decode(&frame(&[0x01, 0xBA, 0xC0, 0xFF, 0xFF])).unwrap();
        assert_eq!(event.subject, 256);
        assert_eq!(event.device_address(), 0xFF);
        assert_eq!(event.description(), events::NO_SUCH_EVENT);
    }

    #[test]
    fn test_special_event() {
        let event = LogEvent::decode(&frame(&[0x01, 0xBA, 169, 0xC0, 0x00])).unwrap();
        assert_eq!(event.special(), Some(SpecialEvent::Armed));
        assert_eq!(event.device_address(), 0xC0);
    }

    #[test]
    fn test_truncated_event() {
        assert!(matches!(
            LogEvent::decode(&frame(&[0x01, 0xBA, 0x00, 0x0B])),
            Err(DecodeError::Truncated { index: 6, .. })
        ));
    }
}
