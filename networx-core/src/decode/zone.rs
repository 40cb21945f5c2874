//! Zone Name (0x03), Zone Status (0x04) and Zones Snapshot (0x05)

use networx_protocol::requests::{SNAPSHOT_BLOCKS, ZONES_PER_SNAPSHOT_BLOCK};
use networx_protocol::tables::ZONE_STATUS_TABLES;
use networx_protocol::{bit_map, decode_tables, FlagByte, Frame};

use super::{byte_at, field_count, one_based};
use crate::catalog::zone_group::{self, ZoneGroupMatch};
use crate::error::DecodeError;

const ZONE_NAME: &str = "Zone Name Message";
const ZONE_STATUS: &str = "Zone Status Message";
const ZONES_SNAPSHOT: &str = "Zones Snapshot Message";

const NAME_START: usize = 3;
const NAME_LEN: usize = 16;

/// Zone name as programmed in the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneName {
    pub zone: u16,
    pub name: String,
}

impl ZoneName {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let zone = u16::from(one_based(frame, 2, ZONE_NAME)?);
        let raw = bit_map(frame.as_bytes(), NAME_START, NAME_LEN).map_err(field_count(ZONE_NAME))?;
        let name = String::from_utf8_lossy(raw)
            .trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
            .to_owned();
        Ok(Self { zone, name })
    }
}

/// Summary of condition flag byte 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneState {
    Normal,
    Triggered,
    Tampered,
    Trouble,
    Bypassed,
    Inhibited,
    LowBattery,
    SupervisionLoss,
    /// More than one condition at once
    MultipleChanges,
}

impl ZoneState {
    pub fn from_condition(raw: u8) -> Self {
        match raw {
            0x00 => ZoneState::Normal,
            0x01 => ZoneState::Triggered,
            0x02 => ZoneState::Tampered,
            0x04 => ZoneState::Trouble,
            0x08 => ZoneState::Bypassed,
            0x10 => ZoneState::Inhibited,
            0x20 => ZoneState::LowBattery,
            0x40 => ZoneState::SupervisionLoss,
            _ => ZoneState::MultipleChanges,
        }
    }

    /// Host state key
    pub fn key(self) -> &'static str {
        match self {
            ZoneState::Normal => "normal",
            ZoneState::Triggered => "triggered",
            ZoneState::Tampered => "tampered",
            ZoneState::Trouble => "trouble",
            ZoneState::Bypassed => "bypassed",
            ZoneState::Inhibited => "inhibited",
            ZoneState::LowBattery => "lowBattery",
            ZoneState::SupervisionLoss => "supervisionLoss",
            ZoneState::MultipleChanges => "multipleChanges",
        }
    }
}

/// Full status of one zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneStatus {
    pub zone: u16,
    /// Partition mask, type flags 1-3, condition flags 1-2
    pub flags: [FlagByte; 6],
}

impl ZoneStatus {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let zone = u16::from(one_based(frame, 2, ZONE_STATUS)?);
        let flags = decode_tables(frame.as_bytes(), 3, ZONE_STATUS_TABLES, &[])
            .map_err(field_count(ZONE_STATUS))?;
        Ok(Self { zone, flags })
    }

    pub fn partition_mask(&self) -> FlagByte {
        self.flags[0]
    }

    pub fn type_flags(&self) -> &[FlagByte] {
        &self.flags[1..4]
    }

    pub fn condition_flags(&self) -> &[FlagByte] {
        &self.flags[4..]
    }

    /// Type flags packed for zone group lookup
    pub fn fingerprint(&self) -> u32 {
        zone_group::fingerprint(self.flags[1].raw(), self.flags[2].raw(), self.flags[3].raw())
    }

    pub fn zone_group(&self) -> ZoneGroupMatch {
        zone_group::classify(self.fingerprint())
    }

    pub fn state(&self) -> ZoneState {
        ZoneState::from_condition(self.flags[4].raw())
    }
}

/// Four-bit summary of one zone in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneSnapshotFlags {
    pub triggered: bool,
    pub bypass: bool,
    pub trouble: bool,
    pub alarm_memory: bool,
}

impl ZoneSnapshotFlags {
    pub fn from_nibble(nibble: u8) -> Self {
        Self {
            triggered: nibble & 0x01 != 0,
            bypass: nibble & 0x02 != 0,
            trouble: nibble & 0x04 != 0,
            alarm_memory: nibble & 0x08 != 0,
        }
    }

    /// Host state keys with their values
    pub fn states(&self) -> [(&'static str, bool); 4] {
        [
            ("triggered", self.triggered),
            ("bypass", self.bypass),
            ("trouble", self.trouble),
            ("alarmMemory", self.alarm_memory),
        ]
    }
}

/// Sixteen zones starting at `16 * block + 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonesSnapshot {
    pub block: u8,
    pub zones: Vec<(u16, ZoneSnapshotFlags)>,
}

impl ZonesSnapshot {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let block = byte_at(frame, 2, ZONES_SNAPSHOT)?;
        if block >= SNAPSHOT_BLOCKS {
            return Err(DecodeError::InvalidValue {
                message: ZONES_SNAPSHOT,
                index: 2,
                value: block,
            });
        }
        let data = bit_map(frame.as_bytes(), 3, 8).map_err(field_count(ZONES_SNAPSHOT))?;
        let first = u16::from(block) * ZONES_PER_SNAPSHOT_BLOCK + 1;
        let zones = data
            .iter()
            .flat_map(|&byte| [byte & 0x0F, byte >> 4])
            .enumerate()
            .map(|(offset, nibble)| (first + offset as u16, ZoneSnapshotFlags::from_nibble(nibble)))
            .collect();
        Ok(Self { block, zones })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::frame;
    use networx_protocol::Field;

    #[test]
    fn test_zone_name_is_trimmed_and_one_based() {
        let mut payload = vec![0x00];
        payload.extend_from_slice(b"Front Door      ");
        let name = ZoneName::decode(&frame(0x03, &payload)).unwrap();
        assert_eq!(name.zone, 1);
        assert_eq!(name.name, "Front Door");
    }

    #[test]
    fn test_zone_name_needs_sixteen_characters() {
        let mut payload = vec![0x04];
        payload.extend_from_slice(b"Short");
        assert!(matches!(
            ZoneName::decode(&frame(0x03, &payload)),
            Err(DecodeError::FieldCount { message: ZONE_NAME, .. })
        ));
    }

    #[test]
    fn test_zone_zero_surfaces_as_zone_one() {
        let status =
            ZoneStatus::decode(&frame(0x04, &[0x00, 0x01, 0x10, 0x1b, 0xf0, 0x00, 0x00])).unwrap();
        assert_eq!(status.zone, 1);
        assert_eq!(status.state(), ZoneState::Normal);
    }

    #[test]
    fn test_zone_status_fields() {
        // zone 12, partition 1, entry/exit delay 1 group, faulted
        let status =
            ZoneStatus::decode(&frame(0x04, &[0x0B, 0x01, 0x10, 0x1b, 0xf0, 0x01, 0x01])).unwrap();
        assert_eq!(status.zone, 12);
        assert!(status.partition_mask().is_set(Field::Partition1));
        assert!(status.condition_flags()[0].is_set(Field::FaultedOrDelayedTrip));
        assert!(status.condition_flags()[1].is_set(Field::AlarmMemoryCondition));
        assert_eq!(status.fingerprint(), 0x101bf0);
        assert_eq!(status.state(), ZoneState::Triggered);
        assert!(status.zone_group().is_match());
    }

    #[test]
    fn test_zone_state_from_condition() {
        assert_eq!(ZoneState::from_condition(0x08), ZoneState::Bypassed);
        assert_eq!(ZoneState::from_condition(0x40).key(), "supervisionLoss");
        assert_eq!(ZoneState::from_condition(0x09), ZoneState::MultipleChanges);
        assert_eq!(ZoneState::from_condition(0x01).key(), "triggered");
    }

    #[test]
    fn test_zone_status_short_message() {
        assert!(matches!(
            ZoneStatus::decode(&frame(0x04, &[0x00, 0x01, 0x10])),
            Err(DecodeError::FieldCount { message: ZONE_STATUS, .. })
        ));
    }

    #[test]
    fn test_snapshot_low_nibble_is_first_zone() {
        let frame = frame(0x05, &[0x01, 0x81, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x26]);
        let snapshot = ZonesSnapshot::decode(&frame).unwrap();
        assert_eq!(snapshot.block, 1);
        assert_eq!(snapshot.zones.len(), 16);
        assert_eq!(snapshot.zones[0].0, 17);
        assert!(snapshot.zones[0].1.triggered);
        assert!(snapshot.zones[1].1.alarm_memory);
        assert!(!snapshot.zones[1].1.triggered);
        assert_eq!(snapshot.zones[15].0, 32);
        assert_eq!(
            snapshot.zones[14].1,
            ZoneSnapshotFlags {
                bypass: true,
                trouble: true,
                ..Default::default()
            }
        );
        assert!(snapshot.zones[15].1.bypass);
    }

    #[test]
    fn test_snapshot_block_out_of_range() {
        let frame = frame(0x05, &[12, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            ZonesSnapshot::decode(&frame),
            Err(DecodeError::InvalidValue { value: 12, .. })
        ));
    }
}
