//! Partition Status (0x06) and Partitions Snapshot (0x07)

use networx_protocol::tables::{PARTITION_SNAPSHOT_FLAGS, PARTITION_STATUS_TABLES};
use networx_protocol::{decode_tables, Field, FlagByte, Frame};

use super::{byte_at, field_count, one_based};
use crate::error::DecodeError;

const PARTITION_STATUS: &str = "Partition Status Message";
const PARTITIONS_SNAPSHOT: &str = "Partitions Snapshot Message";

/// Condition flags start here; the byte at offset 4 is the last user
const FLAGS_START: usize = 3;
const LAST_USER_INDEX: usize = 7;

/// Full status of one partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionStatus {
    pub partition: u8,
    /// User that last armed or disarmed, as the panel numbers it
    pub last_user: u8,
    pub flags: [FlagByte; 6],
}

impl PartitionStatus {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let partition = one_based(frame, 2, PARTITION_STATUS)?;
        let flags = decode_tables(
            frame.as_bytes(),
            FLAGS_START,
            PARTITION_STATUS_TABLES,
            &[LAST_USER_INDEX - FLAGS_START],
        )
        .map_err(field_count(PARTITION_STATUS))?;
        let last_user = byte_at(frame, LAST_USER_INDEX, PARTITION_STATUS)?;
        Ok(Self {
            partition,
            last_user,
            flags,
        })
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.flags.iter().any(|flags| flags.is_set(field))
    }
}

/// One snapshot byte for each of the eight partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionsSnapshot {
    pub partitions: [FlagByte; 8],
}

impl PartitionsSnapshot {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let partitions = decode_tables(frame.as_bytes(), 2, [&PARTITION_SNAPSHOT_FLAGS; 8], &[])
            .map_err(field_count(PARTITIONS_SNAPSHOT))?;
        Ok(Self { partitions })
    }

    /// Partition numbers paired with their flags
    pub fn iter(&self) -> impl Iterator<Item = (u8, &FlagByte)> + '_ {
        (1u8..).zip(self.partitions.iter())
    }

    /// Partition 1's byte, which drives the keypad display
    pub fn display_byte(&self) -> u8 {
        self.partitions[0].raw()
    }
}
