//! Bit tables: mapping payload bytes to named flags
//!
//! A [`BitTable`] names the eight bits of one payload byte, most
//! significant bit first. Reserved bits keep their slot as `None`, so a
//! table is always exactly eight entries long.

use core::fmt;

use heapless::Vec;

use crate::fields::Field;

/// Names for the bits of one byte, index 0 = bit 7
#[derive(Debug, PartialEq, Eq)]
pub struct BitTable {
    /// Name of the byte in the panel documentation
    pub name: &'static str,
    /// Field per bit, MSB first; `None` for reserved bits
    pub slots: [Option<Field>; 8],
}

impl BitTable {
    /// Bit position (7..=0) of `field` in this table
    pub fn bit_of(&self, field: Field) -> Option<u8> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(field))
            .map(|index| 7 - index as u8)
    }

    /// Named fields in slot order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }
}

/// Payload region did not contain the bytes a table set needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitMapError {
    pub start: usize,
    pub count: usize,
    pub available: usize,
}

impl fmt::Display for BitMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "need {} bytes from index {}, message has {}",
            self.count, self.start, self.available
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitMapError {}

/// Select `count` bytes of `body` from `start`
///
/// Fails when `count > body.len() - start`, i.e. the message is shorter
/// than the tables applied to it expect.
pub fn bit_map(body: &[u8], start: usize, count: usize) -> Result<&[u8], BitMapError> {
    let end = start.checked_add(count);
    match end {
        Some(end) if end <= body.len() => Ok(&body[start..end]),
        _ => Err(BitMapError {
            start,
            count,
            available: body.len(),
        }),
    }
}

/// One payload byte interpreted through its table
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FlagByte {
    table: &'static BitTable,
    raw: u8,
}

impl FlagByte {
    pub fn new(table: &'static BitTable, raw: u8) -> Self {
        Self { table, raw }
    }

    /// The raw byte
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// The table this byte is read through
    pub fn table(&self) -> &'static BitTable {
        self.table
    }

    /// Value of `field`, or `None` if the table does not name it
    pub fn get(&self, field: Field) -> Option<bool> {
        self.table
            .bit_of(field)
            .map(|bit| self.raw & (1 << bit) != 0)
    }

    /// Whether `field` is present and set
    pub fn is_set(&self, field: Field) -> bool {
        self.get(field).unwrap_or(false)
    }

    /// Every named field with its value, MSB first
    pub fn iter(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        self.table
            .slots
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| {
                slot.map(|field| (field, self.raw & (0x80 >> index) != 0))
            })
    }

    /// Named fields paired with their values
    pub fn to_vec(&self) -> Vec<(Field, bool), 8> {
        self.iter().collect()
    }
}

impl fmt::Debug for FlagByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.table.name, BitString(self.raw))
    }
}

/// A byte formatted as eight '0'/'1' characters, MSB first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitString(pub u8);

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

/// Read `tables.len()` consecutive bytes from `start` through `tables`
///
/// Entries of `skip` (offsets relative to `start`) are bytes that carry
/// no flags and do not consume a table.
pub fn decode_tables<const N: usize>(
    body: &[u8],
    start: usize,
    tables: [&'static BitTable; N],
    skip: &[usize],
) -> Result<[FlagByte; N], BitMapError> {
    let region = bit_map(body, start, N + skip.len())?;
    let mut bytes = region
        .iter()
        .enumerate()
        .filter(|(offset, _)| !skip.contains(offset))
        .map(|(_, &b)| b);
    Ok(tables.map(|table| FlagByte::new(table, bytes.next().unwrap_or(0))))
}
