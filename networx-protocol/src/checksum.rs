//! Fletcher-16 checksum, modulo 255 variant.
//!
//! Computed over `[length, type, payload...]` before escaping and
//! appended little-endian (`sum1` first, then `sum2`).

/// Size of the checksum trailer in bytes
pub const CHECKSUM_SIZE: usize = 2;

/// The two running sums of a Fletcher-16 checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Checksum {
    pub sum1: u8,
    pub sum2: u8,
}

impl Checksum {
    /// Rebuild from the two trailer bytes as received
    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self {
            sum1: bytes[0],
            sum2: bytes[1],
        }
    }

    /// Trailer bytes in transmission order
    pub fn to_le_bytes(self) -> [u8; 2] {
        [self.sum1, self.sum2]
    }

    /// 16-bit value with `sum2` in the high byte
    pub fn value(self) -> u16 {
        u16::from_le_bytes(self.to_le_bytes())
    }
}

/// Compute the checksum of `data`
pub fn fletcher16(data: &[u8]) -> Checksum {
    let mut sum1: u16 = 0;
    let mut sum2: u16 = 0;
    for &byte in data {
        sum1 = (sum1 + u16::from(byte)) % 255;
        sum2 = (sum2 + sum1) % 255;
    }
    // Both sums are < 255 after the modulus
    Checksum {
        sum1: sum1 as u8,
        sum2: sum2 as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_zero_input() {
        assert_eq!(fletcher16(&[]), Checksum { sum1: 0, sum2: 0 });
        assert_eq!(fletcher16(&[0, 0, 0]), Checksum { sum1: 0, sum2: 0 });
    }

    #[test]
    fn test_disarm_command() {
        let sum = fletcher16(&[0x04, 0xBD, 0x01, 0x01, 0x01]);
        assert_eq!(sum.to_le_bytes(), [0xC4, 0x11]);
        assert_eq!(sum.value(), 0x11C4);
    }

    #[test]
    fn test_ack_frame() {
        assert_eq!(fletcher16(&[0x01, 0x1D]).to_le_bytes(), [0x1E, 0x1F]);
    }

    #[test]
    fn test_modulus_is_255() {
        // 0xFF is congruent to 0 modulo 255
        assert_eq!(fletcher16(&[0xFF]), Checksum { sum1: 0, sum2: 0 });
        assert_eq!(fletcher16(&[0xFF, 0x01]), Checksum { sum1: 1, sum2: 1 });
    }

    #[test]
    fn test_le_bytes_roundtrip() {
        let sum = Checksum { sum1: 0x12, sum2: 0x34 };
        assert_eq!(Checksum::from_le_bytes(sum.to_le_bytes()), sum);
    }

    proptest! {
        #[test]
        fn prop_deterministic(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(fletcher16(&data), fletcher16(&data));
        }

        #[test]
        fn prop_single_byte_change_detected(
            data in proptest::collection::vec(any::<u8>(), 1..32),
            index in any::<proptest::sample::Index>(),
            delta in 1u8..=254,
        ) {
            // Changing one byte by a non-multiple of 255 always moves sum1
            let i = index.index(data.len());
            let mut corrupted = data.clone();
            corrupted[i] = corrupted[i].wrapping_add(delta);
            prop_assume!((u16::from(data[i]) % 255) != (u16::from(corrupted[i]) % 255));
            prop_assert_ne!(fletcher16(&data), fletcher16(&corrupted));
        }
    }
}
