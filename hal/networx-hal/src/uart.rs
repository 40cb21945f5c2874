//! UART serial communication abstractions
//!
//! The panel interface is a half-duplex request/response link, so the
//! receive side is byte oriented: the frame reader pulls one byte at a
//! time and decides after each byte whether more are needed.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error: core::fmt::Debug;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written, the write timeout
    /// expires or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error: core::fmt::Debug;

    /// Number of received bytes waiting to be read
    ///
    /// Never blocks. Used by non-blocking reads to return early when the
    /// panel has nothing to say.
    fn bytes_pending(&mut self) -> Result<usize, Self::Error>;

    /// Read a single byte, waiting at most `timeout_ms`
    ///
    /// Returns `Ok(None)` when the timeout expires with no data.
    fn read_byte_timeout(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error>;

    /// Drop everything currently buffered on the receive side
    fn discard_input(&mut self) -> Result<(), Self::Error>;
}

/// Combined UART interface
///
/// For ports that provide both TX and RX over one handle.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Worst-case wait for a reply byte
    pub read_timeout_ms: u32,
    /// Maximum time a write may block
    pub write_timeout_ms: u32,
}

/// Interface module factory default
pub const DEFAULT_BAUDRATE: u32 = 38_400;

/// Panel processing time for the slowest request
pub const DEFAULT_READ_TIMEOUT_MS: u32 = 3_000;

/// Write timeout used when opening the port
pub const DEFAULT_WRITE_TIMEOUT_MS: u32 = 1_000;

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

impl UartConfig {
    /// Default 8N1 configuration at the given baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_panel_default() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 38_400);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.read_timeout_ms, 3_000);
    }

    #[test]
    fn test_with_baudrate_keeps_framing() {
        let config = UartConfig::with_baudrate(9_600);
        assert_eq!(config.baudrate, 9_600);
        assert_eq!(config.write_timeout_ms, DEFAULT_WRITE_TIMEOUT_MS);
    }
}
