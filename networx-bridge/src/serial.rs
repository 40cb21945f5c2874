//! OS serial port behind the HAL traits

use std::io::{self, Read, Write};
use std::time::Duration;

use networx_core::PortOpener;
use networx_hal::uart::{DataBits, Parity, StopBits};
use networx_hal::{UartConfig, UartRx, UartTx};
use serialport::{ClearBuffer, SerialPort};

/// An opened port; the read timeout is switched per call
pub struct SerialUart {
    port: Box<dyn SerialPort>,
    timeout_ms: u32,
}

impl SerialUart {
    fn new(port: Box<dyn SerialPort>, timeout_ms: u32) -> Self {
        Self { port, timeout_ms }
    }

    fn set_timeout(&mut self, timeout_ms: u32) -> io::Result<()> {
        if timeout_ms != self.timeout_ms {
            self.port
                .set_timeout(Duration::from_millis(u64::from(timeout_ms)))?;
            self.timeout_ms = timeout_ms;
        }
        Ok(())
    }
}

impl UartTx for SerialUart {
    type Error = io::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}

impl UartRx for SerialUart {
    type Error = io::Error;

    fn bytes_pending(&mut self) -> Result<usize, Self::Error> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_byte_timeout(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error> {
        self.set_timeout(timeout_ms)?;
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Ok(Some(byte[0])),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn discard_input(&mut self) -> Result<(), Self::Error> {
        Ok(self.port.clear(ClearBuffer::Input)?)
    }
}

/// Opens ports through the `serialport` crate
#[derive(Debug, Default)]
pub struct SerialOpener;

impl PortOpener for SerialOpener {
    type Port = SerialUart;
    type Error = serialport::Error;

    fn open_port(&mut self, port_id: &str, config: &UartConfig) -> Result<SerialUart, Self::Error> {
        let port = serialport::new(port_id, config.baudrate)
            .data_bits(data_bits(config.data_bits))
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits))
            .timeout(Duration::from_millis(u64::from(config.read_timeout_ms)))
            .open()?;
        Ok(SerialUart::new(port, config.read_timeout_ms))
    }
}

fn data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

fn stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}

/// One line per port for `--list-ports`
pub fn describe_ports() -> serialport::Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|p| match p.port_type {
            serialport::SerialPortType::UsbPort(info) => format!(
                "{} (usb vid={:04x} pid={:04x} {})",
                p.port_name,
                info.vid,
                info.pid,
                info.product.as_deref().unwrap_or("")
            ),
            serialport::SerialPortType::PciPort => format!("{} (pci)", p.port_name),
            serialport::SerialPortType::BluetoothPort => format!("{} (bluetooth)", p.port_name),
            serialport::SerialPortType::Unknown => p.port_name,
        })
        .collect())
}
