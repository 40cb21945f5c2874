//! Bus device addresses reported in log events

/// Reported for addresses with no documented module
pub const NO_SUCH_DEVICE: &str = "No such device";

/// Module at a bus address
pub fn describe(address: u8) -> String {
    match address {
        0 => "Security Panel".to_owned(),
        16..=21 => hardwired_expander(17 + 8 * u16::from(address - 16)),
        23 => hardwired_expander(9),
        24..=31 => format!(
            "Relay Expander NX-507E or Output Expander NX-508E (module {})",
            address - 23
        ),
        // Receivers 6-8 sit below receivers 1-5 on the bus
        32..=34 => wireless_receiver(address - 26),
        35..=39 => wireless_receiver(address - 34),
        84..=91 => format!("Remote Power Supply NX-320E (module {})", address - 83),
        96..=111 => hardwired_expander(65 + 8 * u16::from(address - 96)),
        192..=255 => format!("Keypad ({})", (address - 192) / 8 + 1),
        _ => NO_SUCH_DEVICE.to_owned(),
    }
}

fn hardwired_expander(start_zone: u16) -> String {
    format!("Hardwired Expander NX-216E (start zone {start_zone:02})")
}

fn wireless_receiver(module: u8) -> String {
    format!("Wireless Receiver NX-448E (module {module})")
}
