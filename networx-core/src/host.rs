//! Host collaborator interface
//!
//! The engine never touches the automation host directly. It talks to a
//! [`Host`] implementation that owns device records, named variables,
//! speech and the user-facing log.

use core::fmt;
use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use networx_hal::{Uart, UartConfig};

/// Kind of host device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceKind {
    /// Interface module (firmware, enabled messages)
    Panel,
    /// Panel-wide status flags
    SystemStatus,
    Zone,
    Partition,
    User,
    Keypad,
}

impl DeviceKind {
    pub fn name(self) -> &'static str {
        match self {
            DeviceKind::Panel => "panel",
            DeviceKind::SystemStatus => "system status",
            DeviceKind::Zone => "zone",
            DeviceKind::Partition => "partition",
            DeviceKind::User => "user",
            DeviceKind::Keypad => "keypad",
        }
    }
}

/// A host device, addressed 1-based within its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId {
    pub kind: DeviceKind,
    pub address: u16,
}

impl DeviceId {
    pub const PANEL: DeviceId = DeviceId {
        kind: DeviceKind::Panel,
        address: 1,
    };

    pub const SYSTEM_STATUS: DeviceId = DeviceId {
        kind: DeviceKind::SystemStatus,
        address: 1,
    };

    pub fn zone(zone: u16) -> Self {
        Self {
            kind: DeviceKind::Zone,
            address: zone,
        }
    }

    pub fn partition(partition: u8) -> Self {
        Self {
            kind: DeviceKind::Partition,
            address: u16::from(partition),
        }
    }

    pub fn user(user: u8) -> Self {
        Self {
            kind: DeviceKind::User,
            address: u16::from(user),
        }
    }

    pub fn keypad(keypad: u8) -> Self {
        Self {
            kind: DeviceKind::Keypad,
            address: u16::from(keypad),
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.name(), self.address)
    }
}

/// A device state value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl StateValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<u8> for StateValue {
    fn from(value: u8) -> Self {
        StateValue::Int(i64::from(value))
    }
}

impl From<u16> for StateValue {
    fn from(value: u16) -> Self {
        StateValue::Int(i64::from(value))
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_owned())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Bool(b) => write!(f, "{b}"),
            StateValue::Int(i) => write!(f, "{i}"),
            StateValue::Text(s) => f.write_str(s),
        }
    }
}

/// State updates for one device, keyed by state name
pub type States = BTreeMap<&'static str, StateValue>;

/// The automation host as seen by the engine
pub trait Host {
    /// Whether the host has a device at this address
    fn is_registered(&self, device: DeviceId) -> bool;

    /// Last stored value of a device state
    fn get_state(&self, device: DeviceId, key: &str) -> Option<StateValue>;

    /// A configuration property the user set on the device
    fn config_property(&self, device: DeviceId, key: &str) -> Option<String>;

    /// Apply a batch of state updates to one device
    fn set_states(&mut self, device: DeviceId, states: States);

    /// Set a host-wide named variable
    fn update_variable(&mut self, name: &str, value: &str);

    /// Speak a phrase aloud
    fn speak(&mut self, phrase: &str);

    /// Append a line to the user-facing log
    fn log_line(&mut self, line: &str);

    /// Wall-clock time used in status strings
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// Update a single device state
    fn update_device_state(&mut self, device: DeviceId, key: &'static str, value: StateValue) {
        let mut states = States::new();
        states.insert(key, value);
        self.set_states(device, states);
    }
}

/// Opens the serial port the engine will own
pub trait PortOpener {
    type Port: Uart;
    type Error: fmt::Display;

    fn open_port(&mut self, port_id: &str, config: &UartConfig) -> Result<Self::Port, Self::Error>;
}

/// State updates gathered while one message is handled
///
/// Later updates to the same key replace earlier ones. Updates for
/// devices the host does not know are dropped.
#[derive(Debug, Default)]
pub struct StateBatch {
    devices: BTreeMap<DeviceId, States>,
}

impl StateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one update
    pub fn set(&mut self, device: DeviceId, key: &'static str, value: impl Into<StateValue>) {
        self.devices
            .entry(device)
            .or_default()
            .insert(key, value.into());
    }

    /// A value queued in this batch
    pub fn get(&self, device: DeviceId, key: &str) -> Option<&StateValue> {
        self.devices.get(&device).and_then(|states| states.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Number of devices with pending updates
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Hand every pending update to the host and clear the batch
    pub fn flush<H: Host + ?Sized>(&mut self, host: &mut H) {
        for (device, states) in core::mem::take(&mut self.devices) {
            if host.is_registered(device) {
                host.set_states(device, states);
            } else {
                log::trace!("dropping {} updates for unregistered {}", states.len(), device);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording host shared by the engine tests

    use super::*;
    use std::collections::{BTreeSet, HashMap};

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub registered: BTreeSet<DeviceId>,
        pub states: BTreeMap<DeviceId, States>,
        pub properties: HashMap<(DeviceId, String), String>,
        pub variables: BTreeMap<String, String>,
        pub spoken: Vec<String>,
        pub log: Vec<String>,
        pub set_calls: usize,
    }

    impl RecordingHost {
        pub fn with_devices(devices: &[DeviceId]) -> Self {
            Self {
                registered: devices.iter().copied().collect(),
                ..Self::default()
            }
        }

        pub fn state(&self, device: DeviceId, key: &str) -> Option<&StateValue> {
            self.states.get(&device).and_then(|s| s.get(key))
        }

        pub fn text(&self, device: DeviceId, key: &str) -> Option<&str> {
            self.state(device, key).and_then(StateValue::as_text)
        }

        pub fn flag(&self, device: DeviceId, key: &str) -> Option<bool> {
            self.state(device, key).and_then(StateValue::as_bool)
        }

        pub fn set_property(&mut self, device: DeviceId, key: &str, value: &str) {
            self.properties
                .insert((device, key.to_owned()), value.to_owned());
        }
    }

    impl Host for RecordingHost {
        fn is_registered(&self, device: DeviceId) -> bool {
            self.registered.contains(&device)
        }

        fn get_state(&self, device: DeviceId, key: &str) -> Option<StateValue> {
            self.state(device, key).cloned()
        }

        fn config_property(&self, device: DeviceId, key: &str) -> Option<String> {
            self.properties.get(&(device, key.to_owned())).cloned()
        }

        fn set_states(&mut self, device: DeviceId, states: States) {
            self.set_calls += 1;
            self.states.entry(device).or_default().extend(states);
        }

        fn update_variable(&mut self, name: &str, value: &str) {
            self.variables.insert(name.to_owned(), value.to_owned());
        }

        fn speak(&mut self, phrase: &str) {
            self.spoken.push(phrase.to_owned());
        }

        fn log_line(&mut self, line: &str) {
            self.log.push(line.to_owned());
        }

        fn now(&self) -> NaiveDateTime {
            chrono::NaiveDate::from_ymd_opt(2024, 3, 7)
                .and_then(|d| d.and_hms_opt(9, 5, 30))
                .unwrap()
        }
    }
}
