//! Console host
//!
//! Keeps the device registry and last known state in memory and reports
//! every change through the logger.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::info;
use networx_core::{DeviceId, Host, StateValue, States};

use crate::config::DeviceRegistry;

/// Host that prints state changes instead of driving an automation system
#[derive(Debug, Default)]
pub struct ConsoleHost {
    registered: BTreeSet<DeviceId>,
    properties: HashMap<(DeviceId, String), String>,
    states: BTreeMap<DeviceId, States>,
    variables: BTreeMap<String, String>,
}

impl ConsoleHost {
    pub fn from_registry(registry: &DeviceRegistry) -> Self {
        let mut host = Self::default();
        host.registered.insert(DeviceId::PANEL);
        host.registered.insert(DeviceId::SYSTEM_STATUS);

        for zone in &registry.zones {
            let device = DeviceId::zone(zone.number);
            host.registered.insert(device);
            if let Some(name) = &zone.name {
                host.properties
                    .insert((device, "zoneDisplayName".to_owned()), name.clone());
            }
        }
        for partition in &registry.partitions {
            let device = DeviceId::partition(partition.number);
            host.registered.insert(device);
            if let Some(keypad) = partition.keypad {
                host.properties
                    .insert((device, "associatedKeypad".to_owned()), keypad.to_string());
                host.registered.insert(DeviceId::keypad(keypad));
            }
        }
        for &user in &registry.users {
            host.registered.insert(DeviceId::user(user));
        }
        for &keypad in &registry.keypads {
            host.registered.insert(DeviceId::keypad(keypad));
        }
        host
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn device_count(&self) -> usize {
        self.registered.len()
    }
}

impl Host for ConsoleHost {
    fn is_registered(&self, device: DeviceId) -> bool {
        self.registered.contains(&device)
    }

    fn get_state(&self, device: DeviceId, key: &str) -> Option<StateValue> {
        self.states.get(&device)?.get(key).cloned()
    }

    fn config_property(&self, device: DeviceId, key: &str) -> Option<String> {
        self.properties.get(&(device, key.to_owned())).cloned()
    }

    fn set_states(&mut self, device: DeviceId, states: States) {
        let current = self.states.entry(device).or_default();
        let changed: Vec<String> = states
            .into_iter()
            .filter_map(|(key, value)| {
                let line = format!("{key}={value}");
                match current.insert(key, value.clone()) {
                    Some(old) if old == value => None,
                    _ => Some(line),
                }
            })
            .collect();
        if !changed.is_empty() {
            info!("{}: {}", device, changed.join(", "));
        }
    }

    fn update_variable(&mut self, name: &str, value: &str) {
        info!("{} = {}", name, value);
        self.variables.insert(name.to_owned(), value.to_owned());
    }

    fn speak(&mut self, phrase: &str) {
        info!(target: "networx::speech", "{}", phrase);
    }

    fn log_line(&mut self, line: &str) {
        info!(target: "networx::panel", "{}", line);
    }
}
