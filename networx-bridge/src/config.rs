//! Bridge configuration file
//!
//! The engine sections (`[serial]`, `[timing]`, `[panel]`,
//! `[notifications]`) sit at the top level next to a `[devices]` section
//! that plays the part of the host's device registry:
//!
//! ```toml
//! [serial]
//! port = "/dev/ttyUSB0"
//!
//! [panel]
//! zones = 16
//!
//! [[devices.zones]]
//! number = 1
//! name = "Front Door"
//!
//! [[devices.partitions]]
//! number = 1
//! keypad = 1
//! ```
//!
//! With no `[devices]` section every zone and partition the panel limits
//! allow is registered.

use std::path::Path;

use anyhow::{bail, Context, Result};
use networx_core::EngineConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    #[serde(flatten)]
    pub engine: EngineConfig,
    pub devices: DeviceRegistry,
}

/// Devices the console host knows about
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceRegistry {
    pub zones: Vec<ZoneEntry>,
    pub partitions: Vec<PartitionEntry>,
    pub users: Vec<u8>,
    pub keypads: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneEntry {
    pub number: u16,
    /// Used until the panel reports the zone's own name
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartitionEntry {
    pub number: u8,
    /// Keypad that mirrors this partition's status
    #[serde(default)]
    pub keypad: Option<u8>,
}

impl DeviceRegistry {
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
            && self.partitions.is_empty()
            && self.users.is_empty()
            && self.keypads.is_empty()
    }

    /// Every zone and partition within the panel limits
    pub fn full(engine: &EngineConfig) -> Self {
        Self {
            zones: (1..=engine.panel.zones)
                .map(|number| ZoneEntry { number, name: None })
                .collect(),
            partitions: (1..=engine.panel.partitions)
                .map(|number| PartitionEntry {
                    number,
                    keypad: None,
                })
                .collect(),
            users: (1..=engine.panel.users).collect(),
            keypads: Vec::new(),
        }
    }

    /// Zone numbers in configuration order
    pub fn zone_numbers(&self) -> impl Iterator<Item = u16> + '_ {
        self.zones.iter().map(|z| z.number)
    }
}

impl BridgeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: BridgeConfig = toml::from_str(text)?;
        config.engine.validate()?;
        if config.devices.is_empty() {
            config.devices = DeviceRegistry::full(&config.engine);
        }
        config.validate_devices()?;
        Ok(config)
    }

    /// Registry entries must fall inside the panel limits
    pub fn validate_devices(&self) -> Result<()> {
        let panel = &self.engine.panel;
        for zone in &self.devices.zones {
            if zone.number == 0 || zone.number > panel.zones {
                bail!("zone {} outside 1..={}", zone.number, panel.zones);
            }
        }
        for partition in &self.devices.partitions {
            if partition.number == 0 || partition.number > panel.partitions {
                bail!(
                    "partition {} outside 1..={}",
                    partition.number,
                    panel.partitions
                );
            }
        }
        for &user in &self.devices.users {
            if user == 0 || user > panel.users {
                bail!("user {} outside 1..={}", user, panel.users);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_registers_everything() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.devices.zone_numbers().collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
        assert_eq!(config.devices.partitions.len(), 1);
        assert!(config.devices.users.is_empty());
    }

    #[test]
    fn test_engine_sections_and_devices() {
        let config = BridgeConfig::from_toml_str(
            r#"
            [serial]
            port = "/dev/ttyUSB0"
            baud_rate = 9600

            [panel]
            zones = 16
            users = 2

            [devices]
            users = [1, 2]
            keypads = [1]

            [[devices.zones]]
            number = 12
            name = "Front Door"

            [[devices.partitions]]
            number = 1
            keypad = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.engine.serial.baud_rate, 9600);
        assert_eq!(config.engine.panel.zones, 16);
        assert_eq!(config.devices.zones[0].name.as_deref(), Some("Front Door"));
        assert_eq!(config.devices.partitions[0].keypad, Some(1));
        assert_eq!(config.devices.users, vec![1, 2]);
    }

    #[test]
    fn test_zone_beyond_panel_limit_rejected() {
        let err = BridgeConfig::from_toml_str(
            r#"
            [[devices.zones]]
            number = 9
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("zone 9"));
    }

    #[test]
    fn test_engine_validation_applies() {
        assert!(BridgeConfig::from_toml_str("[panel]\ncode_length = 5\n").is_err());
    }
}
