//! Engine configuration
//!
//! Loaded from TOML by the host. Every section and field has a default
//! matching the panel's factory behaviour, so an empty document is a
//! valid configuration.

use serde::Deserialize;

use networx_hal::uart::{UartConfig, DEFAULT_BAUDRATE, DEFAULT_READ_TIMEOUT_MS, DEFAULT_WRITE_TIMEOUT_MS};
use networx_protocol::requests::{MAX_PARTITIONS, MAX_USERS, MAX_ZONES, ZONES_PER_SNAPSHOT_BLOCK};

use crate::error::ConfigError;

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Serial port settings
    pub serial: SerialConfig,
    /// Loop timing
    pub timing: TimingConfig,
    /// Panel limits
    pub panel: PanelConfig,
    /// Speech and host log switches
    pub notifications: NotificationConfig,
}

/// Serial port settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// OS port name, e.g. `/dev/ttyUSB0`
    pub port: String,
    /// Baud rate configured on the interface module
    pub baud_rate: u32,
    /// Worst-case wait for a reply byte
    pub read_timeout_ms: u32,
    /// Maximum time a write may block
    pub write_timeout_ms: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: DEFAULT_BAUDRATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

/// Loop timing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Sleep between loop iterations and between reply attempts
    pub idle_poll_ms: u32,
    /// Pause a producer leaves between commands of a burst
    pub command_spacing_ms: u32,
    /// Continuity check period in seconds, 0 disables the watchdog
    pub watchdog_period_s: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            idle_poll_ms: 10,
            command_spacing_ms: 300,
            watchdog_period_s: 0,
        }
    }
}

/// Panel limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Digits per user PIN, 4 or 6
    pub code_length: u8,
    /// Zones wired on the panel
    pub zones: u16,
    /// Partitions in use
    pub partitions: u8,
    /// User codes to query
    pub users: u8,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            code_length: 4,
            zones: 8,
            partitions: 1,
            users: 0,
        }
    }
}

/// Speech and host log switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Send spoken phrases to the host
    pub speak: bool,
    /// Host log categories
    pub log: LogCategories,
}

/// Which activity is echoed to the host log
///
/// Diagnostic logging through `log` is unaffected by these switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogCategories {
    /// Log event messages from the panel
    pub alarm_events: bool,
    /// Commands issued by the host
    pub commands: bool,
    /// Partition state changes and keypad display
    pub partition_activity: bool,
    /// Zone state changes
    pub zone_activity: bool,
    /// Commands placed on the queue
    pub message_activity: bool,
    /// Every message processed
    pub message_processing: bool,
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every limit the panel imposes
    pub fn validate(&self) -> Result<(), ConfigError> {
        let panel = &self.panel;
        if panel.code_length != 4 && panel.code_length != 6 {
            return Err(ConfigError::CodeLength(panel.code_length));
        }
        if panel.zones == 0 || panel.zones > MAX_ZONES {
            return Err(ConfigError::ZoneCount(panel.zones));
        }
        if panel.partitions == 0 || panel.partitions > MAX_PARTITIONS {
            return Err(ConfigError::PartitionCount(panel.partitions));
        }
        if panel.users > MAX_USERS {
            return Err(ConfigError::UserCount(panel.users));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::ZeroTiming { name: "serial.baud_rate" });
        }
        if self.serial.read_timeout_ms == 0 {
            return Err(ConfigError::ZeroTiming {
                name: "serial.read_timeout_ms",
            });
        }
        Ok(())
    }

    /// UART settings for opening the port
    pub fn uart_config(&self) -> UartConfig {
        UartConfig {
            read_timeout_ms: self.serial.read_timeout_ms,
            write_timeout_ms: self.serial.write_timeout_ms,
            ..UartConfig::with_baudrate(self.serial.baud_rate)
        }
    }

    /// Zone snapshot blocks needed to cover every configured zone
    pub fn snapshot_blocks(&self) -> u8 {
        self.panel.zones.div_ceil(ZONES_PER_SNAPSHOT_BLOCK) as u8
    }

    /// Watchdog period in milliseconds, `None` when disabled
    pub fn watchdog_period_ms(&self) -> Option<u64> {
        match self.timing.watchdog_period_s {
            0 => None,
            s => Some(u64::from(s) * 1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.serial.baud_rate, 38_400);
        assert_eq!(config.serial.read_timeout_ms, 3_000);
        assert_eq!(config.serial.write_timeout_ms, 1_000);
        assert_eq!(config.timing.idle_poll_ms, 10);
        assert_eq!(config.timing.command_spacing_ms, 300);
        assert_eq!(config.panel.code_length, 4);
        assert_eq!(config.panel.zones, 8);
        assert_eq!(config.panel.partitions, 1);
        assert_eq!(config.panel.users, 0);
        assert_eq!(config.watchdog_period_ms(), None);
    }

    #[test]
    fn test_parse_full_document() {
        let text = r#"
            [serial]
            port = "/dev/ttyUSB0"
            baud_rate = 9600

            [timing]
            watchdog_period_s = 60

            [panel]
            code_length = 6
            zones = 40
            partitions = 2
            users = 5

            [notifications]
            speak = true

            [notifications.log]
            zone_activity = true
        "#;
        let config = EngineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.uart_config().baudrate, 9_600);
        assert_eq!(config.uart_config().read_timeout_ms, 3_000);
        assert_eq!(config.watchdog_period_ms(), Some(60_000));
        assert_eq!(config.panel.code_length, 6);
        assert_eq!(config.snapshot_blocks(), 3);
        assert!(config.notifications.speak);
        assert!(config.notifications.log.zone_activity);
        assert!(!config.notifications.log.alarm_events);
    }

    #[test]
    fn test_code_length_must_be_four_or_six() {
        let result = EngineConfig::from_toml_str("[panel]\ncode_length = 5\n");
        assert!(matches!(result, Err(ConfigError::CodeLength(5))));
    }

    #[test]
    fn test_panel_limits() {
        assert!(matches!(
            EngineConfig::from_toml_str("[panel]\nzones = 0\n"),
            Err(ConfigError::ZoneCount(0))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[panel]\nzones = 193\n"),
            Err(ConfigError::ZoneCount(193))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[panel]\npartitions = 9\n"),
            Err(ConfigError::PartitionCount(9))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[panel]\nusers = 100\n"),
            Err(ConfigError::UserCount(100))
        ));
        assert!(EngineConfig::from_toml_str("[panel]\nzones = 192\nusers = 99\n").is_ok());
    }

    #[test]
    fn test_zero_read_timeout_rejected() {
        let result = EngineConfig::from_toml_str("[serial]\nread_timeout_ms = 0\n");
        assert!(matches!(result, Err(ConfigError::ZeroTiming { .. })));
    }

    #[test]
    fn test_type_error_is_parse_error() {
        let result = EngineConfig::from_toml_str("[panel]\nzones = \"many\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_snapshot_blocks_round_up() {
        let mut config = EngineConfig::default();
        config.panel.zones = 16;
        assert_eq!(config.snapshot_blocks(), 1);
        config.panel.zones = 17;
        assert_eq!(config.snapshot_blocks(), 2);
        config.panel.zones = 192;
        assert_eq!(config.snapshot_blocks(), 12);
    }
}
