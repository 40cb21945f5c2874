//! Commands typed on stdin

use std::str::FromStr;

use networx_protocol::{PrimaryFunction, Request, SecondaryFunction};

use crate::config::BridgeConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    ArmStay,
    ArmAway,
    Disarm,
    /// Partition snapshot, each partition's status, system status
    Status,
    /// Name and status of every registered zone
    Zones,
    SyncClock,
    Panic(SecondaryFunction),
    Bypass(u16),
    /// A raw frame given as hex
    Send(String),
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| "empty command".to_owned())?;
        let command = match verb {
            "arm-stay" => ConsoleCommand::ArmStay,
            "arm-away" => ConsoleCommand::ArmAway,
            "disarm" => ConsoleCommand::Disarm,
            "status" => ConsoleCommand::Status,
            "zones" => ConsoleCommand::Zones,
            "sync-clock" => ConsoleCommand::SyncClock,
            "panic" => match words.next() {
                Some("fire") => ConsoleCommand::Panic(SecondaryFunction::FirePanic),
                Some("medical") => ConsoleCommand::Panic(SecondaryFunction::MedicalPanic),
                Some("police") => ConsoleCommand::Panic(SecondaryFunction::PolicePanic),
                _ => return Err("usage: panic fire|medical|police".to_owned()),
            },
            "bypass" => {
                let zone = words
                    .next()
                    .and_then(|z| z.parse().ok())
                    .ok_or_else(|| "usage: bypass <zone>".to_owned())?;
                ConsoleCommand::Bypass(zone)
            }
            "send" => {
                let hex: Vec<&str> = words.by_ref().collect();
                if hex.is_empty() {
                    return Err("usage: send <hex bytes>".to_owned());
                }
                return Ok(ConsoleCommand::Send(hex.join(" ")));
            }
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(format!("unknown command {other:?}")),
        };
        match words.next() {
            Some(extra) => Err(format!("unexpected argument {extra:?}")),
            None => Ok(command),
        }
    }
}

impl ConsoleCommand {
    /// Requests to queue, in order
    ///
    /// Empty for commands the caller handles itself (clock, raw frames,
    /// quit).
    pub fn requests(&self, config: &BridgeConfig) -> Vec<Request> {
        match self {
            ConsoleCommand::ArmStay => vec![Request::primary(PrimaryFunction::ArmStay)],
            ConsoleCommand::ArmAway => vec![Request::primary(PrimaryFunction::ArmAway)],
            ConsoleCommand::Disarm => vec![Request::primary(PrimaryFunction::Disarm)],
            ConsoleCommand::Status => {
                let mut requests = vec![Request::PartitionsSnapshot];
                requests.extend(
                    config
                        .devices
                        .partitions
                        .iter()
                        .map(|p| Request::PartitionStatus {
                            partition: p.number,
                        }),
                );
                requests.push(Request::SystemStatus);
                requests
            }
            ConsoleCommand::Zones => config
                .devices
                .zone_numbers()
                .flat_map(|zone| [Request::ZoneName { zone }, Request::ZoneStatus { zone }])
                .collect(),
            ConsoleCommand::Panic(function) => vec![Request::secondary(*function)],
            ConsoleCommand::Bypass(zone) => vec![Request::ZoneBypassToggle { zone: *zone }],
            ConsoleCommand::SyncClock | ConsoleCommand::Send(_) | ConsoleCommand::Quit => {
                Vec::new()
            }
        }
    }
}

pub const HELP: &str = "commands: arm-stay, arm-away, disarm, status, zones, sync-clock, \
panic fire|medical|police, bypass <zone>, send <hex>, quit";
