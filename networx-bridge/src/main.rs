//! NetworX panel bridge
//!
//! Opens the panel's serial port, runs the communication loop on its own
//! thread and reads commands from stdin. State changes are printed
//! through the logger.

mod clock;
mod config;
mod console;
mod host;
mod serial;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::Parser;
use log::{error, info, warn, LevelFilter};
use networx_core::timefmt;
use networx_core::{command_channel, CommandSender, Engine, EngineError};
use networx_protocol::Request;

use crate::clock::SystemClock;
use crate::config::BridgeConfig;
use crate::console::{ConsoleCommand, HELP};
use crate::host::ConsoleHost;
use crate::serial::{describe_ports, SerialOpener};

/// Serial bridge for NetworX NX-series security panels
#[derive(Parser, Debug)]
#[command(name = "networx-bridge", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Serial port, overrides `serial.port`
    #[arg(long)]
    port: Option<String>,

    /// Baud rate, overrides `serial.baud_rate`
    #[arg(long)]
    baud: Option<u32>,

    /// Log at debug level (twice for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_ports {
        let ports = describe_ports().context("failed to enumerate serial ports")?;
        if ports.is_empty() {
            println!("no serial ports found");
        }
        for port in ports {
            println!("{port}");
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::from_toml_str("")?,
    };
    if let Some(port) = cli.port {
        config.engine.serial.port = port;
    }
    if let Some(baud) = cli.baud {
        config.engine.serial.baud_rate = baud;
    }
    config.engine.validate()?;
    if config.engine.serial.port.is_empty() {
        bail!("no serial port configured, pass --port or set serial.port");
    }

    run(config)
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn run(config: BridgeConfig) -> Result<()> {
    let mut host = ConsoleHost::from_registry(&config.devices);
    info!("{} devices registered", host.device_count());

    let engine = Engine::open(
        &mut SerialOpener,
        &mut host,
        SystemClock::new(),
        config.engine.clone(),
        command_channel(),
    )?;
    let sender = engine.sender();

    let worker = thread::Builder::new()
        .name("networx-engine".into())
        .spawn(move || {
            let mut engine = engine;
            let result = engine.run(&mut host);
            (host, result)
        })
        .context("failed to spawn engine thread")?;

    if let Err(e) = read_commands(&config, &sender) {
        error!("stdin: {:#}", e);
    }
    // the loop may already be gone after a port failure
    if sender.request_shutdown().is_err() {
        warn!("engine already stopped");
    }

    let (host, result) = worker
        .join()
        .map_err(|_| anyhow!("engine thread panicked"))?;
    if let Some(status) = host.variable("panelStatus") {
        info!("{}", status);
    }
    result.context("communication loop failed")
}

/// Queue commands from stdin until `quit` or end of input
fn read_commands(config: &BridgeConfig, sender: &CommandSender) -> Result<()> {
    info!("{}", HELP);
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!("{}; {}", e, HELP);
                continue;
            }
        };
        match &command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::SyncClock => {
                let setting = timefmt::clock_setting(Local::now().naive_local())?;
                sender.enqueue(&Request::SetClockCalendar(setting))?;
            }
            ConsoleCommand::Send(hex) => {
                if let Err(e) = sender.enqueue_hex(hex) {
                    warn!("cannot send {:?}: {}", hex, e);
                }
            }
            _ => enqueue_burst(config, sender, &command.requests(config))?,
        }
    }
    Ok(())
}

/// Queue a run of requests with the configured spacing between them
fn enqueue_burst(config: &BridgeConfig, sender: &CommandSender, requests: &[Request]) -> Result<()> {
    let spacing = Duration::from_millis(u64::from(config.engine.timing.command_spacing_ms));
    for (i, request) in requests.iter().enumerate() {
        if i > 0 {
            thread::sleep(spacing);
        }
        match sender.enqueue(request) {
            Ok(()) => {}
            Err(EngineError::ChannelClosed) => bail!("engine stopped"),
            // out-of-range arguments only affect this request
            Err(e) => warn!("skipping {}: {}", request.name(), e),
        }
    }
    Ok(())
}
