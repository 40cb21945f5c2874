//! Communication loop
//!
//! One [`Engine`] owns the serial port for the life of a connection. Each
//! iteration it:
//!
//! 1. checks the watchdog and queues a resynchronisation when it expires
//! 2. handles at most one unsolicited frame, without blocking
//! 3. drains the command queue, waiting after each send for the reply
//! 4. sleeps for the idle poll interval
//!
//! The loop ends when it dequeues the shutdown sentinel. The port is
//! released and the host told the panel is disconnected whichever way
//! [`Engine::run`] returns.

pub mod link;
pub mod queue;
pub mod updates;
pub mod watchdog;

#[cfg(test)]
pub(crate) mod testing;

use log::{debug, error, info, warn};
use networx_hal::{Clock, Uart};
use networx_protocol::{Frame, Request};

use crate::config::EngineConfig;
use crate::decode::Message;
use crate::dispatch::dispatch;
use crate::error::{EngineError, LinkError};
use crate::host::{DeviceId, Host, PortOpener};

pub use link::{Link, ReadMode};
pub use queue::{command_channel, CommandQueue, CommandSender, QueueItem};
pub use updates::StateMirror;
pub use watchdog::{Watchdog, WatchdogStatus};

/// Blocking reads made for the reply to one command
pub const REPLY_ATTEMPTS: usize = 5;

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Shutdown,
}

pub struct Engine<U, C> {
    link: Link<U>,
    clock: C,
    config: EngineConfig,
    queue: CommandQueue,
    /// Held so watchdog resyncs can be queued and the channel stays open
    sender: CommandSender,
    watchdog: Watchdog,
    mirror: StateMirror,
}

impl<U: Uart, C: Clock> Engine<U, C> {
    pub fn new(port: U, clock: C, config: EngineConfig, queue: CommandQueue, sender: CommandSender) -> Self {
        let watchdog = Watchdog::new(config.watchdog_period_ms(), clock.now_ms());
        Self {
            link: Link::new(port, config.serial.read_timeout_ms),
            clock,
            config,
            queue,
            sender,
            watchdog,
            mirror: StateMirror::new(),
        }
    }

    /// Open the configured port through the host
    ///
    /// A failure is reported to the host as `Port (open failure)` and is
    /// fatal: no engine is built.
    pub fn open<O, H>(
        opener: &mut O,
        host: &mut H,
        clock: C,
        config: EngineConfig,
        channel: (CommandSender, CommandQueue),
    ) -> Result<Self, EngineError>
    where
        O: PortOpener<Port = U>,
        H: Host + ?Sized,
    {
        let port_name = config.serial.port.clone();
        match opener.open_port(&port_name, &config.uart_config()) {
            Ok(port) => {
                info!("opened {} at {} baud", port_name, config.serial.baud_rate);
                let (sender, queue) = channel;
                Ok(Self::new(port, clock, config, queue, sender))
            }
            Err(e) => {
                error!("failed to open {}: {}", port_name, e);
                host.update_variable("portStatus", "Port (open failure)");
                Err(EngineError::PortOpen {
                    port: port_name,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// A producer handle onto this engine's command queue
    pub fn sender(&self) -> CommandSender {
        self.sender.clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run until shutdown or a port failure
    pub fn run<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), EngineError> {
        let result = self.startup(host).and_then(|()| loop {
            match self.step(host) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Shutdown) => break Ok(()),
                Err(e) => break Err(e),
            }
        });
        if let Err(e) = &result {
            error!("communication loop stopped: {}", e);
        }
        self.mirror.comm_down(host);
        info!("communication loop exited");
        result
    }

    /// Flush stale input and ask for the panel's identity
    pub fn startup<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), EngineError> {
        self.link.flush_input()?;
        self.mirror.comm_up(host);
        self.sender.enqueue(&Request::SystemStatus)?;
        self.sender.enqueue(&Request::InterfaceConfiguration)?;
        Ok(())
    }

    /// One loop iteration
    pub fn step<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<LoopControl, EngineError> {
        self.check_watchdog(host)?;

        if let Some(frame) = self.receive(ReadMode::NonBlocking)? {
            self.handle(host, &frame)?;
        }

        while let Some(item) = self.queue.try_next() {
            match item {
                QueueItem::Shutdown => {
                    info!("shutdown requested");
                    return Ok(LoopControl::Shutdown);
                }
                QueueItem::Command { name, frame } => self.exchange(host, name, &frame)?,
            }
        }

        self.clock.delay_ms(self.config.timing.idle_poll_ms);
        Ok(LoopControl::Continue)
    }

    /// Send one command and handle the first frame that comes back
    fn exchange<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        name: &'static str,
        frame: &Frame,
    ) -> Result<(), EngineError> {
        self.mirror.command_sent(host, name, frame, &self.config);
        debug!("sending {}: {}", name, frame);
        self.link.write_frame(frame)?;

        for _ in 0..REPLY_ATTEMPTS {
            if let Some(reply) = self.receive(ReadMode::Blocking)? {
                return self.handle(host, &reply);
            }
            self.clock.delay_ms(self.config.timing.idle_poll_ms);
        }
        warn!("no reply to {} after {} attempts", name, REPLY_ATTEMPTS);
        Ok(())
    }

    /// Read a frame; only port failures are errors
    fn receive(&mut self, mode: ReadMode) -> Result<Option<Frame>, EngineError> {
        match self.link.read_frame(mode) {
            Ok(frame) => Ok(frame),
            Err(e @ LinkError::Port(_)) => Err(e.into()),
            Err(LinkError::Timeout(ms)) => {
                debug!("no frame within {} ms", ms);
                Ok(None)
            }
            // already logged by the link
            Err(_) => Ok(None),
        }
    }

    fn handle<H: Host + ?Sized>(&mut self, host: &mut H, frame: &Frame) -> Result<(), EngineError> {
        let outcome = dispatch(frame);
        if let Some(reply) = outcome.reply() {
            self.link.send_reply(reply)?;
        }
        if let Some(message) = outcome.message() {
            if let Message::InterfaceConfiguration(_) = message {
                self.watchdog.firmware_seen();
            }
            self.mirror.apply(host, message, &self.config);
        }
        Ok(())
    }

    fn check_watchdog<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), EngineError> {
        let WatchdogStatus::Expired { failed } = self.watchdog.check(self.clock.now_ms()) else {
            return Ok(());
        };
        self.mirror
            .watchdog_expired(host, failed, self.watchdog.error_count(), &self.config);

        self.sender.enqueue(&Request::InterfaceConfiguration)?;
        for zone in 1..=self.config.panel.zones {
            if host.is_registered(DeviceId::zone(zone)) {
                self.sender.enqueue(&Request::ZoneStatus { zone })?;
            }
        }
        Ok(())
    }
}
