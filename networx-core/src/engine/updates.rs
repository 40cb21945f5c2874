//! Host state mirror
//!
//! Turns decoded panel messages into device state updates, named
//! variables, spoken phrases and host log lines. Updates produced while
//! one message is handled go out as a single [`StateBatch`].

use std::collections::{BTreeMap, VecDeque};

use log::{error, info, warn};
use networx_protocol::{Field, FlagByte, Frame, PrimaryFunction, SecondaryFunction};

use crate::catalog::log_event::SubjectKind;
use crate::catalog::{device, display, speech, SpecialEvent, ZoneGroupMatch};
use crate::config::EngineConfig;
use crate::decode::{
    InterfaceConfiguration, KeypadButton, LogEvent, Message, PanelModel, PartitionStatus,
    PartitionsSnapshot, SystemStatus, UserInformation, ZoneName, ZoneState, ZoneStatus,
    ZonesSnapshot,
};
use crate::host::{DeviceId, Host, StateBatch};
use crate::timefmt::timestamp;

/// Log event lines kept for the host
pub const EVENT_HISTORY_LEN: usize = 25;

/// Breached zone text when nothing is breached
const NO_BREACH: &str = " ";

const PRIMARY_KEYPAD: u8 = 0x3D;
const SECONDARY_KEYPAD: u8 = 0x3E;

/// Engine-side memory of what the host has been told
#[derive(Debug)]
pub struct StateMirror {
    zone_names: BTreeMap<u16, String>,
    breached_zone: String,
    interface_logged: bool,
    display_index: Option<u8>,
    exit_error: [bool; 8],
    model: Option<PanelModel>,
    event_history: VecDeque<String>,
}

impl Default for StateMirror {
    fn default() -> Self {
        Self {
            zone_names: BTreeMap::new(),
            breached_zone: NO_BREACH.to_owned(),
            interface_logged: false,
            display_index: None,
            exit_error: [false; 8],
            model: None,
            event_history: VecDeque::with_capacity(EVENT_HISTORY_LEN),
        }
    }
}

impl StateMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the zone that caused the last alarm, `" "` when none
    pub fn breached_zone(&self) -> &str {
        &self.breached_zone
    }

    /// Formatted log event lines, oldest first
    pub fn event_history(&self) -> impl Iterator<Item = &str> + '_ {
        self.event_history.iter().map(String::as_str)
    }

    /// Reflect one decoded message on the host
    pub fn apply<H: Host + ?Sized>(&mut self, host: &mut H, message: &Message, config: &EngineConfig) {
        let mut batch = StateBatch::new();
        match message {
            Message::InterfaceConfiguration(m) => self.interface_configuration(host, &mut batch, m),
            Message::ZoneName(m) => self.zone_name(host, &mut batch, m, config),
            Message::ZoneStatus(m) => self.zone_status(host, &mut batch, m, config),
            Message::ZonesSnapshot(m) => zones_snapshot(&mut batch, m),
            Message::PartitionStatus(m) => self.partition_status(host, &mut batch, m, config),
            Message::PartitionsSnapshot(m) => self.partitions_snapshot(host, &mut batch, m, config),
            Message::SystemStatus(m) => self.system_status(&mut batch, m),
            Message::LogEvent(m) => self.log_event(host, &mut batch, m, config),
            Message::KeypadButton(m) => keypad_button(host, m),
            Message::UserInformation(m) => user_information(host, &mut batch, m, config),
            Message::X10Received(m) => {
                if config.notifications.log.message_processing {
                    host.log_line(&format!("X-10 message received:     {m}"));
                }
            }
            Message::ProgramDataReply(data) => {
                if config.notifications.log.message_processing {
                    host.log_line(&format!("program data reply:         {}", hex(data)));
                }
            }
            Message::Failed | Message::Ack | Message::Nak | Message::Rejected => {}
        }
        batch.flush(host);
    }

    /// Port opened and the loop is about to start
    pub fn comm_up<H: Host + ?Sized>(&mut self, host: &mut H) {
        let ts = timestamp(host.now());
        info!("connected to panel");
        host.update_variable("portStatus", "Port (opened)");
        host.update_variable("panelStatus", &format!("Connected  ** {ts}"));
        host.update_variable("communicationFailure", "false");
        self.connection_state(host, "Connected", &ts);
    }

    /// Loop has exited and the port is closing
    pub fn comm_down<H: Host + ?Sized>(&mut self, host: &mut H) {
        let ts = timestamp(host.now());
        info!("disconnected from panel");
        host.update_variable("portStatus", "Port (closed)");
        host.update_variable("panelStatus", &format!("Disconnected  ** {ts}"));
        host.update_variable("communicationFailure", "true");
        host.update_variable("lastFailureTime", &format!("Failed ** {ts}"));
        self.connection_state(host, "Disconnected", &ts);
    }

    fn connection_state<H: Host + ?Sized>(&mut self, host: &mut H, state: &'static str, ts: &str) {
        let change = format!("Partition 1  {state}  ** {ts}");
        let mut batch = StateBatch::new();
        let partition = DeviceId::partition(1);
        batch.set(partition, "partitionState", state);
        batch.set(partition, "securityState", state);
        batch.set(partition, "lastStateChange", change.as_str());
        batch.flush(host);
        host.update_variable("securityState", state);
        host.update_variable("lastStateChange", &change);
    }

    /// Watchdog period elapsed; `failed` when the last probe went unanswered
    pub fn watchdog_expired<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        failed: bool,
        error_count: u32,
        config: &EngineConfig,
    ) {
        let ts = timestamp(host.now());
        if config.notifications.log.message_processing {
            host.log_line(&format!(
                "watchdog timer triggered:        Interface Configuration Message: {ts}"
            ));
        }
        if failed {
            error!("communication continuity test failed, error count {error_count}");
            host.update_variable("portStatus", "Port (open failure)");
            host.update_variable("communicationFailure", "true");
            host.update_variable("lastFailureTime", &format!("Failed ** {ts}"));
            host.log_line(&format!(
                "error: communication continuity test FAILURE to NetworX Security System, error count {error_count}"
            ));
        }
    }

    /// A queued command is about to go out on the wire
    pub fn command_sent<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        name: &str,
        frame: &Frame,
        config: &EngineConfig,
    ) {
        let ts = timestamp(host.now());
        let type_byte = frame.type_byte();
        let log = config.notifications.log;
        if log.message_activity {
            host.log_line(&format!("queue send message:         {frame}"));
        }
        if log.commands && frame.ack_requested() {
            host.log_line(&format!("alarm command:          {name}"));
        }

        let mut batch = StateBatch::new();
        batch.set(
            DeviceId::partition(1),
            "lastFunction",
            format!("{name}  >> {type_byte:02x}  ** {ts} "),
        );
        batch.flush(host);
        host.update_variable(
            "sendingMessage",
            &format!(" >> {type_byte:02x} --  {name}     {frame} "),
        );

        if let Some(phrase) = command_phrase(frame) {
            announce(host, config, phrase);
        }
    }

    fn interface_configuration<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        message: &InterfaceConfiguration,
    ) {
        batch.set(DeviceId::PANEL, "firmware", message.firmware.as_str());
        set_flags(batch, DeviceId::PANEL, &message.flags);

        if self.interface_logged {
            return;
        }
        self.interface_logged = true;
        let model = self.model.map_or("unknown", PanelModel::name);
        host.log_line(&format!(
            "NetworX Security System:        System Model: {model}        Firmware: {} ",
            message.firmware
        ));
        host.log_line("Transition Based Broadcast messages currently enabled: ");
        for (field, _) in message.broadcasts().filter(|(_, on)| *on) {
            host.log_line(&format!("  - {}", field.key()));
        }
        host.log_line("Command / Request messages currently enabled: ");
        for (field, _) in message.requests().filter(|(_, on)| *on) {
            host.log_line(&format!("  - {}", field.key()));
        }
    }

    fn zone_name<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        message: &ZoneName,
        config: &EngineConfig,
    ) {
        batch.set(DeviceId::zone(message.zone), "zoneDisplayName", message.name.as_str());
        if config.notifications.log.message_processing {
            host.log_line(&format!(
                "processing message:         Zone Name Message,  zone: {},  {}",
                message.zone, message.name
            ));
        }
        self.zone_names.insert(message.zone, message.name.clone());
    }

    fn zone_status<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        message: &ZoneStatus,
        config: &EngineConfig,
    ) {
        let zone = DeviceId::zone(message.zone);
        set_flags(batch, zone, &message.flags);

        let group = message.zone_group();
        if let ZoneGroupMatch::Ambiguous(_) = group {
            warn!(
                "zone {} type flags {:06x} match several zone groups: {}",
                message.zone,
                message.fingerprint(),
                group.group_type()
            );
        }
        batch.set(zone, "zoneGroupType", group.group_type());
        batch.set(zone, "zoneGroupDescription", group.description());

        let state = message.state();
        batch.set(zone, "zoneState", state.key());
        let name = self.resolve_zone_name(host, message.zone);
        if config.notifications.log.zone_activity {
            host.log_line(&format!(
                "zone {:03}:          '{}!' {{{name} }}",
                message.zone,
                state.key()
            ));
        }

        if state == ZoneState::Triggered {
            info!("zone {} ({}) triggered", message.zone, name);
            let trigger = format!("Zone {:03}  ** {} ", message.zone, timestamp(host.now()));
            batch.set(DeviceId::partition(1), "lastZoneTrigger", trigger.as_str());
            host.update_variable("lastZoneTrigger", &trigger);
        }
    }

    fn partition_status<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        message: &PartitionStatus,
        config: &EngineConfig,
    ) {
        let partition = DeviceId::partition(message.partition);
        batch.set(partition, "lastUserNumber", message.last_user);
        set_flags(batch, partition, &message.flags);

        if let Some(keypad) = keypad_for(host, message.partition) {
            let keypad = DeviceId::keypad(keypad);
            let ac_power_on = host
                .get_state(DeviceId::SYSTEM_STATUS, Field::AcPowerOn.key())
                .and_then(|value| value.as_bool())
                .unwrap_or(false);
            batch.set(keypad, "armedSystem", message.is_set(Field::ArmedSystem));
            batch.set(keypad, "readyToArm", message.is_set(Field::ReadyToArm));
            batch.set(keypad, "fire", message.is_set(Field::Fire));
            batch.set(keypad, "acPowerOn", ac_power_on);
            batch.set(keypad, "stayMode", message.is_set(Field::EntryGuardStayMode));
            batch.set(keypad, "chimeMode", message.is_set(Field::ChimeModeOn));
            batch.set(keypad, "exitDelay", message.is_set(Field::Exit1));
            batch.set(keypad, "zoneBypass", message.is_set(Field::ZoneBypass));
        }

        let exit_error = message.is_set(Field::ExitErrorTriggered);
        if let Some(previous) = self
            .exit_error
            .get_mut(usize::from(message.partition.saturating_sub(1)))
        {
            if exit_error && !*previous {
                info!("partition {} failed to arm", message.partition);
                announce(host, config, speech::FAILED_TO_ARM);
            }
            *previous = exit_error;
        }
    }

    fn partitions_snapshot<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        message: &PartitionsSnapshot,
        config: &EngineConfig,
    ) {
        for (partition, flags) in message.iter() {
            set_flags(batch, DeviceId::partition(partition), core::slice::from_ref(flags));
        }
        self.display(host, batch, message.display_byte(), config);
    }

    /// Keypad display model driven by partition 1's snapshot byte
    fn display<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        snapshot: u8,
        config: &EngineConfig,
    ) {
        let partition = DeviceId::partition(1);
        let log = config.notifications.log;
        let warning = host
            .get_state(partition, Field::DelayExpirationWarning.key())
            .and_then(|value| value.as_bool())
            .unwrap_or(false);

        let state = display::classify(snapshot);
        if state.clears_breach() {
            self.breached_zone = NO_BREACH.to_owned();
        }
        let ts = timestamp(host.now());
        // the warning stands in for the partition update, the keypad still follows the display
        if warning {
            announce(host, config, speech::EXIT_DELAY_WARNING);
            if log.partition_activity {
                host.log_line("partition 1:       'Warning - exit delay expires in 10 sec!' ");
            }
        } else {
            batch.set(partition, "partitionState", state.name);
            batch.set(partition, "partitionStatus", state.condition);
            batch.set(
                partition,
                "lastStateChange",
                format!("Partition (1) '{}'  ** {ts} ", state.name),
            );
            if log.partition_activity {
                host.log_line(&format!("partition 1:       '{}!' ", state.name));
            }
        }

        if let Some(keypad) = keypad_for(host, 1) {
            let line_2 = state.line_2(&self.breached_zone);
            batch.set(DeviceId::keypad(keypad), "LCDMessageLine1", state.lcd_line_1);
            batch.set(DeviceId::keypad(keypad), "LCDMessageLine2", line_2);
            if log.partition_activity {
                host.log_line(&format!(
                    "keypad {keypad}:           LCD message line 1: \"{}\",  LCD message line 2: \"{line_2}\"",
                    state.lcd_line_1
                ));
            }
        }
        host.update_variable("partitionState", &format!("{}   ** {ts} ", state.name));

        if state.is_armed() && self.display_index != Some(state.index) {
            info!("partition 1 {}", state.name);
            let phrase = if state.index == display::ARMED_STAY {
                speech::ARMED_STAY
            } else {
                speech::ARMED_AWAY
            };
            announce(host, config, phrase);
        }
        self.display_index = Some(state.index);
    }

    fn system_status(&mut self, batch: &mut StateBatch, message: &SystemStatus) {
        let model = message.model();
        self.model = Some(model);
        let system = DeviceId::SYSTEM_STATUS;
        batch.set(system, "systemNumber", message.panel_id);
        batch.set(system, "model", model.name());
        batch.set(system, "communicatorStackPointer", message.communicator_stack_pointer);
        set_flags(batch, system, &message.flags);
    }

    fn log_event<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        event: &LogEvent,
        config: &EngineConfig,
    ) {
        let ts = timestamp(host.now());
        let line = match event.special() {
            Some(special) => self.special_event_line(host, event, special, config, &ts),
            None if event.event_type > crate::catalog::log_event::MAX_DOCUMENTED_EVENT => format!(
                "log event {:03}:      alarm event: ({})  is out of range of event dictionary definitions byte 5: (device address {}),  byte 6: (partition {})  ** {ts}",
                event.event_number,
                event.event_type,
                event.device_address(),
                event.partition - 1
            ),
            None => self.documented_event_line(host, batch, event, config, &ts),
        };

        if self.event_history.len() == EVENT_HISTORY_LEN {
            self.event_history.pop_front();
        }
        self.event_history.push_back(line.clone());
        if config.notifications.log.alarm_events {
            host.log_line(&line);
            host.update_variable("eventLogMessage", &line);
        }
    }

    fn documented_event_line<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        event: &LogEvent,
        config: &EngineConfig,
        ts: &str,
    ) -> String {
        let head = format!("log event {:03}:      {}", event.event_number, event.description());
        let partition = event.partition;
        match (event.subject_kind(), event.partition_valid()) {
            (SubjectKind::Zone, _) => {
                let name = self.resolve_zone_name(host, event.subject);
                if event.is_zone_alarm() {
                    self.breach(host, batch, event, &name, config);
                }
                format!(
                    "{head},  partition: {partition}  zone: {:03}  {{{name}}}   ** {ts}",
                    event.subject
                )
            }
            (SubjectKind::User, true) => {
                format!("{head},  partition: {partition}  user: {}   ** {ts}", event.subject)
            }
            (SubjectKind::User, false) => format!("{head},  user: {}   ** {ts}", event.subject),
            (SubjectKind::Device, _) => format!("{head},  device: {}   ** {ts}", event.subject),
            (SubjectKind::None, true) => format!("{head},  partition: {partition}   ** {ts}"),
            (SubjectKind::None, false) => format!("{head},   ** {ts}"),
        }
    }

    fn special_event_line<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: &LogEvent,
        special: SpecialEvent,
        config: &EngineConfig,
        ts: &str,
    ) -> String {
        let head = format!("log event {:03}:      {}", event.event_number, special.label());
        match special {
            SpecialEvent::TimeDateConfirmed => return format!("{head}: {ts}  ** {ts}"),
            SpecialEvent::Disarmed => announce(host, config, speech::DISARMED),
            SpecialEvent::Armed => announce(host, config, speech::ARMED),
            SpecialEvent::ProgramModeEntered => {
                host.update_variable("panelStatus", &format!("Program Mode (enter)  ** {ts}"))
            }
            SpecialEvent::ProgramModeExited => {
                host.update_variable("panelStatus", &format!("Program Mode (exit)  ** {ts}"))
            }
            SpecialEvent::SupervisionLost
            | SpecialEvent::SupervisionRestored
            | SpecialEvent::ModuleRegistered => {}
        }

        let address = event.device_address();
        let location = match special {
            SpecialEvent::SupervisionLost | SpecialEvent::SupervisionRestored => {
                format!("zone: {}", event.subject)
            }
            _ => format!("address: {address}"),
        };
        format!(
            "{head}: {},  {location},  partition: {}  ** {ts}",
            device::describe(address),
            event.partition
        )
    }

    /// Intrusion reported against a zone
    fn breach<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        batch: &mut StateBatch,
        event: &LogEvent,
        name: &str,
        config: &EngineConfig,
    ) {
        info!("security breach in zone {} ({})", event.subject, name);
        self.breached_zone = name.to_owned();
        if let Some(keypad) = u8::try_from(event.partition)
            .ok()
            .and_then(|partition| keypad_for(host, partition))
        {
            batch.set(DeviceId::keypad(keypad), "LCDMessageLine1", "Security Breach");
            batch.set(DeviceId::keypad(keypad), "LCDMessageLine2", name);
        }
        announce(host, config, &speech::zone_tripped(name));
    }

    /// Cached panel name, then the host's display name, then `Zone NNN`
    fn resolve_zone_name<H: Host + ?Sized>(&self, host: &H, zone: u16) -> String {
        self.zone_names
            .get(&zone)
            .cloned()
            .or_else(|| host.config_property(DeviceId::zone(zone), "zoneDisplayName"))
            .unwrap_or_else(|| format!("Zone {zone:03}"))
    }
}

fn zones_snapshot(batch: &mut StateBatch, message: &ZonesSnapshot) {
    for (zone, flags) in &message.zones {
        for (key, value) in flags.states() {
            batch.set(DeviceId::zone(*zone), key, value);
        }
    }
}

fn keypad_button<H: Host + ?Sized>(host: &mut H, message: &KeypadButton) {
    host.log_line(&format!(
        "alarm keypad button pressed;  keypad: {},  button: {}",
        message.keypad, message.key
    ));
}

fn user_information<H: Host + ?Sized>(
    host: &mut H,
    batch: &mut StateBatch,
    message: &UserInformation,
    config: &EngineConfig,
) {
    let pin = match message.pin(config.panel.code_length) {
        Ok(pin) => pin,
        Err(e) => {
            error!("user {} not updated: {}", message.user, e);
            return;
        }
    };
    if config.notifications.log.message_processing {
        host.log_line(&format!(
            "processing message:         User Information Reply,  user: {}",
            message.user
        ));
    }
    let user = DeviceId::user(message.user);
    batch.set(user, "userPin", pin);
    set_flags(batch, user, &[message.authority, message.partitions]);
}

fn set_flags(batch: &mut StateBatch, device: DeviceId, flags: &[FlagByte]) {
    for (field, value) in flags.iter().flat_map(|flags| flags.iter()) {
        batch.set(device, field.key(), value);
    }
}

fn keypad_for<H: Host + ?Sized>(host: &H, partition: u8) -> Option<u8> {
    host.config_property(DeviceId::partition(partition), "associatedKeypad")?
        .trim()
        .parse()
        .ok()
}

fn announce<H: Host + ?Sized>(host: &mut H, config: &EngineConfig, phrase: &str) {
    if config.notifications.speak {
        host.speak(phrase);
    }
}

/// Phrase spoken when a keypad command goes out
fn command_phrase(frame: &Frame) -> Option<&'static str> {
    let function = *frame.payload().first()?;
    match frame.canonical_type() {
        PRIMARY_KEYPAD if function == PrimaryFunction::ArmStay as u8 => Some(speech::ARMING_STAY),
        PRIMARY_KEYPAD if function == PrimaryFunction::ArmAway as u8 => Some(speech::ARMING_AWAY),
        SECONDARY_KEYPAD if function == SecondaryFunction::FirePanic as u8 => {
            Some(speech::FIRE_PANIC)
        }
        SECONDARY_KEYPAD if function == SecondaryFunction::MedicalPanic as u8 => {
            Some(speech::MEDICAL_PANIC)
        }
        SECONDARY_KEYPAD if function == SecondaryFunction::PolicePanic as u8 => {
            Some(speech::POLICE_PANIC)
        }
        _ => None,
    }
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|byte| format!("{byte:02x}")).collect()
}
