//! Named status flags
//!
//! Every bit the panel reports is identified by a [`Field`]. The string key
//! of a field is the state name the host stores it under.

macro_rules! fields {
    ($($(#[$meta:meta])* $variant:ident => $key:literal,)*) => {
        /// A named status flag carried in one bit of a panel message
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum Field {
            $($(#[$meta])* $variant,)*
        }

        impl Field {
            /// Every field, in declaration order
            pub const ALL: &'static [Field] = &[$(Field::$variant,)*];

            /// State key used by the host
            pub fn key(self) -> &'static str {
                match self {
                    $(Field::$variant => $key,)*
                }
            }
        }
    };
}

fields! {
    // Interface configuration: transition broadcasts enabled
    PartitionSnapshotMessage => "partitionSnapshotMessage",
    PartitionStatusMessage => "partitionStatusMessage",
    ZoneSnapshotMessage => "zoneSnapshotMessage",
    ZoneStatusMessage => "zoneStatusMessage",
    InterfaceConfigurationMessage => "interfaceConfigurationMessage",
    KeypadMessageReceived => "keypadMessageReceived",
    LogEventReceived => "logEventReceived",
    ReceivedX10Message => "receivedX10Message",
    SystemStatusMessage => "systemStatusMessage",

    // Interface configuration: request commands enabled
    PartitionSnapshotRequest => "partitionSnapshotRequest",
    PartitionStatusRequest => "partitionStatusRequest",
    ZoneSnapshotRequest => "zoneSnapshotRequest",
    ZoneStatusRequest => "zoneStatusRequest",
    ZoneNameRequest => "zoneNameRequest",
    InterfaceConfigurationRequest => "interfaceConfigurationRequest",
    KeypadTerminalModeRequest => "keypadTerminalModeRequest",
    SendKeypadTextMessage => "sendKeypadTextMessage",
    LogEventRequest => "logEventRequest",
    SendX10Message => "sendX10Message",
    SystemStatusRequest => "systemStatusRequest",
    SetUserAuthorisationCommandWithoutPin => "setUserAuthorisationCommandWithoutPin",
    SetUserAuthorisationCommandWithPin => "setUserAuthorisationCommandWithPin",
    SetUserCodeCommandWithoutPin => "setUserCodeCommandWithoutPin",
    SetUserCodeCommandWithPin => "setUserCodeCommandWithPin",
    UserInformationRequestWithoutPin => "userInformationRequestWithoutPin",
    UserInformationRequestWithPin => "userInformationRequestWithPin",
    ProgramDataCommand => "programDataCommand",
    ProgramDataRequest => "programDataRequest",
    ZoneBypassToggle => "zoneBypassToggle",
    SecondaryKeypadFunction => "secondaryKeypadFunction",
    PrimaryKeypadFunctionWithoutPin => "primaryKeypadFunctionWithoutPin",
    PrimaryKeypadFunctionWithPin => "primaryKeypadFunctionWithPin",
    SetClockCalendarCommand => "setClockCalenderCommand",
    StoreCommunicationEventCommand => "storeCommunicationEventCommand",

    // Zone status: partition mask
    Partition8 => "partition8",
    Partition7 => "partition7",
    Partition6 => "partition6",
    Partition5 => "partition5",
    Partition4 => "partition4",
    Partition3 => "partition3",
    Partition2 => "partition2",
    Partition1 => "partition1",

    // Zone status: type flags
    LocalOnly => "localOnly",
    Interior => "interior",
    EntryExitDelay2 => "entryExitDelay2",
    EntryExitDelay1 => "entryExitDelay1",
    Follower => "follower",
    KeySwitch => "keySwitch",
    In24HourFormat => "in24HourFormat",
    /// Shared by zone type and partition condition flags
    Fire => "fire",
    EntryGuard => "entryGuard",
    ForceArmable => "forceArmable",
    GroupBypassable => "groupBypassable",
    BypassableType => "bypassableType",
    Chime => "chime",
    SteadySiren => "steadySiren",
    YelpingSiren => "yelpingSiren",
    KeypadSounder => "keypadSounder",
    ListenIn => "listenIn",
    Restorable => "restorable",
    SwingerShutdown => "swingerShutdown",
    DialerDelay => "dialerDelay",
    CrossZone => "crossZone",
    TroubleZoneType => "troubleZoneType",
    DoubleEolTamper => "doubleEOLTamper",
    FastLoopResponse => "fastLoopResponse",

    // Zone status: condition flags
    LossOfSupervision => "lossOfSupervision",
    /// Shared by zone condition and system status
    LowBattery => "lowBattery",
    InhibitedForceArmed => "inhibitedForceArmed",
    BypassedCondition => "bypassedCondition",
    TroubleCondition => "troubleCondition",
    Tampered => "tampered",
    FaultedOrDelayedTrip => "faultedOrDelayedTrip",
    BypassMemory => "bypassMemory",
    /// Shared by zone and partition condition flags
    AlarmMemoryCondition => "alarmMemoryCondition",

    // Partition status: condition flags
    Instant => "instant",
    ArmedSystem => "armedSystem",
    TlmFaultMemory => "tLMFaultMemory",
    FirePulsingBuzzer => "firePulsingBuzzer",
    FireTrouble => "fireTrouble",
    BypassCodeRequired => "bypassCodeRequired",
    CancelPending => "cancelPending",
    CodeEntered => "codeEntered",
    CancelCommandEntered => "cancelCommandEntered",
    Tamper => "tamper",
    SteadySirenOn => "steadySirenOn",
    SirenOn => "sirenOn",
    PreviousAlarm => "previousAlarm",
    Exit2 => "exit2",
    Exit1 => "exit1",
    DelayExpirationWarning => "delayExpirationWarning",
    Entry => "entry",
    ChimeModeOn => "chimeModeOn",
    EntryGuardStayMode => "entryGuardStayMode",
    SilentExitEnabled => "silentExitEnabled",
    SensorLostSupervision => "sensorLostSupervision",
    SensorLowBattery => "sensorLowBattery",
    AutoHomeInhibited => "autoHomeInhibited",
    ExitErrorTriggered => "exitErrorTriggered",
    RecentClosingBeingTimed => "recentClosingBeingTimed",
    CrossTiming => "crossTiming",
    LedExtinguish => "ledExtinguish",
    ToneOnActivationTone => "toneOnActivationTone",
    ErrorBeepTripleBeep => "errorBeepTripleBeep",
    ChimeOnSounding => "chimeOnSounding",
    ValidPinAccepted => "validPinAccepted",
    ReadyToForceArm => "readyToForceArm",
    ReadyToArm => "readyToArm",
    ForceArmTriggeredByAutoArm => "forceArmTriggeredByAutoArm",
    ZoneBypass => "zoneBypass",
    DelayTripInProgressCommonZone => "delayTripInProgressCommonZone",
    KeySwitchArmed => "keySwitchArmed",
    CancelReportIsInTheStack => "cancelReportIsInTheStack",
    AlarmSendUsingPhoneNumber3 => "alarmSendUsingPhoneNumber3",
    AlarmSendUsingPhoneNumber2 => "alarmSendUsingPhoneNumber2",
    AlarmSendUsingPhoneNumber1 => "alarmSendUsingPhoneNumber1",
    OpenPeriod => "openPeriod",
    Entry1 => "entry1",

    // Partitions snapshot
    PartitionPreviousAlarm => "partitionPreviousAlarm",
    AnyExitDelay => "anyExitDelay",
    AnyEntryDelay => "anyEntryDelay",
    ChimeMode => "chimeMode",
    StayArm => "stayArm",
    ExitArm => "exitArm",
    SecurityReady => "securityReady",
    ValidPartition => "validPartition",

    // System status
    TwoWayLockout => "twoWayLockout",
    ListenInActive => "listenInActive",
    UsingBackupPhone => "usingBackupPhone",
    DialerDelayInProgress => "dialerDelayInProgress",
    DownloadInProgress => "downloadInProgress",
    InitialHandshakeReceived => "initialHandshakeReceived",
    OffHook => "offHook",
    LineSeizure => "lineSeizure",
    AcFail => "acFail",
    SirenTamper => "sirenTamper",
    BoxTamper => "boxTamper",
    FuseFault => "fuseFault",
    FailToCommunicate => "failToCommunicate",
    PhoneFault => "phoneFault",
    GroundFault => "groundFault",
    ExpanderBellFault => "expanderBellFault",
    AuxiliaryCommChannelFailure => "auxiliaryCommChannelFailure",
    ExpanderAuxOverCurrent => "expanderAuxOverCurrent",
    ExpanderLossOfSupervision => "expanderLossOffSupervision",
    ExpanderLowBattery => "expanderLowBattery",
    ExpanderAcFailure => "expanderACFailure",
    ExpanderBoxTamper => "expanderBoxTamper",
    BusDeviceRequestedSniffMode => "busDeviceRequestedSniffMode",
    BusDeviceHasLineSeized => "busDeviceHasLineSeized",
    GlobalSteadySiren => "globalSteadySiren",
    GlobalSirenOn => "globalSirenOn",
    GlobalPulsingBuzzer => "globalPulsingBuzzer",
    PinRequiredForLocalDownload => "pinRequiredForLocalDownload",
    ProgrammingTokenInUse => "programmingTokenInUse",
    Enable6DigitPin => "enable6DigitPin",
    TimingHighVoltageBatteryCharge => "timingHighVoltageBatteryCharge",
    LinePowerDetected50Hz => "linePowerDetected50Hz",
    SmokePowerReset => "smokePowerReset",
    FireAlarmVerificationBeingTimed => "fireAlarmVerificationBeingTimed",
    GroundFaultMemory => "groundFaultMemory",
    LowBatteryMemory => "lowBatteryMemory",
    AcPowerOn => "acPowerOn",
    DynamicBatteryTest => "dynamicBatteryTest",
    TimingCancelWindow => "timingACancelWindow",
    ControlShutdownMode => "controlShutdownMode",
    TestFixtureMode => "testFixtureMode",
    EnrollRequested => "enrollRequested",
    LossOfSystemTime => "lossOfSystemTime",
    WalkTestMode => "walkTestMode",
    PowerUpDelayInProgress => "powerUpDelayInProgress",
    CommunicationSinceLastAutoTest => "communicationSinceLastAutoTest",
    CallBackInProgress => "callBackInProgress",
    ListenInTrigger => "listenInTrigger",
    ListenInRequested => "listenInRequested",
    LastReadWasOffHook => "lastReadWasOffHook",
    Sniffing => "sniffing",
    PhoneLineMonitorEnabled => "phoneLineMonitorEnabled",
    HousePhoneOffHook => "housePhoneOffHook",
    VoltagePresentInterruptActive => "voltagePresentInterruptActive",
    PhoneLineFaulted => "phoneLineFaulted",
    ValidPartition8 => "validPartition8",
    ValidPartition7 => "validPartition7",
    ValidPartition6 => "validPartition6",
    ValidPartition5 => "validPartition5",
    ValidPartition4 => "validPartition4",
    ValidPartition3 => "validPartition3",
    ValidPartition2 => "validPartition2",
    ValidPartition1 => "validPartition1",

    // User information
    OpenCloseReportEnabled => "openCloseReportEnabled",
    BypassEnabled => "bypassEnabled",
    ArmDisarmEnabled => "armDisarmEnabled",
    MasterProgram => "masterProgram",
    ArmOnlyDuringCloseWindow => "armOnlyDuringCloseWindow",
    ArmOnly => "armOnly",
    Output4Enable => "output4Enable",
    Output3Enable => "output3Enable",
    Output2Enable => "output2Enable",
    Output1Enable => "output1Enable",
    AuthorisedForPartition8 => "authorisedForPartition8",
    AuthorisedForPartition7 => "authorisedForPartition7",
    AuthorisedForPartition6 => "authorisedForPartition6",
    AuthorisedForPartition5 => "authorisedForPartition5",
    AuthorisedForPartition4 => "authorisedForPartition4",
    AuthorisedForPartition3 => "authorisedForPartition3",
    AuthorisedForPartition2 => "authorisedForPartition2",
    AuthorisedForPartition1 => "authorisedForPartition1",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        for (i, a) in Field::ALL.iter().enumerate() {
            for b in &Field::ALL[i + 1..] {
                assert_ne!(a.key(), b.key(), "{:?} and {:?} share a key", a, b);
            }
        }
    }

    #[test]
    fn test_keys_are_camel_case() {
        for field in Field::ALL {
            let first = field.key().chars().next().unwrap();
            assert!(first.is_ascii_lowercase(), "{:?}", field);
            assert!(!field.key().contains(' '));
        }
    }
}
