//! Bit tables for every flag-carrying payload byte
//!
//! Slot order is MSB first: the first entry names bit 7. `_` marks a
//! reserved bit.

use crate::bitmap::BitTable;
use crate::fields::Field;

macro_rules! slot {
    (_) => {
        None
    };
    ($field:ident) => {
        Some(Field::$field)
    };
}

macro_rules! bit_table {
    ($(#[$meta:meta])* $ident:ident, $name:literal, [$($slot:tt),* $(,)?]) => {
        $(#[$meta])*
        pub static $ident: BitTable = BitTable {
            name: $name,
            slots: [$(slot!($slot)),*],
        };
    };
}

// Interface Configuration Message (0x01), bytes 6-11

bit_table!(TRANSITION_MESSAGE_FLAGS_1, "transitionMessageFlags1", [
    PartitionSnapshotMessage, PartitionStatusMessage, ZoneSnapshotMessage, ZoneStatusMessage,
    _, _, InterfaceConfigurationMessage, _,
]);

bit_table!(TRANSITION_MESSAGE_FLAGS_2, "transitionMessageFlags2", [
    _, _, _, _, KeypadMessageReceived, LogEventReceived, ReceivedX10Message, SystemStatusMessage,
]);

bit_table!(REQUEST_COMMAND_FLAGS_1, "requestCommandFlags1", [
    PartitionSnapshotRequest, PartitionStatusRequest, ZoneSnapshotRequest, ZoneStatusRequest,
    ZoneNameRequest, _, InterfaceConfigurationRequest, _,
]);

bit_table!(REQUEST_COMMAND_FLAGS_2, "requestCommandFlags2", [
    _, _, _, KeypadTerminalModeRequest, SendKeypadTextMessage, LogEventRequest, SendX10Message,
    SystemStatusRequest,
]);

bit_table!(REQUEST_COMMAND_FLAGS_3, "requestCommandFlags3", [
    SetUserAuthorisationCommandWithoutPin, SetUserAuthorisationCommandWithPin,
    SetUserCodeCommandWithoutPin, SetUserCodeCommandWithPin, UserInformationRequestWithoutPin,
    UserInformationRequestWithPin, ProgramDataCommand, ProgramDataRequest,
]);

bit_table!(REQUEST_COMMAND_FLAGS_4, "requestCommandFlags4", [
    ZoneBypassToggle, SecondaryKeypadFunction, PrimaryKeypadFunctionWithoutPin,
    PrimaryKeypadFunctionWithPin, SetClockCalendarCommand, StoreCommunicationEventCommand, _, _,
]);

pub static INTERFACE_CONFIGURATION_TABLES: [&BitTable; 6] = [
    &TRANSITION_MESSAGE_FLAGS_1,
    &TRANSITION_MESSAGE_FLAGS_2,
    &REQUEST_COMMAND_FLAGS_1,
    &REQUEST_COMMAND_FLAGS_2,
    &REQUEST_COMMAND_FLAGS_3,
    &REQUEST_COMMAND_FLAGS_4,
];

// Zone Status Message (0x04), bytes 3-8

bit_table!(ZONE_PARTITION_MASK, "partitionMask", [
    Partition8, Partition7, Partition6, Partition5, Partition4, Partition3, Partition2, Partition1,
]);

bit_table!(ZONE_TYPE_FLAGS_1, "typeFlag1", [
    LocalOnly, Interior, EntryExitDelay2, EntryExitDelay1, Follower, KeySwitch, In24HourFormat,
    Fire,
]);

bit_table!(ZONE_TYPE_FLAGS_2, "typeFlag2", [
    EntryGuard, ForceArmable, GroupBypassable, BypassableType, Chime, SteadySiren, YelpingSiren,
    KeypadSounder,
]);

bit_table!(ZONE_TYPE_FLAGS_3, "typeFlag3", [
    ListenIn, Restorable, SwingerShutdown, DialerDelay, CrossZone, TroubleZoneType,
    DoubleEolTamper, FastLoopResponse,
]);

bit_table!(ZONE_CONDITION_FLAGS_1, "conditionFlag1", [
    _, LossOfSupervision, LowBattery, InhibitedForceArmed, BypassedCondition, TroubleCondition,
    Tampered, FaultedOrDelayedTrip,
]);

bit_table!(ZONE_CONDITION_FLAGS_2, "conditionFlag2", [
    _, _, _, _, _, _, BypassMemory, AlarmMemoryCondition,
]);

pub static ZONE_STATUS_TABLES: [&BitTable; 6] = [
    &ZONE_PARTITION_MASK,
    &ZONE_TYPE_FLAGS_1,
    &ZONE_TYPE_FLAGS_2,
    &ZONE_TYPE_FLAGS_3,
    &ZONE_CONDITION_FLAGS_1,
    &ZONE_CONDITION_FLAGS_2,
];

// Partition Status Message (0x06), bytes 3-6 and 8-9

bit_table!(
    /// Bit 5 is documented as reserved
    PARTITION_CONDITION_FLAGS_1, "partitionConditionFlag1", [
    Instant, ArmedSystem, _, TlmFaultMemory, FirePulsingBuzzer, Fire, FireTrouble,
    BypassCodeRequired,
]);

bit_table!(PARTITION_CONDITION_FLAGS_2, "partitionConditionFlag2", [
    CancelPending, CodeEntered, CancelCommandEntered, Tamper, AlarmMemoryCondition, SteadySirenOn,
    SirenOn, PreviousAlarm,
]);

bit_table!(PARTITION_CONDITION_FLAGS_3, "partitionConditionFlag3", [
    Exit2, Exit1, DelayExpirationWarning, Entry, ChimeModeOn, EntryGuardStayMode,
    SilentExitEnabled, _,
]);

bit_table!(PARTITION_CONDITION_FLAGS_4, "partitionConditionFlag4", [
    SensorLostSupervision, SensorLowBattery, AutoHomeInhibited, ExitErrorTriggered, _,
    RecentClosingBeingTimed, CrossTiming, LedExtinguish,
]);

bit_table!(PARTITION_CONDITION_FLAGS_5, "partitionConditionFlag5", [
    ToneOnActivationTone, ErrorBeepTripleBeep, ChimeOnSounding, ValidPinAccepted, ReadyToForceArm,
    ReadyToArm, ForceArmTriggeredByAutoArm, ZoneBypass,
]);

bit_table!(PARTITION_CONDITION_FLAGS_6, "partitionConditionFlag6", [
    DelayTripInProgressCommonZone, KeySwitchArmed, CancelReportIsInTheStack,
    AlarmSendUsingPhoneNumber3, AlarmSendUsingPhoneNumber2, AlarmSendUsingPhoneNumber1,
    OpenPeriod, Entry1,
]);

pub static PARTITION_STATUS_TABLES: [&BitTable; 6] = [
    &PARTITION_CONDITION_FLAGS_1,
    &PARTITION_CONDITION_FLAGS_2,
    &PARTITION_CONDITION_FLAGS_3,
    &PARTITION_CONDITION_FLAGS_4,
    &PARTITION_CONDITION_FLAGS_5,
    &PARTITION_CONDITION_FLAGS_6,
];

// Partitions Snapshot Message (0x07), one byte per partition

bit_table!(PARTITION_SNAPSHOT_FLAGS, "partitionSnapshot", [
    PartitionPreviousAlarm, AnyExitDelay, AnyEntryDelay, ChimeMode, StayArm, ExitArm,
    SecurityReady, ValidPartition,
]);

// System Status Message (0x08), bytes 3-11

bit_table!(SYSTEM_STATUS_FLAGS_1, "systemStatusFlag1", [
    TwoWayLockout, ListenInActive, UsingBackupPhone, DialerDelayInProgress, DownloadInProgress,
    InitialHandshakeReceived, OffHook, LineSeizure,
]);

bit_table!(SYSTEM_STATUS_FLAGS_2, "systemStatusFlag2", [
    AcFail, LowBattery, SirenTamper, BoxTamper, FuseFault, FailToCommunicate, PhoneFault,
    GroundFault,
]);

bit_table!(SYSTEM_STATUS_FLAGS_3, "systemStatusFlag3", [
    _, ExpanderBellFault, AuxiliaryCommChannelFailure, ExpanderAuxOverCurrent,
    ExpanderLossOfSupervision, ExpanderLowBattery, ExpanderAcFailure, ExpanderBoxTamper,
]);

bit_table!(SYSTEM_STATUS_FLAGS_4, "systemStatusFlag4", [
    BusDeviceRequestedSniffMode, BusDeviceHasLineSeized, GlobalSteadySiren, GlobalSirenOn,
    GlobalPulsingBuzzer, PinRequiredForLocalDownload, ProgrammingTokenInUse, Enable6DigitPin,
]);

bit_table!(SYSTEM_STATUS_FLAGS_5, "systemStatusFlag5", [
    TimingHighVoltageBatteryCharge, LinePowerDetected50Hz, SmokePowerReset,
    FireAlarmVerificationBeingTimed, GroundFaultMemory, LowBatteryMemory, AcPowerOn,
    DynamicBatteryTest,
]);

bit_table!(SYSTEM_STATUS_FLAGS_6, "systemStatusFlag6", [
    TimingCancelWindow, ControlShutdownMode, TestFixtureMode, EnrollRequested, LossOfSystemTime,
    WalkTestMode, PowerUpDelayInProgress, CommunicationSinceLastAutoTest,
]);

bit_table!(SYSTEM_STATUS_FLAGS_7, "systemStatusFlag7", [
    CallBackInProgress, _, _, _, _, _, _, _,
]);

bit_table!(SYSTEM_STATUS_FLAGS_8, "systemStatusFlag8", [
    ListenInTrigger, ListenInRequested, LastReadWasOffHook, Sniffing, PhoneLineMonitorEnabled,
    HousePhoneOffHook, VoltagePresentInterruptActive, PhoneLineFaulted,
]);

bit_table!(SYSTEM_STATUS_FLAGS_9, "systemStatusFlag9", [
    ValidPartition8, ValidPartition7, ValidPartition6, ValidPartition5, ValidPartition4,
    ValidPartition3, ValidPartition2, ValidPartition1,
]);

pub static SYSTEM_STATUS_TABLES: [&BitTable; 9] = [
    &SYSTEM_STATUS_FLAGS_1,
    &SYSTEM_STATUS_FLAGS_2,
    &SYSTEM_STATUS_FLAGS_3,
    &SYSTEM_STATUS_FLAGS_4,
    &SYSTEM_STATUS_FLAGS_5,
    &SYSTEM_STATUS_FLAGS_6,
    &SYSTEM_STATUS_FLAGS_7,
    &SYSTEM_STATUS_FLAGS_8,
    &SYSTEM_STATUS_FLAGS_9,
];

// User Information Reply (0x12), bytes 6-7

bit_table!(
    /// Authority flags when bit 7 is clear
    USER_AUTHORITY_FLAGS, "userAuthorityFlag1", [
    _, OpenCloseReportEnabled, BypassEnabled, ArmDisarmEnabled, MasterProgram,
    ArmOnlyDuringCloseWindow, ArmOnly, _,
]);

bit_table!(
    /// Authority flags when bit 7 is set
    USER_OUTPUT_AUTHORITY_FLAGS, "userAuthorityFlag2", [
    _, OpenCloseReportEnabled, BypassEnabled, ArmDisarmEnabled, Output4Enable, Output3Enable,
    Output2Enable, Output1Enable,
]);

bit_table!(USER_AUTHORISED_PARTITIONS, "userAuthorisedPartitions", [
    AuthorisedForPartition8, AuthorisedForPartition7, AuthorisedForPartition6,
    AuthorisedForPartition5, AuthorisedForPartition4, AuthorisedForPartition3,
    AuthorisedForPartition2, AuthorisedForPartition1,
]);

/// Every table, for consistency checks
pub static ALL_TABLES: [&BitTable; 31] = [
    &TRANSITION_MESSAGE_FLAGS_1,
    &TRANSITION_MESSAGE_FLAGS_2,
    &REQUEST_COMMAND_FLAGS_1,
    &REQUEST_COMMAND_FLAGS_2,
    &REQUEST_COMMAND_FLAGS_3,
    &REQUEST_COMMAND_FLAGS_4,
    &ZONE_PARTITION_MASK,
    &ZONE_TYPE_FLAGS_1,
    &ZONE_TYPE_FLAGS_2,
    &ZONE_TYPE_FLAGS_3,
    &ZONE_CONDITION_FLAGS_1,
    &ZONE_CONDITION_FLAGS_2,
    &PARTITION_CONDITION_FLAGS_1,
    &PARTITION_CONDITION_FLAGS_2,
    &PARTITION_CONDITION_FLAGS_3,
    &PARTITION_CONDITION_FLAGS_4,
    &PARTITION_CONDITION_FLAGS_5,
    &PARTITION_CONDITION_FLAGS_6,
    &PARTITION_SNAPSHOT_FLAGS,
    &SYSTEM_STATUS_FLAGS_1,
    &SYSTEM_STATUS_FLAGS_2,
    &SYSTEM_STATUS_FLAGS_3,
    &SYSTEM_STATUS_FLAGS_4,
    &SYSTEM_STATUS_FLAGS_5,
    &SYSTEM_STATUS_FLAGS_6,
    &SYSTEM_STATUS_FLAGS_7,
    &SYSTEM_STATUS_FLAGS_8,
    &SYSTEM_STATUS_FLAGS_9,
    &USER_AUTHORITY_FLAGS,
    &USER_OUTPUT_AUTHORITY_FLAGS,
    &USER_AUTHORISED_PARTITIONS,
];
