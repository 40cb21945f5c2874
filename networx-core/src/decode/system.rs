//! System Status (0x08) and X-10 Message Received (0x09)

use core::fmt;

use networx_protocol::tables::SYSTEM_STATUS_TABLES;
use networx_protocol::{decode_tables, Field, FlagByte, Frame};

use super::{byte_at, field_count};
use crate::error::DecodeError;

const SYSTEM_STATUS: &str = "System Status Message";
const X10_RECEIVED: &str = "X-10 Message Received";

/// Panel model reported in the panel id byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelModel {
    None,
    Nx4,
    Nx6,
    Nx8,
    Nx8e,
    Nx6v2,
    Nx8v2,
    Other(u8),
}

impl PanelModel {
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => PanelModel::None,
            1 => PanelModel::Nx4,
            2 => PanelModel::Nx6,
            3 => PanelModel::Nx8,
            4 => PanelModel::Nx8e,
            10 => PanelModel::Nx6v2,
            12 => PanelModel::Nx8v2,
            other => PanelModel::Other(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PanelModel::None => "None",
            PanelModel::Nx4 => "NX-4",
            PanelModel::Nx6 => "NX-6",
            PanelModel::Nx8 => "NX-8",
            PanelModel::Nx8e => "NX-8e",
            PanelModel::Nx6v2 => "NX-6v2",
            PanelModel::Nx8v2 => "NX-8v2",
            PanelModel::Other(_) => "Other",
        }
    }
}

impl fmt::Display for PanelModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Panel-wide status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    pub panel_id: u8,
    pub flags: [FlagByte; 9],
    pub communicator_stack_pointer: u8,
}

impl SystemStatus {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        let panel_id = byte_at(frame, 2, SYSTEM_STATUS)?;
        let flags = decode_tables(frame.as_bytes(), 3, SYSTEM_STATUS_TABLES, &[])
            .map_err(field_count(SYSTEM_STATUS))?;
        let communicator_stack_pointer = byte_at(frame, 12, SYSTEM_STATUS)?;
        Ok(Self {
            panel_id,
            flags,
            communicator_stack_pointer,
        })
    }

    pub fn model(&self) -> PanelModel {
        PanelModel::from_id(self.panel_id)
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.flags.iter().any(|flags| flags.is_set(field))
    }
}

/// X-10 function code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum X10Function {
    AllUnitsOff,
    AllLightsOn,
    On,
    Off,
    Dim,
    Bright,
    AllLightsOff,
    Unknown(u8),
}

impl X10Function {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x08 => X10Function::AllUnitsOff,
            0x18 => X10Function::AllLightsOn,
            0x28 => X10Function::On,
            0x38 => X10Function::Off,
            0x48 => X10Function::Dim,
            0x58 => X10Function::Bright,
            0x68 => X10Function::AllLightsOff,
            other => X10Function::Unknown(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            X10Function::AllUnitsOff => "allUnitsOff",
            X10Function::AllLightsOn => "allLightsOn",
            X10Function::On => "on",
            X10Function::Off => "off",
            X10Function::Dim => "dim",
            X10Function::Bright => "bright",
            X10Function::AllLightsOff => "allLightsOff",
            X10Function::Unknown(_) => "unknown",
        }
    }
}

/// X-10 command seen on the power line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X10Message {
    pub house_code: u8,
    pub unit_code: u8,
    pub function: X10Function,
}

impl X10Message {
    pub fn decode(frame: &Frame) -> Result<Self, DecodeError> {
        Ok(Self {
            house_code: byte_at(frame, 2, X10_RECEIVED)?,
            unit_code: byte_at(frame, 3, X10_RECEIVED)?,
            function: X10Function::from_code(byte_at(frame, 4, X10_RECEIVED)?),
        })
    }
}

impl fmt::Display for X10Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "house code: {},  unit code: {},  function: {}",
            self.house_code,
            self.unit_code,
            self.function.name()
        )
    }
}
