//! HCP command and argument identifiers

use std::fmt;

use crate::error::{Error, Result};

/// Command/result identifiers carried in the message header.
///
/// The same 16-bit code space is used for commands sent to the module and
/// for the results it returns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    // Biometry
    Capture = 0x0001,
    Enroll = 0x0002,
    Identify = 0x0003,
    Match = 0x0004,
    Image = 0x0005,
    Template = 0x0006,
    Wait = 0x0007,
    Settings = 0x0008,

    // Sensor and maintenance
    Navigate = 0x1001,
    Sensor = 0x1002,
    Calibrate = 0x1003,
    Diagnostics = 0x1004,
    UartSpeed = 0x1005,
    Reset = 0x1006,
    Cancel = 0x1007,

    // Module information
    Info = 0x3001,

    // Flash storage
    Storage = 0x4001,
    StorageTemplate = 0x4002,
    StorageCalibration = 0x4003,
    StorageLog = 0x4004,
    StorageSettings = 0x4005,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::Capture => "CMD_CAPTURE",
            Self::Enroll => "CMD_ENROLL",
            Self::Identify => "CMD_IDENTIFY",
            Self::Match => "CMD_MATCH",
            Self::Image => "CMD_IMAGE",
            Self::Template => "CMD_TEMPLATE",
            Self::Wait => "CMD_WAIT",
            Self::Settings => "CMD_SETTINGS",
            Self::Navigate => "CMD_NAVIGATE",
            Self::Sensor => "CMD_SENSOR",
            Self::Calibrate => "CMD_CALIBRATE",
            Self::Diagnostics => "CMD_DIAG",
            Self::UartSpeed => "CMD_UART_SPEED",
            Self::Reset => "CMD_RESET",
            Self::Cancel => "CMD_CANCEL",
            Self::Info => "CMD_INFO",
            Self::Storage => "CMD_STORAGE",
            Self::StorageTemplate => "CMD_STORAGE_TEMPLATE",
            Self::StorageCalibration => "CMD_STORAGE_CALIBRATION",
            Self::StorageLog => "CMD_STORAGE_LOG",
            Self::StorageSettings => "CMD_STORAGE_SETTINGS",
        }
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> u16 {
        cmd as u16
    }
}

impl TryFrom<u16> for Command {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x0001 => Ok(Self::Capture),
            0x0002 => Ok(Self::Enroll),
            0x0003 => Ok(Self::Identify),
            0x0004 => Ok(Self::Match),
            0x0005 => Ok(Self::Image),
            0x0006 => Ok(Self::Template),
            0x0007 => Ok(Self::Wait),
            0x0008 => Ok(Self::Settings),
            0x1001 => Ok(Self::Navigate),
            0x1002 => Ok(Self::Sensor),
            0x1003 => Ok(Self::Calibrate),
            0x1004 => Ok(Self::Diagnostics),
            0x1005 => Ok(Self::UartSpeed),
            0x1006 => Ok(Self::Reset),
            0x1007 => Ok(Self::Cancel),
            0x3001 => Ok(Self::Info),
            0x4001 => Ok(Self::Storage),
            0x4002 => Ok(Self::StorageTemplate),
            0x4003 => Ok(Self::StorageCalibration),
            0x4004 => Ok(Self::StorageLog),
            0x4005 => Ok(Self::StorageSettings),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04X})", self.name(), *self as u16)
    }
}

/// Argument tags for the tagged-length-value records of a message.
///
/// The reserved tag 0x0000 ("no argument") has no variant here; absence is
/// expressed with `Option` in the dispatch API instead, so the sentinel can
/// never reach the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ArgId {
    // Biometry flow
    FingerDown = 0x0001,
    FingerUp = 0x0002,
    Start = 0x0003,
    Add = 0x0004,
    Finish = 0x0005,
    Id = 0x0006,
    All = 0x0007,
    Extract = 0x0008,
    Match = 0x0009,
    Flag = 0x0010,

    // Data movement
    Acquire = 0x1001,
    Release = 0x1002,
    Set = 0x1003,
    Get = 0x1004,
    Upload = 0x1005,
    Download = 0x1006,
    Save = 0x1007,
    Delete = 0x1008,
    Data = 0x1009,

    // Result fields
    Result = 0x2001,
    Count = 0x2002,
    Size = 0x2003,
    Timeout = 0x2004,
    Version = 0x2005,
}

impl ArgId {
    /// Get argument name
    pub fn name(self) -> &'static str {
        match self {
            Self::FingerDown => "ARG_FINGER_DOWN",
            Self::FingerUp => "ARG_FINGER_UP",
            Self::Start => "ARG_START",
            Self::Add => "ARG_ADD",
            Self::Finish => "ARG_FINISH",
            Self::Id => "ARG_ID",
            Self::All => "ARG_ALL",
            Self::Extract => "ARG_EXTRACT",
            Self::Match => "ARG_MATCH",
            Self::Flag => "ARG_FLAG",
            Self::Acquire => "ARG_ACQUIRE",
            Self::Release => "ARG_RELEASE",
            Self::Set => "ARG_SET",
            Self::Get => "ARG_GET",
            Self::Upload => "ARG_UPLOAD",
            Self::Download => "ARG_DOWNLOAD",
            Self::Save => "ARG_SAVE",
            Self::Delete => "ARG_DELETE",
            Self::Data => "ARG_DATA",
            Self::Result => "ARG_RESULT",
            Self::Count => "ARG_COUNT",
            Self::Size => "ARG_SIZE",
            Self::Timeout => "ARG_TIMEOUT",
            Self::Version => "ARG_VERSION",
        }
    }
}

impl From<ArgId> for u16 {
    fn from(arg: ArgId) -> u16 {
        arg as u16
    }
}

impl TryFrom<u16> for ArgId {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            crate::constants::ARG_NONE => Err(Error::ReservedArgument),
            0x0001 => Ok(Self::FingerDown),
            0x0002 => Ok(Self::FingerUp),
            0x0003 => Ok(Self::Start),
            0x0004 => Ok(Self::Add),
            0x0005 => Ok(Self::Finish),
            0x0006 => Ok(Self::Id),
            0x0007 => Ok(Self::All),
            0x0008 => Ok(Self::Extract),
            0x0009 => Ok(Self::Match),
            0x0010 => Ok(Self::Flag),
            0x1001 => Ok(Self::Acquire),
            0x1002 => Ok(Self::Release),
            0x1003 => Ok(Self::Set),
            0x1004 => Ok(Self::Get),
            0x1005 => Ok(Self::Upload),
            0x1006 => Ok(Self::Download),
            0x1007 => Ok(Self::Save),
            0x1008 => Ok(Self::Delete),
            0x1009 => Ok(Self::Data),
            0x2001 => Ok(Self::Result),
            0x2002 => Ok(Self::Count),
            0x2003 => Ok(Self::Size),
            0x2004 => Ok(Self::Timeout),
            0x2005 => Ok(Self::Version),
            _ => Err(Error::UnknownArgument(value)),
        }
    }
}

impl fmt::Display for ArgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04X})", self.name(), *self as u16)
    }
}
