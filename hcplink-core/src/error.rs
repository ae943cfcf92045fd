//! Error types for hcplink-core

/// Result type alias for HCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No data arrived within the transport's configured window.
    ///
    /// Expected and frequent; this is how a caller observes "no response
    /// yet" or "module idle".
    #[error("Timed out waiting for data")]
    Timeout,

    /// Peer endpoint is gone (closed stream, dropped loopback half)
    #[error("Transport disconnected")]
    Disconnected,

    /// Checksum verification failed
    #[error("Checksum mismatch: calculated 0x{expected:08X}, received 0x{received:08X}")]
    ChecksumMismatch {
        expected: u32,
        received: u32,
    },

    /// Acknowledgement read returned a token other than the agreed constant
    #[error("Acknowledgement mismatch: received 0x{received:08X}")]
    AckMismatch {
        received: u32,
    },

    /// Declared packet size does not fit the fixed MTU
    #[error("Frame too large: {size} bytes exceeds MTU of {mtu} bytes")]
    FrameTooLarge {
        size: usize,
        mtu: usize,
    },

    /// Configured MTU leaves no room for a fragment payload
    #[error("Invalid MTU: {mtu} bytes (must exceed the {overhead}-byte frame overhead)")]
    InvalidMtu {
        mtu: usize,
        overhead: usize,
    },

    /// Link length field disagrees with the fragment's own payload-size field
    #[error("Frame length mismatch: link length {declared}, fragment payload {payload}")]
    LengthMismatch {
        declared: u16,
        payload: u16,
    },

    /// Fewer bytes present than a declared length requires
    #[error("Truncated data: expected {expected} bytes, got {actual} bytes")]
    Truncated {
        expected: usize,
        actual: usize,
    },

    /// Application or argument buffer would overflow
    #[error("Buffer capacity exceeded: {needed} bytes needed, {capacity} available")]
    CapacityExceeded {
        needed: usize,
        capacity: usize,
    },

    /// Expected argument missing from a decoded message
    #[error("Argument not found: {0}")]
    ArgumentNotFound(crate::command::ArgId),

    /// Unknown command/result identifier
    #[error("Unknown command code: 0x{0:04X}")]
    UnknownCommand(u16),

    /// Unknown argument tag
    #[error("Unknown argument tag: 0x{0:04X}")]
    UnknownArgument(u16),

    /// The reserved "no argument" tag appeared where a real tag is required
    #[error("Reserved argument tag is not valid on the wire")]
    ReservedArgument,

    /// I/O error from the physical transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is the distinct timeout condition rather than a hard
    /// failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Check if this is an integrity failure, fatal to the current message
    /// and never retried at this layer.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. }
                | Self::AckMismatch { .. }
                | Self::FrameTooLarge { .. }
                | Self::LengthMismatch { .. }
        )
    }
}
