//! Protocol constants

use std::time::Duration;

/// Fixed MTU of the physical layer in bytes.
///
/// One link packet never exceeds this size on the wire. The value is a
/// compile-time constant shared with the module firmware; there is no
/// negotiation.
pub const MTU: usize = 256;

/// Acknowledgement token exchanged after each successfully received packet.
///
/// Fixed 4-byte constant agreed with the module out of band (doubles as the
/// protocol version marker).
pub const COM_ACK: u32 = 0x7f01_ff7f;

/// Size of the acknowledgement token on the wire.
pub const ACK_SIZE: usize = 4;

/// Link header: channel (2) + length (2).
pub const LINK_HEADER_SIZE: usize = 4;

/// Fragment header: payload size (2) + sequence number (2) + sequence count (2).
pub const FRAGMENT_HEADER_SIZE: usize = 6;

/// Trailing CRC32 field.
pub const CHECKSUM_SIZE: usize = 4;

/// Total per-packet overhead: link header + fragment header + checksum.
pub const FRAME_OVERHEAD: usize = LINK_HEADER_SIZE + FRAGMENT_HEADER_SIZE + CHECKSUM_SIZE;

/// Timeout for the best-effort acknowledgement read after a packet write.
///
/// Much shorter than the main receive timeout; an expiry here is not an
/// error on the transmit path.
pub const ACK_TIMEOUT: Duration = Duration::from_millis(100);

/// Timeout for reading the body of a packet once its header has arrived.
pub const BODY_TIMEOUT: Duration = Duration::from_millis(100);

/// Default receive timeout for the first header bytes of a response.
pub const DEFAULT_RX_TIMEOUT: Duration = Duration::from_secs(5);

/// Default capacity of the application message buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Default logical channel number.
pub const DEFAULT_CHANNEL: u16 = 0;

/// Reserved tag value meaning "no argument"; never valid on the wire.
pub const ARG_NONE: u16 = 0x0000;
