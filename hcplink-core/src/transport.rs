//! Blocking physical-transport contract
//!
//! Supplied by the platform layer (`hcplink-transport` or an embedding
//! application). The channel is half-duplex and moves at most a few hundred
//! bytes per call; framing, integrity, and ordering all live above this
//! trait.

use std::time::Duration;

use crate::error::Result;

/// Blocking byte transport with per-call timeouts.
///
/// Both operations block the calling thread. A `timeout` of
/// [`Duration::ZERO`] means "no deadline": block until the operation
/// completes or the transport fails.
pub trait Transport {
    /// Write all of `data` to the channel.
    fn write_all(&mut self, data: &[u8], timeout: Duration) -> Result<()>;

    /// Read exactly `buf.len()` bytes from the channel.
    ///
    /// Returns [`crate::Error::Timeout`] as a distinct condition when the
    /// bytes do not arrive within `timeout`.
    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_all(&mut self, data: &[u8], timeout: Duration) -> Result<()> {
        (**self).write_all(data, timeout)
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        (**self).read_exact(buf, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, data: &[u8], timeout: Duration) -> Result<()> {
        (**self).write_all(data, timeout)
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        (**self).read_exact(buf, timeout)
    }
}
