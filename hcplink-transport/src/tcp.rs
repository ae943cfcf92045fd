//! TCP transport
//!
//! Talks to a device bridge (ser2net, socat, or a firmware simulator) that
//! forwards the byte stream to the module's serial or SPI port. The stream
//! itself carries no framing; the HCP link layer above provides it.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use hcplink_core::{Error, Result, Transport};

/// Blocking TCP client transport.
pub struct TcpTransport {
    stream: TcpStream,
    peer: SocketAddr,
}

impl TcpTransport {
    /// Connect to `addr`, waiting at most `timeout` (zero means no limit).
    pub fn connect(addr: impl ToSocketAddrs, timeout: Duration) -> Result<Self> {
        let peer = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no address"))?;

        let stream = if timeout.is_zero() {
            TcpStream::connect(peer)?
        } else {
            TcpStream::connect_timeout(&peer, timeout)?
        };

        // Packets are small and latency-bound; never batch them.
        stream.set_nodelay(true)?;

        debug!("connected to {peer}");
        Ok(Self { stream, peer })
    }

    /// Remote address of the bridge.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Transport for TcpTransport {
    fn write_all(&mut self, data: &[u8], timeout: Duration) -> Result<()> {
        self.stream.set_write_timeout(deadline(timeout))?;
        self.stream.write_all(data).map_err(map_io)
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        self.stream.set_read_timeout(deadline(timeout))?;
        self.stream.read_exact(buf).map_err(map_io)
    }
}

fn deadline(timeout: Duration) -> Option<Duration> {
    if timeout.is_zero() {
        None
    } else {
        Some(timeout)
    }
}

fn map_io(e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Error::Timeout,
        io::ErrorKind::UnexpectedEof => Error::Disconnected,
        _ => Error::Io(e),
    }
}
