//! In-memory loopback transport
//!
//! A connected pair of byte-stream endpoints backed by channels. Used by
//! tests and simulators to stand in for the physical link: each half
//! behaves like a blocking half-duplex wire with per-call timeouts,
//! including the distinct timeout condition on silent reads.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use hcplink_core::{Error, Result, Transport};

/// One endpoint of an in-memory transport pair.
#[derive(Debug)]
pub struct Loopback {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
    pending: VecDeque<u8>,
}

/// Create a connected pair of loopback endpoints.
///
/// Bytes written to one endpoint become readable on the other, in order.
/// Dropping an endpoint disconnects its peer.
pub fn pair() -> (Loopback, Loopback) {
    let (a_tx, b_rx) = mpsc::channel();
    let (b_tx, a_rx) = mpsc::channel();
    (
        Loopback {
            tx: a_tx,
            rx: a_rx,
            pending: VecDeque::new(),
        },
        Loopback {
            tx: b_tx,
            rx: b_rx,
            pending: VecDeque::new(),
        },
    )
}

impl Transport for Loopback {
    fn write_all(&mut self, data: &[u8], _timeout: Duration) -> Result<()> {
        self.tx
            .send(data.to_vec())
            .map_err(|_| Error::Disconnected)
    }

    fn read_exact(&mut self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        let deadline = (!timeout.is_zero()).then(|| Instant::now() + timeout);

        while self.pending.len() < buf.len() {
            let chunk = match deadline {
                Some(deadline) => {
                    let remaining = deadline
                        .checked_duration_since(Instant::now())
                        .ok_or(Error::Timeout)?;
                    self.rx.recv_timeout(remaining).map_err(|e| match e {
                        RecvTimeoutError::Timeout => Error::Timeout,
                        RecvTimeoutError::Disconnected => Error::Disconnected,
                    })?
                }
                None => self.rx.recv().map_err(|_| Error::Disconnected)?,
            };
            self.pending.extend(chunk);
        }

        for slot in buf.iter_mut() {
            *slot = self.pending.pop_front().unwrap_or_default();
        }
        Ok(())
    }
}
