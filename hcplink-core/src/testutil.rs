//! Scripted transport for unit tests

use std::collections::VecDeque;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::transport::Transport;

/// In-memory transport fed by the test and recording everything written.
///
/// Reads drain the scripted queue; an exhausted queue reports the distinct
/// timeout condition, which is exactly what a silent wire looks like.
#[derive(Debug, Default)]
pub struct ScriptTransport {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl ScriptTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the code under test to read.
    pub fn push_read(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Queue one acknowledgement token.
    pub fn push_ack(&mut self) {
        self.push_read(&crate::constants::COM_ACK.to_ne_bytes());
    }

    /// Everything the code under test has written, in order.
    pub fn written(&self) -> &[u8] {
        &self.tx
    }
}

impl Transport for ScriptTransport {
    fn write_all(&mut self, data: &[u8], _timeout: Duration) -> Result<()> {
        self.tx.extend_from_slice(data);
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<()> {
        if self.rx.len() < buf.len() {
            return Err(Error::Timeout);
        }
        for slot in buf.iter_mut() {
            // Queue length was checked above.
            *slot = self.rx.pop_front().unwrap_or_default();
        }
        Ok(())
    }
}
