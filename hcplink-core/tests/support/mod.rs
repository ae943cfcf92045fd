//! Shared scripted transport for integration tests

use std::collections::VecDeque;
use std::time::Duration;

use hcplink_core::constants::COM_ACK;
use hcplink_core::{Error, Result, Transport};

/// In-memory transport: reads drain a scripted queue, writes are recorded.
#[derive(Debug, Default)]
pub struct WireHarness {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl WireHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_read(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Queue `n` acknowledgement tokens for a sender under test.
    pub fn push_acks(&mut self, n: usize) {
        for _ in 0..n {
            self.push_read(&COM_ACK.to_ne_bytes());
        }
    }

    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Split the recorded wire bytes into raw frames using each frame's
    /// length field.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut rest = self.tx.as_slice();
        while rest.len() >= 4 {
            let length = u16::from_ne_bytes([rest[2], rest[3]]);
            let total = 4 + usize::from(length) + 4;
            frames.push(rest[..total].to_vec());
            rest = &rest[total..];
        }
        frames
    }
}

impl Transport for WireHarness {
    fn write_all(&mut self, data: &[u8], _timeout: Duration) -> Result<()> {
        self.tx.extend_from_slice(data);
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<()> {
        if self.rx.len() < buf.len() {
            return Err(Error::Timeout);
        }
        for slot in buf.iter_mut() {
            *slot = self.rx.pop_front().unwrap_or_default();
        }
        Ok(())
    }
}
