//! Application message buffer and tagged-argument codec
//!
//! # Message structure
//!
//! ```text
//! ┌─────────────┬─────────────┬───────────────────────────────────────┐
//! │ Command ID  │  Arg count  │  Arg count × (tag, length, payload)   │
//! │  2 bytes    │   2 bytes   │     2 + 2 + length bytes each         │
//! └─────────────┴─────────────┴───────────────────────────────────────┘
//! ```
//!
//! All fields are native byte order; arguments carry no padding and no
//! terminator. The buffer is caller-owned with a fixed capacity chosen at
//! construction: the largest message the session will ever exchange.

use byteorder::{ByteOrder, NativeEndian};
use bytes::BufMut;

use crate::{
    command::{ArgId, Command},
    error::{Error, Result},
};

/// Message header: command id (2) + argument count (2).
pub const HEADER_SIZE: usize = 4;

/// Per-argument header: tag (2) + payload length (2).
pub const ARG_HEADER_SIZE: usize = 4;

/// Capacity-bounded buffer holding one encoded application message.
///
/// The same buffer is reused for every command and result of a session;
/// no allocation happens after construction.
#[derive(Debug, Clone)]
pub struct MessageBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl MessageBuffer {
    /// Create an empty buffer that can hold up to `capacity` message bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current logical message length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check whether no message bytes are present.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Encoded message bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Discard any message content, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Start a new message: write the header for `command` with zero
    /// arguments.
    pub fn init(&mut self, command: Command) {
        self.buf.clear();
        self.buf.put_u16_ne(command.into());
        self.buf.put_u16_ne(0);
    }

    /// Append a tagged argument and bump the header's argument count.
    ///
    /// Zero-length payloads are legal. Fails with a capacity error if the
    /// argument would not fit; the buffer is left untouched in that case.
    pub fn add_arg(&mut self, tag: ArgId, payload: &[u8]) -> Result<()> {
        let needed = self.buf.len() + ARG_HEADER_SIZE + payload.len();
        if needed > self.capacity {
            return Err(Error::CapacityExceeded {
                needed,
                capacity: self.capacity,
            });
        }
        if payload.len() > usize::from(u16::MAX) {
            return Err(Error::CapacityExceeded {
                needed: payload.len(),
                capacity: usize::from(u16::MAX),
            });
        }

        let count = self.arg_count()?;
        NativeEndian::write_u16(&mut self.buf[2..4], count + 1);

        self.buf.put_u16_ne(tag.into());
        self.buf.put_u16_ne(payload.len() as u16);
        self.buf.put_slice(payload);
        Ok(())
    }

    /// Append raw reassembled bytes (receive path).
    ///
    /// Fails once the cumulative length would exceed the capacity.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = self.buf.len() + bytes.len();
        if needed > self.capacity {
            return Err(Error::CapacityExceeded {
                needed,
                capacity: self.capacity,
            });
        }
        self.buf.put_slice(bytes);
        Ok(())
    }

    /// Command/result identifier from the message header.
    pub fn command(&self) -> Result<Command> {
        Command::try_from(self.raw_command()?)
    }

    /// Raw 16-bit command/result code, without table lookup.
    pub fn raw_command(&self) -> Result<u16> {
        if self.buf.len() < HEADER_SIZE {
            return Err(Error::Truncated {
                expected: HEADER_SIZE,
                actual: self.buf.len(),
            });
        }
        Ok(NativeEndian::read_u16(&self.buf[0..2]))
    }

    /// Declared argument count from the message header.
    pub fn arg_count(&self) -> Result<u16> {
        if self.buf.len() < HEADER_SIZE {
            return Err(Error::Truncated {
                expected: HEADER_SIZE,
                actual: self.buf.len(),
            });
        }
        Ok(NativeEndian::read_u16(&self.buf[2..4]))
    }

    /// Find the first argument with tag `tag` and return its payload.
    ///
    /// Arguments are scanned in encoding order; duplicates are permitted
    /// but only the first is ever returned.
    pub fn get_arg(&self, tag: ArgId) -> Result<&[u8]> {
        let count = self.arg_count()?;
        let wanted = u16::from(tag);

        let mut offset = HEADER_SIZE;
        for _ in 0..count {
            if offset + ARG_HEADER_SIZE > self.buf.len() {
                return Err(Error::Truncated {
                    expected: offset + ARG_HEADER_SIZE,
                    actual: self.buf.len(),
                });
            }
            let found = NativeEndian::read_u16(&self.buf[offset..offset + 2]);
            let size = usize::from(NativeEndian::read_u16(&self.buf[offset + 2..offset + 4]));

            let payload_end = offset + ARG_HEADER_SIZE + size;
            if payload_end > self.buf.len() {
                return Err(Error::Truncated {
                    expected: payload_end,
                    actual: self.buf.len(),
                });
            }
            if found == wanted {
                return Ok(&self.buf[offset + ARG_HEADER_SIZE..payload_end]);
            }
            offset = payload_end;
        }

        Err(Error::ArgumentNotFound(tag))
    }
}
