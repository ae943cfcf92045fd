//! Link packet structure and encoding/decoding
//!
//! # Packet structure
//!
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────┬─────────┬──────────┬─────────┐
//! │ Channel │ Length  │ PldSize │  SeqNr  │ SeqCnt  │ Payload  │  CRC32  │
//! │ 2 bytes │ 2 bytes │ 2 bytes │ 2 bytes │ 2 bytes │ N bytes  │ 4 bytes │
//! └─────────┴─────────┴─────────┴─────────┴─────────┴──────────┴─────────┘
//! ```
//!
//! `Length` counts everything after itself up to (not including) the
//! trailing checksum, so `Length = PldSize + 6`. The checksum covers
//! exactly those `Length` bytes. Host and module share byte order; all
//! fields are native-endian and total on-wire size never exceeds the MTU.
//!
//! Decoding is an explicit read of each fixed-width field at checked
//! offsets; any length inconsistency is a decode error. The fragment's own
//! `PldSize` field is authoritative for the payload extent — it is checked
//! against `Length` rather than re-derived from it.

use byteorder::{ByteOrder, NativeEndian};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    constants::{CHECKSUM_SIZE, FRAGMENT_HEADER_SIZE, LINK_HEADER_SIZE},
    error::{Error, Result},
};

/// One MTU-bounded frame of the link layer, carrying a single fragment of
/// an application message.
#[derive(Clone, PartialEq, Eq)]
pub struct LinkPacket {
    /// Logical channel number
    pub channel: u16,

    /// 1-based fragment sequence number
    pub seq_nr: u16,

    /// Total fragment count of the message this fragment belongs to
    pub seq_count: u16,

    /// Fragment payload
    pub payload: Bytes,
}

impl LinkPacket {
    /// Create a packet for one fragment.
    pub fn new(channel: u16, seq_nr: u16, seq_count: u16, payload: impl Into<Bytes>) -> Self {
        Self {
            channel,
            seq_nr,
            seq_count,
            payload: payload.into(),
        }
    }

    /// Value of the link length field: fragment header + payload.
    pub fn link_len(&self) -> usize {
        FRAGMENT_HEADER_SIZE + self.payload.len()
    }

    /// Total on-wire size of the encoded packet.
    pub fn encoded_len(&self) -> usize {
        LINK_HEADER_SIZE + self.link_len() + CHECKSUM_SIZE
    }

    /// Encode the packet, computing and appending its checksum.
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.encoded_len());

        buf.put_u16_ne(self.channel);
        buf.put_u16_ne(self.link_len() as u16);
        buf.put_u16_ne(self.payload.len() as u16);
        buf.put_u16_ne(self.seq_nr);
        buf.put_u16_ne(self.seq_count);
        buf.put_slice(&self.payload);

        let crc = checksum::crc32(0, &buf[LINK_HEADER_SIZE..]);
        buf.put_u32_ne(crc);

        buf
    }

    /// Parse a 4-byte link header into (channel, length).
    pub fn parse_header(header: &[u8]) -> Result<(u16, u16)> {
        if header.len() < LINK_HEADER_SIZE {
            return Err(Error::Truncated {
                expected: LINK_HEADER_SIZE,
                actual: header.len(),
            });
        }
        let channel = NativeEndian::read_u16(&header[0..2]);
        let length = NativeEndian::read_u16(&header[2..4]);
        Ok((channel, length))
    }

    /// Decode a complete frame (link header through checksum).
    ///
    /// # Errors
    ///
    /// - [`Error::Truncated`] if the frame is shorter than its length field
    ///   declares
    /// - [`Error::LengthMismatch`] if the length field disagrees with the
    ///   fragment's payload-size field
    /// - [`Error::ChecksumMismatch`] if the trailing CRC32 does not match
    pub fn decode(frame: &[u8]) -> Result<Self> {
        let (channel, length) = Self::parse_header(frame)?;
        let link_len = usize::from(length);

        let total = LINK_HEADER_SIZE + link_len + CHECKSUM_SIZE;
        if frame.len() < total {
            return Err(Error::Truncated {
                expected: total,
                actual: frame.len(),
            });
        }

        if link_len < FRAGMENT_HEADER_SIZE {
            return Err(Error::Truncated {
                expected: FRAGMENT_HEADER_SIZE,
                actual: link_len,
            });
        }

        let payload_size = NativeEndian::read_u16(&frame[4..6]);
        let seq_nr = NativeEndian::read_u16(&frame[6..8]);
        let seq_count = NativeEndian::read_u16(&frame[8..10]);

        // The payload-size field is authoritative; a link length that
        // disagrees with it is a framing defect, not something to paper
        // over by re-deriving the payload extent.
        if usize::from(payload_size) + FRAGMENT_HEADER_SIZE != link_len {
            return Err(Error::LengthMismatch {
                declared: length,
                payload: payload_size,
            });
        }

        let covered = &frame[LINK_HEADER_SIZE..LINK_HEADER_SIZE + link_len];
        let received = NativeEndian::read_u32(&frame[LINK_HEADER_SIZE + link_len..total]);
        let expected = checksum::crc32(0, covered);
        if expected != received {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        let payload_start = LINK_HEADER_SIZE + FRAGMENT_HEADER_SIZE;
        Ok(Self {
            channel,
            seq_nr,
            seq_count,
            payload: Bytes::copy_from_slice(
                &frame[payload_start..payload_start + usize::from(payload_size)],
            ),
        })
    }
}

impl fmt::Debug for LinkPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkPacket")
            .field("channel", &self.channel)
            .field("seq", &format!("{}/{}", self.seq_nr, self.seq_count))
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

impl fmt::Display for LinkPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LinkPacket(chn={}, seq={}/{}, len={})",
            self.channel,
            self.seq_nr,
            self.seq_count,
            self.payload.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = LinkPacket::new(1, 2, 5, &b"fragment bytes"[..]);
        let frame = original.encode();

        assert_eq!(frame.len(), original.encoded_len());

        let decoded = LinkPacket::decode(&frame).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_empty_payload() {
        let packet = LinkPacket::new(0, 1, 1, Bytes::new());
        let frame = packet.encode();

        assert_eq!(frame.len(), 14);

        let decoded = LinkPacket::decode(&frame).unwrap();
        assert_eq!(decoded.payload.len(), 0);
        assert_eq!(decoded.seq_count, 1);
    }

    #[test]
    fn test_corruption_rejected_everywhere_covered() {
        let packet = LinkPacket::new(0, 1, 1, Bytes::from_static(&[0xAA, 0xBB, 0xCC]));
        let frame = packet.encode();

        // Every byte between the length field and the checksum is covered.
        for i in 4..frame.len() - 4 {
            let mut corrupt = frame.clone();
            corrupt[i] ^= 0x01;
            let result = LinkPacket::decode(&corrupt);
            assert!(result.is_err(), "corrupt byte {i} slipped through");
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let packet = LinkPacket::new(0, 1, 1, Bytes::from_static(&[1, 2, 3, 4]));
        let mut frame = packet.encode();

        // Shrink the payload-size field while keeping the link length, then
        // refresh the checksum so only the inconsistency can be blamed.
        NativeEndian::write_u16(&mut frame[4..6], 3);
        let link_len = usize::from(NativeEndian::read_u16(&frame[2..4]));
        let crc = checksum::crc32(0, &frame[4..4 + link_len]);
        NativeEndian::write_u32(&mut frame[4 + link_len..], crc);

        assert!(matches!(
            LinkPacket::decode(&frame),
            Err(Error::LengthMismatch {
                declared: 10,
                payload: 3
            })
        ));
    }

    #[test]
    fn test_truncated_frame_rejected() {
        let packet = LinkPacket::new(0, 1, 1, Bytes::from_static(&[1, 2, 3]));
        let frame = packet.encode();

        assert!(matches!(
            LinkPacket::decode(&frame[..frame.len() - 1]),
            Err(Error::Truncated { .. })
        ));
        assert!(matches!(
            LinkPacket::parse_header(&frame[..3]),
            Err(Error::Truncated { .. })
        ));
    }
}
