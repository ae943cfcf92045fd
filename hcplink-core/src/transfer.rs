//! Fragmentation and reassembly of application messages
//!
//! Maps one application message of arbitrary size (up to the buffer
//! capacity) onto a sequence of link packets and back. Fragments are
//! numbered 1..count, sent strictly in order, one at a time, each waiting
//! for the link-layer handshake before the next goes out.

use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::{
    constants::FRAME_OVERHEAD,
    error::{Error, Result},
    link,
    message::MessageBuffer,
    transport::Transport,
};

/// Usable payload bytes per fragment for a given MTU.
pub fn app_mtu(mtu: usize) -> Result<usize> {
    if mtu <= FRAME_OVERHEAD {
        return Err(Error::InvalidMtu {
            mtu,
            overhead: FRAME_OVERHEAD,
        });
    }
    Ok(mtu - FRAME_OVERHEAD)
}

/// Number of fragments a message of `len` bytes occupies.
///
/// Always at least one, including for an empty message. When `len` is an
/// exact multiple of `app_mtu` this yields one extra empty trailing
/// fragment; the module firmware emits and accepts the same framing, so
/// the quirk is load-bearing wire behavior, not an optimization target.
pub fn fragment_count(len: usize, app_mtu: usize) -> usize {
    len / app_mtu + 1
}

/// Fragment `data` and transmit it as a packet sequence on `channel`.
pub fn send_message<T: Transport>(
    transport: &mut T,
    channel: u16,
    data: &[u8],
    mtu: usize,
) -> Result<()> {
    let app_mtu = app_mtu(mtu)?;
    let count = fragment_count(data.len(), app_mtu);
    if count > usize::from(u16::MAX) {
        return Err(Error::CapacityExceeded {
            needed: count,
            capacity: usize::from(u16::MAX),
        });
    }

    for seq_nr in 1..=count {
        let start = (seq_nr - 1) * app_mtu;
        let end = data.len().min(start + app_mtu);
        let packet = crate::packet::LinkPacket::new(
            channel,
            seq_nr as u16,
            count as u16,
            Bytes::copy_from_slice(&data[start..end]),
        );

        if count > 1 {
            debug!("tx fragment {seq_nr} of {count} ({} bytes)", end - start);
        }
        link::send_packet(transport, &packet, mtu)?;
    }

    Ok(())
}

/// Receive packets and reassemble one message into `out`.
///
/// The total fragment count is learned from the first received fragment.
/// Each fragment's own payload-size field decides how many bytes it
/// contributes. A capacity overflow is recorded but reception continues
/// until the sequence completes, so the transport is drained to a
/// consistent state; the recorded error is then returned. Any link-layer
/// failure aborts reassembly immediately.
pub fn recv_message<T: Transport>(
    transport: &mut T,
    out: &mut MessageBuffer,
    rx_timeout: Duration,
    mtu: usize,
) -> Result<()> {
    out.clear();

    let mut seq_nr = 0u16;
    let mut seq_count = 1u16;
    let mut overflow = None;

    while seq_nr < seq_count {
        let packet = link::recv_packet(transport, rx_timeout, mtu)?;
        seq_nr = packet.seq_nr;
        seq_count = packet.seq_count;

        if overflow.is_none() {
            if let Err(e) = out.append(&packet.payload) {
                debug!("message overflows buffer at fragment {seq_nr}, draining remainder");
                overflow = Some(e);
            }
        }

        if seq_count > 1 {
            debug!("rx fragment {seq_nr} of {seq_count}");
        }
    }

    match overflow {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
