//! # hcplink-core
//!
//! Core implementation of the HCP host communication protocol used to talk
//! to an external fingerprint-sensing module over a narrow, half-duplex
//! physical channel.
//!
//! This crate provides the low-level protocol primitives:
//! - Link-packet framing with CRC32 integrity and acknowledgement handshake
//! - Fragmentation/reassembly of application messages onto MTU-bounded packets
//! - Tagged-length-value command/argument codec
//! - The [`HcpComm`] context with the `send_command` / `receive_result` API
//! - The blocking [`Transport`] contract implemented by `hcplink-transport`

pub mod checksum;
pub mod command;
pub mod comm;
pub mod constants;
pub mod error;
pub mod link;
pub mod message;
pub mod packet;
pub mod transfer;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use comm::{Arg, HcpComm};
pub use command::{ArgId, Command};
pub use error::{Error, Result};
pub use message::MessageBuffer;
pub use packet::LinkPacket;
pub use transport::Transport;

/// Fixed physical-transfer-unit size of one link packet
pub const MTU: usize = constants::MTU;
