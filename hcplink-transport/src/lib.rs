//! Transport implementations for the HCP link layer
//!
//! Blocking transports satisfying the [`hcplink_core::Transport`] contract:
//! a TCP client for serial/SPI device bridges and an in-memory loopback
//! pair for tests and simulation.

pub mod loopback;
pub mod tcp;

pub use loopback::{pair, Loopback};
pub use tcp::TcpTransport;
