//! # hcplink
//!
//! Host-side implementation of the HCP protocol for external
//! fingerprint-sensing modules.
//!
//! The protocol runs over a narrow, lossy, half-duplex channel (SPI or
//! serial, typically reached through a TCP bridge) that moves at most one
//! MTU-sized packet at a time. This crate layers:
//!
//! - `hcplink-core` — framing, checksums, acknowledgements,
//!   fragmentation/reassembly, and the tagged-argument message codec
//! - `hcplink-transport` — blocking transports (TCP bridge, loopback)
//! - [`Device`] — biometric operations built on the dispatch API
//!
//! ## Quick start
//!
//! ```no_run
//! use std::time::Duration;
//! use hcplink::Device;
//! use hcplink_transport::TcpTransport;
//!
//! fn main() -> hcplink::Result<()> {
//!     let bridge = TcpTransport::connect("192.168.1.50:4400", Duration::from_secs(5))?;
//!     let mut device = Device::new(bridge).with_rx_timeout(Duration::from_secs(5));
//!
//!     println!("{}", device.version()?);
//!     device.enroll_finger()?;
//!     device.template_save(1)?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;

// Re-exports
pub use device::Device;
pub use error::{Error, Result};

// Re-export protocol types
pub use hcplink_core::{Arg, ArgId, Command, HcpComm, MessageBuffer, Transport};
pub use hcplink_transport::{Loopback, TcpTransport};
