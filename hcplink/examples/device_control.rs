//! Exercise a module through a TCP serial bridge.
//!
//! Run with: `cargo run --example device_control -- 192.168.1.50:4400`

use std::time::Duration;

use hcplink::Device;
use hcplink_transport::TcpTransport;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:4400".to_string());

    println!("connecting to {addr}...");
    let bridge = TcpTransport::connect(addr.as_str(), Duration::from_secs(5))?;
    let mut device = Device::new(bridge).with_rx_timeout(Duration::from_secs(10));

    println!("module version: {}", device.version()?);

    println!("place a finger on the sensor...");
    match device.identify_finger()? {
        Some(id) => println!("match with template id {id}"),
        None => println!("no match"),
    }

    Ok(())
}
