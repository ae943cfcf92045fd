//! Full command/result exchange across a loopback pair

use std::time::Duration;

use hcplink_core::{transfer, Arg, ArgId, Command, HcpComm, MessageBuffer};
use hcplink_transport::{pair, Loopback};
use pretty_assertions::assert_eq;

const RX_TIMEOUT: Duration = Duration::from_secs(1);

/// Run a module-side thread that answers one command with one result.
fn spawn_module(
    mut wire: Loopback,
    respond: impl FnOnce(&MessageBuffer, &mut MessageBuffer) + Send + 'static,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut request = MessageBuffer::new(4096);
        transfer::recv_message(&mut wire, &mut request, RX_TIMEOUT, hcplink_core::MTU).unwrap();

        let mut result = MessageBuffer::new(4096);
        respond(&request, &mut result);
        transfer::send_message(&mut wire, 0, result.as_bytes(), hcplink_core::MTU).unwrap();
    })
}

#[test]
fn command_and_result_roundtrip() {
    let (host_wire, module_wire) = pair();

    let module = spawn_module(module_wire, |request, result| {
        assert_eq!(request.command().unwrap(), Command::Identify);

        result.init(Command::Identify);
        result.add_arg(ArgId::Match, &[1]).unwrap();
        result.add_arg(ArgId::Id, &0x0007u16.to_ne_bytes()).unwrap();
    });

    let mut comm = HcpComm::new(host_wire).with_rx_timeout(RX_TIMEOUT);
    comm.send_command(Command::Identify, None, None).unwrap();

    let mut matched = [0u8; 1];
    let mut id = [0u8; 2];
    comm.receive_result(
        Some((ArgId::Match, &mut matched)),
        Some((ArgId::Id, &mut id)),
    )
    .unwrap();

    assert_eq!(matched, [1]);
    assert_eq!(u16::from_ne_bytes(id), 7);
    module.join().unwrap();
}

#[test]
fn multi_fragment_payload_roundtrip() {
    let (host_wire, module_wire) = pair();

    // A template large enough to need several fragments at the real MTU.
    let template: Vec<u8> = (0..2000u16).map(|i| (i % 251) as u8).collect();
    let expected = template.clone();

    let module = spawn_module(module_wire, move |request, result| {
        assert_eq!(request.command().unwrap(), Command::StorageTemplate);
        assert_eq!(request.get_arg(ArgId::Download).unwrap(), expected.as_slice());

        result.init(Command::StorageTemplate);
        result.add_arg(ArgId::Result, &[0]).unwrap();
    });

    let mut comm = HcpComm::new(host_wire).with_rx_timeout(RX_TIMEOUT);
    let id = 3u16.to_ne_bytes();
    comm.send_command(
        Command::StorageTemplate,
        Some(Arg::new(ArgId::Download, &template)),
        Some(Arg::new(ArgId::Id, &id)),
    )
    .unwrap();

    let mut code = [0xFFu8; 1];
    comm.receive_result(Some((ArgId::Result, &mut code)), None)
        .unwrap();

    assert_eq!(code, [0]);
    module.join().unwrap();
}
