//! Communication context and command dispatch API
//!
//! [`HcpComm`] is the long-lived, caller-owned context of one session: the
//! transport, the logical channel, the receive timeout, and the
//! capacity-bounded application message buffer. One exchange is in flight
//! at a time; `&mut self` enforces the single-owner, single-thread model
//! of the strictly synchronous protocol. Multiple independent sessions are
//! just multiple contexts.

use std::time::Duration;

use tracing::debug;

use crate::{
    command::{ArgId, Command},
    constants::{DEFAULT_BUFFER_CAPACITY, DEFAULT_CHANNEL, DEFAULT_RX_TIMEOUT, MTU},
    error::{Error, Result},
    message::MessageBuffer,
    transfer,
    transport::Transport,
};

/// One tagged argument of an outgoing command.
#[derive(Debug, Clone, Copy)]
pub struct Arg<'a> {
    /// Argument tag
    pub id: ArgId,

    /// Argument payload (may be empty)
    pub payload: &'a [u8],
}

impl<'a> Arg<'a> {
    /// Argument with a payload.
    pub fn new(id: ArgId, payload: &'a [u8]) -> Self {
        Self { id, payload }
    }

    /// Payload-less argument used as a pure flag.
    pub fn flag(id: ArgId) -> Self {
        Self { id, payload: &[] }
    }
}

/// Communication context for one HCP session.
///
/// # Examples
///
/// ```no_run
/// use hcplink_core::{Arg, ArgId, Command, HcpComm};
/// # fn run(transport: impl hcplink_core::Transport) -> hcplink_core::Result<()> {
/// let mut comm = HcpComm::new(transport);
///
/// comm.send_command(Command::Capture, Some(Arg::flag(ArgId::Timeout)), None)?;
///
/// let mut status = [0u8; 1];
/// comm.receive_result(Some((ArgId::Result, &mut status)), None)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HcpComm<T> {
    transport: T,
    channel: u16,
    mtu: usize,
    rx_timeout: Duration,
    message: MessageBuffer,
}

impl<T: Transport> HcpComm<T> {
    /// Create a context with the default MTU, channel, timeout, and buffer
    /// capacity.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            channel: DEFAULT_CHANNEL,
            mtu: MTU,
            rx_timeout: DEFAULT_RX_TIMEOUT,
            message: MessageBuffer::new(DEFAULT_BUFFER_CAPACITY),
        }
    }

    /// Set the receive timeout for the first bytes of a response.
    pub fn with_rx_timeout(mut self, timeout: Duration) -> Self {
        self.rx_timeout = timeout;
        self
    }

    /// Set the application buffer capacity (largest message of the session).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.message = MessageBuffer::new(capacity);
        self
    }

    /// Set the logical channel number.
    pub fn with_channel(mut self, channel: u16) -> Self {
        self.channel = channel;
        self
    }

    /// Override the physical MTU (simulated links and tests; real hardware
    /// uses the fixed [`MTU`] constant).
    pub fn with_mtu(mut self, mtu: usize) -> Self {
        self.mtu = mtu;
        self
    }

    /// Configured receive timeout.
    pub fn rx_timeout(&self) -> Duration {
        self.rx_timeout
    }

    /// The message buffer holding the last sent or received message.
    pub fn message(&self) -> &MessageBuffer {
        &self.message
    }

    /// Consume the context, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Encode and transmit one command with up to two arguments.
    ///
    /// The first capacity failure while encoding propagates immediately;
    /// nothing is written to the wire in that case.
    pub fn send_command(
        &mut self,
        command: Command,
        arg1: Option<Arg<'_>>,
        arg2: Option<Arg<'_>>,
    ) -> Result<()> {
        self.message.init(command);
        for arg in [arg1, arg2].into_iter().flatten() {
            self.message.add_arg(arg.id, arg.payload)?;
        }

        debug!(
            args = self.message.arg_count().unwrap_or_default(),
            len = self.message.len(),
            "sending {command}"
        );
        transfer::send_message(
            &mut self.transport,
            self.channel,
            self.message.as_bytes(),
            self.mtu,
        )
    }

    /// Receive one result message and extract up to two expected arguments.
    ///
    /// Each expected argument is copied into its destination slice
    /// (truncated to the slice length if the payload is longer). A missing
    /// *first* expected argument fails the whole call; a missing *second*
    /// one is tolerated and the call still succeeds. Callers that depend
    /// on this asymmetry pass the mandatory argument first.
    ///
    /// The full decoded message stays available through [`Self::message`]
    /// for arguments beyond the two expected slots.
    pub fn receive_result(
        &mut self,
        first: Option<(ArgId, &mut [u8])>,
        second: Option<(ArgId, &mut [u8])>,
    ) -> Result<()> {
        transfer::recv_message(&mut self.transport, &mut self.message, self.rx_timeout, self.mtu)?;

        debug!(
            len = self.message.len(),
            "received result 0x{:04X}",
            self.message.raw_command().unwrap_or_default()
        );

        if let Some((id, dest)) = first {
            let payload = self.message.get_arg(id)?;
            copy_payload(payload, dest);
        }

        if let Some((id, dest)) = second {
            match self.message.get_arg(id) {
                Ok(payload) => copy_payload(payload, dest),
                Err(Error::ArgumentNotFound(_)) => {
                    debug!("optional argument {id} absent, tolerated");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

fn copy_payload(payload: &[u8], dest: &mut [u8]) {
    let n = payload.len().min(dest.len());
    dest[..n].copy_from_slice(&payload[..n]);
}
