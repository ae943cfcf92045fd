//! High-level module interface
//!
//! Biometric operations expressed as command/result sequences over the
//! dispatch API. No protocol logic lives here: every operation is an
//! opaque caller of `send_command` / `receive_result`, mirroring the
//! firmware's own flows (enroll is a sample loop driven by the module's
//! remaining-samples counter, identify is capture + extract + lookup).

use std::time::Duration;

use tracing::{debug, info};

use hcplink_core::{Arg, ArgId, Command, HcpComm, Transport};

use crate::error::{Error, Result};

/// Default finger-capture timeout handed to the module, in milliseconds.
pub const DEFAULT_CAPTURE_TIMEOUT_MS: u16 = 5000;

/// Fingerprint module attached through an HCP session.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use hcplink::Device;
/// use hcplink_transport::TcpTransport;
///
/// fn main() -> hcplink::Result<()> {
///     let bridge = TcpTransport::connect("192.168.1.50:4400", Duration::from_secs(5))?;
///     let mut device = Device::new(bridge);
///
///     println!("module version: {}", device.version()?);
///
///     match device.identify_finger()? {
///         Some(id) => println!("match with template id {id}"),
///         None => println!("no match"),
///     }
///     Ok(())
/// }
/// ```
pub struct Device<T> {
    comm: HcpComm<T>,
}

impl<T: Transport> Device<T> {
    /// Create a device over `transport` with default session parameters.
    pub fn new(transport: T) -> Self {
        Self {
            comm: HcpComm::new(transport),
        }
    }

    /// Set the receive timeout used while waiting for the module.
    pub fn with_rx_timeout(mut self, timeout: Duration) -> Self {
        self.comm = self.comm.with_rx_timeout(timeout);
        self
    }

    /// Set the application buffer capacity (bounds template/image sizes).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.comm = self.comm.with_capacity(capacity);
        self
    }

    /// Access the underlying communication context.
    pub fn comm(&mut self) -> &mut HcpComm<T> {
        &mut self.comm
    }

    /// Query the firmware version string.
    pub fn version(&mut self) -> Result<String> {
        self.comm
            .send_command(Command::Info, Some(Arg::flag(ArgId::Get)), None)?;

        let mut version = [0u8; 100];
        self.comm
            .receive_result(Some((ArgId::Version, &mut version)), None)?;

        let end = version.iter().position(|b| *b == 0).unwrap_or(version.len());
        Ok(String::from_utf8_lossy(&version[..end]).into_owned())
    }

    /// Capture a finger image, waiting up to `timeout_ms` on the sensor.
    pub fn capture(&mut self, timeout_ms: u16) -> Result<()> {
        let timeout = timeout_ms.to_ne_bytes();
        self.command_ok(Command::Capture, Some(Arg::new(ArgId::Timeout, &timeout)), None)
    }

    /// Block until a finger rests on the sensor.
    pub fn wait_finger_down(&mut self) -> Result<()> {
        self.command_ok(Command::Wait, Some(Arg::flag(ArgId::FingerDown)), None)
    }

    /// Block until the sensor is free again.
    pub fn wait_finger_up(&mut self) -> Result<()> {
        self.command_ok(Command::Wait, Some(Arg::flag(ArgId::FingerUp)), None)
    }

    /// Enroll a finger.
    ///
    /// Drives the module's sample loop: capture and add samples until the
    /// module reports zero remaining, then finalize. The enrolled template
    /// stays in module RAM; persist it with [`Self::template_save`].
    pub fn enroll_finger(&mut self) -> Result<()> {
        self.command_ok(Command::Enroll, Some(Arg::flag(ArgId::Start)), None)?;

        loop {
            self.wait_finger_down()?;
            self.capture(DEFAULT_CAPTURE_TIMEOUT_MS)?;

            self.comm
                .send_command(Command::Enroll, Some(Arg::flag(ArgId::Add)), None)?;

            let mut code = [0u8; 1];
            let mut remaining = [0u8; 4];
            self.comm.receive_result(
                Some((ArgId::Result, &mut code)),
                Some((ArgId::Count, &mut remaining)),
            )?;
            self.check_code(code[0])?;

            let remaining = u32::from_ne_bytes(remaining);
            info!(remaining, "enroll sample accepted");

            self.wait_finger_up()?;
            if remaining == 0 {
                break;
            }
        }

        self.command_ok(Command::Enroll, Some(Arg::flag(ArgId::Finish)), None)
    }

    /// Capture a finger and identify it against the stored templates.
    ///
    /// Returns the matching template id, or `None` when nothing matched.
    pub fn identify_finger(&mut self) -> Result<Option<u16>> {
        self.wait_finger_down()?;
        self.capture(DEFAULT_CAPTURE_TIMEOUT_MS)?;
        self.command_ok(Command::Image, Some(Arg::flag(ArgId::Extract)), None)?;

        self.comm.send_command(Command::Identify, None, None)?;

        let mut matched = [0u8; 1];
        let mut id = [0u8; 2];
        self.comm.receive_result(
            Some((ArgId::Match, &mut matched)),
            Some((ArgId::Id, &mut id)),
        )?;

        if matched[0] != 0 {
            Ok(Some(u16::from_ne_bytes(id)))
        } else {
            Ok(None)
        }
    }

    /// Persist the template enrolled in module RAM under `id`.
    pub fn template_save(&mut self, id: u16) -> Result<()> {
        let id = id.to_ne_bytes();
        self.command_ok(
            Command::StorageTemplate,
            Some(Arg::flag(ArgId::Save)),
            Some(Arg::new(ArgId::Id, &id)),
        )
    }

    /// Delete the stored template `id`.
    pub fn template_remove(&mut self, id: u16) -> Result<()> {
        let id = id.to_ne_bytes();
        self.command_ok(
            Command::StorageTemplate,
            Some(Arg::flag(ArgId::Delete)),
            Some(Arg::new(ArgId::Id, &id)),
        )
    }

    /// Delete every stored template.
    pub fn template_remove_all(&mut self) -> Result<()> {
        self.command_ok(
            Command::StorageTemplate,
            Some(Arg::flag(ArgId::Delete)),
            Some(Arg::flag(ArgId::All)),
        )
    }

    /// Download the stored template `id` from the module.
    pub fn template_get(&mut self, id: u16) -> Result<Vec<u8>> {
        let id = id.to_ne_bytes();
        self.comm.send_command(
            Command::StorageTemplate,
            Some(Arg::flag(ArgId::Upload)),
            Some(Arg::new(ArgId::Id, &id)),
        )?;

        self.comm.receive_result(None, None)?;
        self.check_message_code()?;

        let data = self.comm.message().get_arg(ArgId::Data)?;
        debug!(len = data.len(), "template downloaded");
        Ok(data.to_vec())
    }

    /// Upload template bytes into module RAM under `id`.
    pub fn template_put(&mut self, id: u16, template: &[u8]) -> Result<()> {
        let id = id.to_ne_bytes();
        self.command_ok(
            Command::StorageTemplate,
            Some(Arg::new(ArgId::Download, template)),
            Some(Arg::new(ArgId::Id, &id)),
        )
    }

    /// Size in bytes of the last captured image.
    pub fn image_get_size(&mut self) -> Result<u32> {
        self.comm
            .send_command(Command::Image, Some(Arg::flag(ArgId::Size)), None)?;

        let mut size = [0u8; 4];
        self.comm
            .receive_result(Some((ArgId::Size, &mut size)), None)?;
        Ok(u32::from_ne_bytes(size))
    }

    /// Download the last captured image.
    ///
    /// The session's buffer capacity must cover the image size reported by
    /// [`Self::image_get_size`].
    pub fn image_get(&mut self) -> Result<Vec<u8>> {
        self.comm
            .send_command(Command::Image, Some(Arg::flag(ArgId::Upload)), None)?;

        self.comm.receive_result(None, None)?;
        self.check_message_code()?;

        let data = self.comm.message().get_arg(ArgId::Data)?;
        debug!(len = data.len(), "image downloaded");
        Ok(data.to_vec())
    }

    /// Reboot the module.
    pub fn reset(&mut self) -> Result<()> {
        self.command_ok(Command::Reset, None, None)
    }

    /// Send one command and require a zero result code back.
    fn command_ok(
        &mut self,
        command: Command,
        arg1: Option<Arg<'_>>,
        arg2: Option<Arg<'_>>,
    ) -> Result<()> {
        self.comm.send_command(command, arg1, arg2)?;

        let mut code = [0u8; 1];
        self.comm
            .receive_result(Some((ArgId::Result, &mut code)), None)?;
        self.check_code(code[0])
    }

    /// Check an optional result code carried by the buffered message.
    fn check_message_code(&self) -> Result<()> {
        match self.comm.message().get_arg(ArgId::Result) {
            Ok(code) => self.check_code(code.first().copied().unwrap_or(0)),
            Err(hcplink_core::Error::ArgumentNotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn check_code(&self, code: u8) -> Result<()> {
        if code != 0 {
            return Err(Error::ModuleError { code });
        }
        Ok(())
    }
}
