use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, info, warn};

use crate::capabilities::{self, CapabilitySet};
use crate::config::Settings;
use crate::descriptor::DeviceDescriptor;
use crate::error::{Error, Result};
use crate::event::InputEvent;
use crate::handle::DeviceFile;
use crate::sys::{SYSNAME_LEN, UI_DEV_CREATE, UI_DEV_DESTROY, ui_get_sysname};

const SYSFS_INPUT_DIR: &str = "/sys/devices/virtual/input";

/// Lifecycle of a virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The uinput node is open, nothing declared yet
    Created,
    /// Capabilities declared
    Registered,
    /// Created in the kernel and settled; events may be written
    Active,
    /// Destroyed and closed
    Closed,
}

/// A virtual device owned by this process.
///
/// This is the shared engine behind every device kind: it drives creation,
/// writes event frames followed by a sync frame, and tears the device down.
/// Dropping a device that was not closed destroys it on a best-effort basis.
pub struct Device {
    file: Option<DeviceFile>,
    state: State,
    descriptor: DeviceDescriptor,
    capabilities: CapabilitySet,
}

impl Device {
    /// Open `path`, declare `capabilities`, write `descriptor` and create the device.
    pub fn create(
        settings: &Settings,
        path: impl AsRef<Path>,
        descriptor: DeviceDescriptor,
        capabilities: CapabilitySet,
    ) -> Result<Self> {
        let file = DeviceFile::open(path)?;
        Self::assemble(settings, file, descriptor, capabilities)
    }

    /// Drive an already open file from `Created` to `Active`.
    ///
    /// The device value doubles as the cleanup guard: whichever step fails,
    /// dropping it releases what was acquired so far.
    pub(crate) fn assemble(
        settings: &Settings,
        file: DeviceFile,
        descriptor: DeviceDescriptor,
        capabilities: CapabilitySet,
    ) -> Result<Self> {
        let mut device = Self {
            file: Some(file),
            state: State::Created,
            descriptor,
            capabilities,
        };

        device.register()?;
        device.write_descriptor()?;
        device.issue_create()?;

        let delay = settings.settle_delay();
        debug!("Waiting {:?} for device to settle", delay);
        thread::sleep(delay);
        device.state = State::Active;

        info!(
            "Created virtual device '{}' ({:04x}:{:04x})",
            device.descriptor.display_name(),
            device.descriptor.id.vendor,
            device.descriptor.id.product
        );

        Ok(device)
    }

    fn register(&mut self) -> Result<()> {
        let file = self.file.take().ok_or(Error::ClosedDevice)?;
        // The registrar consumes the file on failure
        self.file = Some(capabilities::register(file, &self.capabilities)?);
        self.state = State::Registered;
        Ok(())
    }

    fn write_descriptor(&mut self) -> Result<()> {
        let bytes = self.descriptor.to_bytes();
        let file = self.file.as_mut().ok_or(Error::ClosedDevice)?;
        if let Err(e) = file.write_all_once(&bytes) {
            return Err(self.abandon(Error::DescriptorWrite(e)));
        }
        Ok(())
    }

    fn issue_create(&mut self) -> Result<()> {
        let file = self.file.as_mut().ok_or(Error::ClosedDevice)?;
        if let Err(e) = file.control(UI_DEV_CREATE, 0) {
            return Err(self.abandon(Error::Create(e)));
        }
        Ok(())
    }

    // Close the file after a failed setup step; the device was never created.
    fn abandon(&mut self, err: Error) -> Error {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.close() {
                warn!("Closing device file after '{}': {}", err, e);
            }
        }
        self.state = State::Closed;
        err
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Fails with `ClosedDevice` unless events may be written.
    pub(crate) fn ensure_active(&self) -> Result<()> {
        match (self.state, &self.file) {
            (State::Active, Some(_)) => Ok(()),
            _ => Err(Error::ClosedDevice),
        }
    }

    fn active_file(&mut self) -> Result<&mut DeviceFile> {
        match (self.state, self.file.as_mut()) {
            (State::Active, Some(file)) => Ok(file),
            _ => Err(Error::ClosedDevice),
        }
    }

    /// Write `events` in order, then one sync frame.
    pub fn emit(&mut self, events: &[InputEvent]) -> Result<()> {
        let file = self.active_file()?;
        for event in events {
            file.write_frame(event)?;
        }
        file.write_frame(&InputEvent::sync())
    }

    /// Resolve `/sys/devices/virtual/input/inputN` for this device.
    pub fn syspath(&mut self) -> Result<PathBuf> {
        let file = self.active_file()?;
        let mut buf = [0u8; SYSNAME_LEN];
        file.control_read(ui_get_sysname(SYSNAME_LEN), &mut buf)
            .map_err(Error::Syspath)?;

        let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        let sysname = String::from_utf8_lossy(&buf[..len]);
        Ok(Path::new(SYSFS_INPUT_DIR).join(sysname.as_ref()))
    }

    /// Destroy the device and close the file. Only the first call does anything;
    /// later calls fail with `ClosedDevice`.
    pub fn close(&mut self) -> Result<()> {
        if self.state == State::Closed {
            return Err(Error::ClosedDevice);
        }
        let file = self.file.take().ok_or(Error::ClosedDevice)?;
        self.state = State::Closed;

        destroy_and_close(file)?;
        info!("Destroyed virtual device '{}'", self.descriptor.display_name());
        Ok(())
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };

        let result = if self.state == State::Active {
            destroy_and_close(file)
        } else {
            file.close().map_err(Error::Close)
        };

        match result {
            Ok(()) => debug!("Device '{}' cleaned up", self.descriptor.display_name()),
            Err(e) => warn!(
                "Cleanup of device '{}' failed: {}",
                self.descriptor.display_name(),
                e
            ),
        }
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.descriptor.display_name())
            .field("state", &self.state)
            .finish()
    }
}

/// Issue `UI_DEV_DESTROY`, then close the file whatever the destroy returned.
pub(crate) fn destroy_and_close(mut file: DeviceFile) -> Result<()> {
    let destroyed = file.control(UI_DEV_DESTROY, 0);
    let closed = file.close();

    match (destroyed, closed) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(source), closed) => Err(Error::Destroy {
            source,
            close: closed.err(),
        }),
        (Ok(()), Err(e)) => Err(Error::Close(e)),
    }
}
