use std::path::Path;

use crate::codes::{EV_REL, REL_WHEEL};
use crate::config::Settings;
use crate::device::Device;
use crate::error::Result;
use crate::event::InputEvent;

use super::{DeviceKind, VirtualDevice};

/// Rotary dial reporting on the wheel axis.
#[derive(Debug)]
pub struct Dial {
    device: Device,
}

impl Dial {
    pub fn create(path: impl AsRef<Path>, name: impl AsRef<[u8]>) -> Result<Self> {
        Self::create_with(&Settings::from_env(), path, name)
    }

    pub fn create_with(
        settings: &Settings,
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
    ) -> Result<Self> {
        let device = DeviceKind::Dial.create(settings, path.as_ref(), name.as_ref())?;
        Ok(Self { device })
    }

    /// Positive turns clockwise.
    pub fn turn(&mut self, delta: i32) -> Result<()> {
        self.device.emit(&[InputEvent::new(EV_REL, REL_WHEEL, delta)])
    }
}

impl VirtualDevice for Dial {
    fn device(&self) -> &Device {
        &self.device
    }

    fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }
}
