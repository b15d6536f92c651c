use std::path::Path;

use crate::codes::{EV_KEY, keys::KEYBOARD_KEY_MAX};
use crate::config::Settings;
use crate::device::Device;
use crate::error::Result;
use crate::event::InputEvent;

use super::{DeviceKind, VirtualDevice, check_key};

/// Virtual keyboard accepting key codes `0..=KEY_MICMUTE`.
#[derive(Debug)]
pub struct Keyboard {
    device: Device,
}

impl Keyboard {
    pub fn create(path: impl AsRef<Path>, name: impl AsRef<[u8]>) -> Result<Self> {
        Self::create_with(&Settings::from_env(), path, name)
    }

    pub fn create_with(
        settings: &Settings,
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
    ) -> Result<Self> {
        let device = DeviceKind::Keyboard.create(settings, path.as_ref(), name.as_ref())?;
        Ok(Self { device })
    }

    /// Press and release `key`, reported as one group.
    pub fn key_press(&mut self, key: u16) -> Result<()> {
        self.device.ensure_active()?;
        check_key(key, KEYBOARD_KEY_MAX)?;
        self.device.emit(&[
            InputEvent::new(EV_KEY, key, 1),
            InputEvent::new(EV_KEY, key, 0),
        ])
    }

    pub fn key_down(&mut self, key: u16) -> Result<()> {
        self.device.ensure_active()?;
        check_key(key, KEYBOARD_KEY_MAX)?;
        self.device.emit(&[InputEvent::new(EV_KEY, key, 1)])
    }

    pub fn key_up(&mut self, key: u16) -> Result<()> {
        self.device.ensure_active()?;
        check_key(key, KEYBOARD_KEY_MAX)?;
        self.device.emit(&[InputEvent::new(EV_KEY, key, 0)])
    }
}

impl VirtualDevice for Keyboard {
    fn device(&self) -> &Device {
        &self.device
    }

    fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }
}
