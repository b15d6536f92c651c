use std::path::Path;

use crate::codes::{BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, EV_KEY, EV_REL, REL_HWHEEL, REL_WHEEL, REL_X, REL_Y};
use crate::config::Settings;
use crate::device::Device;
use crate::error::Result;
use crate::event::InputEvent;

use super::{DeviceKind, VirtualDevice};

/// Relative pointer with three buttons and two wheels.
#[derive(Debug)]
pub struct Mouse {
    device: Device,
}

impl Mouse {
    pub fn create(path: impl AsRef<Path>, name: impl AsRef<[u8]>) -> Result<Self> {
        Self::create_with(&Settings::from_env(), path, name)
    }

    pub fn create_with(
        settings: &Settings,
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
    ) -> Result<Self> {
        let device = DeviceKind::Mouse.create(settings, path.as_ref(), name.as_ref())?;
        Ok(Self { device })
    }

    pub fn move_left(&mut self, pixels: i32) -> Result<()> {
        self.rel(REL_X, pixels.saturating_neg())
    }

    pub fn move_right(&mut self, pixels: i32) -> Result<()> {
        self.rel(REL_X, pixels)
    }

    pub fn move_up(&mut self, pixels: i32) -> Result<()> {
        self.rel(REL_Y, pixels.saturating_neg())
    }

    pub fn move_down(&mut self, pixels: i32) -> Result<()> {
        self.rel(REL_Y, pixels)
    }

    /// Move along both axes in one report.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.device.emit(&[
            InputEvent::new(EV_REL, REL_X, dx),
            InputEvent::new(EV_REL, REL_Y, dy),
        ])
    }

    /// Scroll by `delta` notches on the vertical or horizontal wheel.
    pub fn wheel(&mut self, horizontal: bool, delta: i32) -> Result<()> {
        let code = if horizontal { REL_HWHEEL } else { REL_WHEEL };
        self.rel(code, delta)
    }

    pub fn left_click(&mut self) -> Result<()> {
        self.click(BTN_LEFT)
    }

    pub fn left_press(&mut self) -> Result<()> {
        self.button(BTN_LEFT, 1)
    }

    pub fn left_release(&mut self) -> Result<()> {
        self.button(BTN_LEFT, 0)
    }

    pub fn right_click(&mut self) -> Result<()> {
        self.click(BTN_RIGHT)
    }

    pub fn right_press(&mut self) -> Result<()> {
        self.button(BTN_RIGHT, 1)
    }

    pub fn right_release(&mut self) -> Result<()> {
        self.button(BTN_RIGHT, 0)
    }

    pub fn middle_click(&mut self) -> Result<()> {
        self.click(BTN_MIDDLE)
    }

    pub fn middle_press(&mut self) -> Result<()> {
        self.button(BTN_MIDDLE, 1)
    }

    pub fn middle_release(&mut self) -> Result<()> {
        self.button(BTN_MIDDLE, 0)
    }

    fn rel(&mut self, code: u16, value: i32) -> Result<()> {
        self.device.emit(&[InputEvent::new(EV_REL, code, value)])
    }

    fn click(&mut self, code: u16) -> Result<()> {
        self.device.emit(&[
            InputEvent::new(EV_KEY, code, 1),
            InputEvent::new(EV_KEY, code, 0),
        ])
    }

    fn button(&mut self, code: u16, value: i32) -> Result<()> {
        self.device.emit(&[InputEvent::new(EV_KEY, code, value)])
    }
}

impl VirtualDevice for Mouse {
    fn device(&self) -> &Device {
        &self.device
    }

    fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }
}
