use std::path::Path;

use crate::codes::{ABS_X, ABS_Y, BTN_LEFT, BTN_RIGHT, BTN_TOUCH, EV_ABS, EV_KEY};
use crate::config::Settings;
use crate::device::Device;
use crate::error::Result;
use crate::event::InputEvent;

use super::{DeviceKind, VirtualDevice};

/// Single-contact absolute pointer.
#[derive(Debug)]
pub struct TouchPad {
    device: Device,
}

impl TouchPad {
    pub fn create(
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) -> Result<Self> {
        Self::create_with(&Settings::from_env(), path, name, min_x, max_x, min_y, max_y)
    }

    pub fn create_with(
        settings: &Settings,
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) -> Result<Self> {
        let kind = DeviceKind::TouchPad {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        let device = kind.create(settings, path.as_ref(), name.as_ref())?;
        Ok(Self { device })
    }

    /// Jump to an absolute position.
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.device.emit(&[
            InputEvent::new(EV_ABS, ABS_X, x),
            InputEvent::new(EV_ABS, ABS_Y, y),
        ])
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

    pub fn touch_down(&mut self) -> Result<()> {
        self.button(BTN_TOUCH, 1)
    }

    pub fn touch_up(&mut self) -> Result<()> {
        self.button(BTN_TOUCH, 0)
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

impl VirtualDevice for TouchPad {
    fn device(&self) -> &Device {
        &self.device
    }

    fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::handle::testing::Log;
    use crate::kinds::testing::recorded;
    use std::sync::{Arc, Mutex};

    fn touchpad() -> (TouchPad, Arc<Mutex<Log>>) {
        let kind = DeviceKind::TouchPad {
            min_x: 0,
            max_x: 1919,
            min_y: 0,
            max_y: 1079,
        };
        let (device, log) = recorded(kind, "test touchpad");
        (TouchPad { device }, log)
    }

    #[test]
    fn move_to_sends_x_then_y() {
        let (mut pad, log) = touchpad();
        pad.move_to(0, 0).unwrap();
        pad.move_to(640, 480).unwrap();
        assert_eq!(
            log.lock().unwrap().frames(),
            vec![
                InputEvent::new(EV_ABS, ABS_X, 0),
                InputEvent::new(EV_ABS, ABS_Y, 0),
                InputEvent::sync(),
                InputEvent::new(EV_ABS, ABS_X, 640),
                InputEvent::new(EV_ABS, ABS_Y, 480),
                InputEvent::sync(),
            ]
        );
    }

    #[test]
    fn touch_toggles_btn_touch() {
        let (mut pad, log) = touchpad();
        pad.touch_down().unwrap();
        pad.touch_up().unwrap();
        assert_eq!(
            log.lock().unwrap().frames(),
            vec![
                InputEvent::new(EV_KEY, BTN_TOUCH, 1),
                InputEvent::sync(),
                InputEvent::new(EV_KEY, BTN_TOUCH, 0),
                InputEvent::sync(),
            ]
        );
    }

    #[test]
    fn closed_touchpad_rejects_events() {
        let (mut pad, _log) = touchpad();
        pad.close().unwrap();
        assert!(matches!(pad.move_to(1, 1), Err(Error::ClosedDevice)));
        assert!(matches!(pad.syspath(), Err(Error::ClosedDevice)));
    }
}
