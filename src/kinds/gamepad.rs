use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codes::*;
use crate::config::Settings;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::event::InputEvent;
use crate::templates::GamepadIdentity;

use super::{AXIS_MAX, DeviceKind, VirtualDevice, check_key};

/// Gamepad buttons, named by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    South,
    East,
    North,
    West,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    LeftStick,
    RightStick,
    Select,
    Start,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Mode,
    /// Any other key code. Not registered with the kernel unless it matches one above.
    Custom(u16),
}

impl Button {
    /// Every button a gamepad registers.
    pub const ALL: [Button; 17] = [
        Button::South,
        Button::East,
        Button::North,
        Button::West,
        Button::LeftBumper,
        Button::RightBumper,
        Button::LeftTrigger,
        Button::RightTrigger,
        Button::LeftStick,
        Button::RightStick,
        Button::Select,
        Button::Start,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadLeft,
        Button::DPadRight,
        Button::Mode,
    ];

    pub fn to_code(self) -> u16 {
        match self {
            Button::South => BTN_SOUTH,
            Button::East => BTN_EAST,
            Button::North => BTN_NORTH,
            Button::West => BTN_WEST,
            Button::LeftBumper => BTN_TL,
            Button::RightBumper => BTN_TR,
            Button::LeftTrigger => BTN_TL2,
            Button::RightTrigger => BTN_TR2,
            Button::LeftStick => BTN_THUMBL,
            Button::RightStick => BTN_THUMBR,
            Button::Select => BTN_SELECT,
            Button::Start => BTN_START,
            Button::DPadUp => BTN_DPAD_UP,
            Button::DPadDown => BTN_DPAD_DOWN,
            Button::DPadLeft => BTN_DPAD_LEFT,
            Button::DPadRight => BTN_DPAD_RIGHT,
            Button::Mode => BTN_MODE,
            Button::Custom(code) => code,
        }
    }

    pub fn from_code(code: u16) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.to_code() == code)
            .unwrap_or(Button::Custom(code))
    }

    /// Parse names like `south`, `start` or `dpad-up`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase().replace(['-', '_'], "");
        let button = match name.as_str() {
            "south" | "a" => Button::South,
            "east" | "b" => Button::East,
            "north" | "y" => Button::North,
            "west" | "x" => Button::West,
            "leftbumper" | "lb" | "tl" => Button::LeftBumper,
            "rightbumper" | "rb" | "tr" => Button::RightBumper,
            "lefttrigger" | "lt" | "tl2" => Button::LeftTrigger,
            "righttrigger" | "rt" | "tr2" => Button::RightTrigger,
            "leftstick" | "thumbl" => Button::LeftStick,
            "rightstick" | "thumbr" => Button::RightStick,
            "select" | "back" => Button::Select,
            "start" => Button::Start,
            "dpadup" => Button::DPadUp,
            "dpaddown" => Button::DPadDown,
            "dpadleft" => Button::DPadLeft,
            "dpadright" => Button::DPadRight,
            "mode" | "guide" => Button::Mode,
            _ => return None,
        };
        Some(button)
    }
}

/// Directions of the first hat switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HatDirection {
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
}

impl HatDirection {
    /// Axis code and pressed value
    pub fn axis(self) -> (u16, i32) {
        match self {
            HatDirection::Up => (ABS_HAT0Y, -1),
            HatDirection::Down => (ABS_HAT0Y, 1),
            HatDirection::Left => (ABS_HAT0X, -1),
            HatDirection::Right => (ABS_HAT0X, 1),
        }
    }
}

/// Only the four press directions have numeric forms; releasing goes
/// through [`Gamepad::hat_release`] with the same direction.
impl TryFrom<i32> for HatDirection {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(HatDirection::Up),
            2 => Ok(HatDirection::Down),
            3 => Ok(HatDirection::Left),
            4 => Ok(HatDirection::Right),
            other => Err(Error::InvalidDirection(other)),
        }
    }
}

/// Map `[-1.0, 1.0]` onto the axis range, truncating toward zero.
pub fn denormalize(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(-1.0, 1.0) * AXIS_MAX as f32) as i32
}

/// Dual-stick gamepad with analog triggers and one hat.
#[derive(Debug)]
pub struct Gamepad {
    device: Device,
}

impl Gamepad {
    pub fn create(
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
        vendor: u16,
        product: u16,
    ) -> Result<Self> {
        Self::create_with(&Settings::from_env(), path, name, vendor, product)
    }

    pub fn create_with(
        settings: &Settings,
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
        vendor: u16,
        product: u16,
    ) -> Result<Self> {
        let kind = DeviceKind::Gamepad { vendor, product };
        let device = kind.create(settings, path.as_ref(), name.as_ref())?;
        Ok(Self { device })
    }

    /// Create a gamepad that reports a preset name and vendor/product pair.
    pub fn from_identity(
        settings: &Settings,
        path: impl AsRef<Path>,
        identity: &GamepadIdentity,
    ) -> Result<Self> {
        Self::create_with(
            settings,
            path,
            &identity.name,
            identity.vendor_id,
            identity.product_id,
        )
    }

    pub fn button_press(&mut self, button: Button) -> Result<()> {
        let code = self.checked(button)?;
        self.device.emit(&[
            InputEvent::new(EV_KEY, code, 1),
            InputEvent::new(EV_KEY, code, 0),
        ])
    }

    pub fn button_down(&mut self, button: Button) -> Result<()> {
        let code = self.checked(button)?;
        self.device.emit(&[InputEvent::new(EV_KEY, code, 1)])
    }

    pub fn button_up(&mut self, button: Button) -> Result<()> {
        let code = self.checked(button)?;
        self.device.emit(&[InputEvent::new(EV_KEY, code, 0)])
    }

    fn checked(&self, button: Button) -> Result<u16> {
        self.device.ensure_active()?;
        let code = button.to_code();
        check_key(code, KEY_MAX)?;
        Ok(code)
    }

    pub fn left_stick_move_x(&mut self, value: f32) -> Result<()> {
        self.axis(ABS_X, value)
    }

    pub fn left_stick_move_y(&mut self, value: f32) -> Result<()> {
        self.axis(ABS_Y, value)
    }

    pub fn right_stick_move_x(&mut self, value: f32) -> Result<()> {
        self.axis(ABS_RX, value)
    }

    pub fn right_stick_move_y(&mut self, value: f32) -> Result<()> {
        self.axis(ABS_RY, value)
    }

    /// Move both left stick axes in one report.
    pub fn left_stick_move(&mut self, x: f32, y: f32) -> Result<()> {
        self.stick(ABS_X, ABS_Y, x, y)
    }

    pub fn right_stick_move(&mut self, x: f32, y: f32) -> Result<()> {
        self.stick(ABS_RX, ABS_RY, x, y)
    }

    pub fn left_trigger_force(&mut self, value: f32) -> Result<()> {
        self.axis(ABS_Z, value)
    }

    pub fn right_trigger_force(&mut self, value: f32) -> Result<()> {
        self.axis(ABS_RZ, value)
    }

    pub fn hat_press(&mut self, direction: HatDirection) -> Result<()> {
        let (axis, value) = direction.axis();
        self.device.emit(&[InputEvent::new(EV_ABS, axis, value)])
    }

    pub fn hat_release(&mut self, direction: HatDirection) -> Result<()> {
        let (axis, _) = direction.axis();
        self.device.emit(&[InputEvent::new(EV_ABS, axis, 0)])
    }

    fn axis(&mut self, code: u16, value: f32) -> Result<()> {
        self.device
            .emit(&[InputEvent::new(EV_ABS, code, denormalize(value))])
    }

    fn stick(&mut self, x_code: u16, y_code: u16, x: f32, y: f32) -> Result<()> {
        self.device.emit(&[
            InputEvent::new(EV_ABS, x_code, denormalize(x)),
            InputEvent::new(EV_ABS, y_code, denormalize(y)),
        ])
    }
}

impl VirtualDevice for Gamepad {
    fn device(&self) -> &Device {
        &self.device
    }

    fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }
}
