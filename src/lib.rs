//! vhid - virtual HID devices through Linux uinput
//!
//! This library creates kernel-level virtual keyboards, mice, touchpads,
//! multi-touch panels, gamepads and dials, and writes input events through
//! them so the rest of the system sees real hardware.
//!
//! ```no_run
//! use vhid::{Keyboard, VirtualDevice, keys};
//!
//! let mut kb = Keyboard::create("/dev/uinput", "my keyboard")?;
//! kb.key_press(keys::KEY_A)?;
//! kb.close()?;
//! # Ok::<(), vhid::Error>(())
//! ```

pub mod capabilities;
pub mod codes;
pub mod config;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod event;
pub mod handle;
pub mod kinds;
pub mod sys;
pub mod templates;

// Re-export commonly used types
pub use capabilities::{CapabilitySet, CodeType};
pub use codes::keys;
pub use config::Settings;
pub use descriptor::{AbsRange, DeviceDescriptor, InputId};
pub use device::{Device, State};
pub use error::{Error, Result};
pub use event::InputEvent;
pub use handle::DeviceFile;
pub use kinds::{
    Button, Contact, ContactMut, DeviceKind, Dial, Gamepad, HatDirection, Keyboard, Mouse,
    MultiTouch, TouchPad, VirtualDevice,
};
pub use templates::{GamepadIdentity, GamepadTemplates};
