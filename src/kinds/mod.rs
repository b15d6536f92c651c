//! Per-kind device façades.
//!
//! Each kind carries a fixed capability table and descriptor layout; the
//! lifecycle, registrar and codec underneath are shared through [`Device`].

use std::path::{Path, PathBuf};

use crate::capabilities::{CapabilitySet, CodeType};
use crate::codes::*;
use crate::config::Settings;
use crate::descriptor::{AbsRange, DeviceDescriptor, InputId};
use crate::device::{Device, State};
use crate::error::{Error, Result};

pub mod dial;
pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod multitouch;
pub mod touchpad;

pub use dial::Dial;
pub use gamepad::{Button, Gamepad, HatDirection};
pub use keyboard::Keyboard;
pub use mouse::Mouse;
pub use multitouch::{Contact, ContactMut, MultiTouch};
pub use touchpad::TouchPad;

/// Full scale of gamepad stick and trigger axes.
pub const AXIS_MAX: i32 = 32767;

/// The closed set of device kinds and what each one declares to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    TouchPad {
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    },
    MultiTouch {
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
        max_contacts: u32,
    },
    Gamepad {
        vendor: u16,
        product: u16,
    },
    Dial,
}

impl DeviceKind {
    /// Identity reported by devices of this kind.
    pub fn id(&self) -> InputId {
        match *self {
            DeviceKind::Keyboard => InputId::usb(0x4711, 0x0815, 1),
            DeviceKind::Mouse => InputId::usb(0x4711, 0x0816, 1),
            DeviceKind::TouchPad { .. } => InputId::usb(0x4711, 0x0817, 1),
            DeviceKind::Dial => InputId::usb(0x4711, 0x0818, 1),
            DeviceKind::MultiTouch { .. } => InputId::usb(0, 0, 0),
            DeviceKind::Gamepad { vendor, product } => InputId::usb(vendor, product, 1),
        }
    }

    pub fn capabilities(&self) -> CapabilitySet {
        match self {
            DeviceKind::Keyboard => {
                CapabilitySet::new().with(CodeType::Key, 0..=keys::KEYBOARD_KEY_MAX)
            }
            DeviceKind::Mouse => CapabilitySet::new()
                .with(CodeType::Key, [BTN_LEFT, BTN_RIGHT, BTN_MIDDLE])
                .with(CodeType::Relative, [REL_X, REL_Y, REL_WHEEL, REL_HWHEEL]),
            DeviceKind::TouchPad { .. } => CapabilitySet::new()
                .with(CodeType::Key, [BTN_LEFT, BTN_RIGHT, BTN_TOUCH])
                .with(CodeType::Absolute, [ABS_X, ABS_Y]),
            DeviceKind::MultiTouch { .. } => CapabilitySet::new()
                .with(CodeType::Key, [BTN_TOUCH])
                .with(
                    CodeType::Absolute,
                    [
                        ABS_MT_SLOT,
                        ABS_MT_TRACKING_ID,
                        ABS_MT_POSITION_X,
                        ABS_MT_POSITION_Y,
                    ],
                ),
            DeviceKind::Gamepad { .. } => CapabilitySet::new()
                .with(CodeType::Key, Button::ALL.iter().map(|b| b.to_code()))
                .with(
                    CodeType::Absolute,
                    [
                        ABS_X, ABS_Y, ABS_Z, ABS_RX, ABS_RY, ABS_RZ, ABS_HAT0X, ABS_HAT0Y,
                    ],
                ),
            DeviceKind::Dial => CapabilitySet::new().with(CodeType::Relative, [REL_WHEEL]),
        }
    }

    /// Build the registration record, validating the name and kind parameters.
    pub fn descriptor(&self, name: &[u8]) -> Result<DeviceDescriptor> {
        let mut descriptor = DeviceDescriptor::new(name, self.id())?;

        match *self {
            DeviceKind::TouchPad {
                min_x,
                max_x,
                min_y,
                max_y,
            } => {
                descriptor
                    .set_abs(ABS_X, AbsRange::new(min_x, max_x))
                    .set_abs(ABS_Y, AbsRange::new(min_y, max_y));
            }
            DeviceKind::MultiTouch {
                min_x,
                max_x,
                min_y,
                max_y,
                max_contacts,
            } => {
                if max_contacts == 0 {
                    return Err(Error::InvalidContactCount(max_contacts));
                }
                let top = i32::try_from(max_contacts - 1)
                    .map_err(|_| Error::InvalidContactCount(max_contacts))?;
                descriptor
                    .set_abs(ABS_MT_SLOT, AbsRange::new(0, top))
                    .set_abs(ABS_MT_TRACKING_ID, AbsRange::new(0, top))
                    .set_abs(ABS_MT_POSITION_X, AbsRange::new(min_x, max_x))
                    .set_abs(ABS_MT_POSITION_Y, AbsRange::new(min_y, max_y));
            }
            DeviceKind::Gamepad { .. } => {
                for axis in [ABS_X, ABS_Y, ABS_Z, ABS_RX, ABS_RY, ABS_RZ] {
                    descriptor.set_abs(axis, AbsRange::new(-AXIS_MAX, AXIS_MAX));
                }
                for hat in [ABS_HAT0X, ABS_HAT0Y] {
                    descriptor.set_abs(hat, AbsRange::new(-1, 1));
                }
            }
            DeviceKind::Keyboard | DeviceKind::Mouse | DeviceKind::Dial => {}
        }

        Ok(descriptor)
    }

    /// Validate, open `path` and bring up a device of this kind.
    ///
    /// The path is checked before the name, and both before any file is opened.
    pub fn create(&self, settings: &Settings, path: &Path, name: &[u8]) -> Result<Device> {
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyPath);
        }
        let descriptor = self.descriptor(name)?;
        Device::create(settings, path, descriptor, self.capabilities())
    }
}

/// Operations every device kind shares.
pub trait VirtualDevice {
    fn device(&self) -> &Device;

    fn device_mut(&mut self) -> &mut Device;

    fn state(&self) -> State {
        self.device().state()
    }

    /// `/sys/devices/virtual/input/inputN` for this device
    fn syspath(&mut self) -> Result<PathBuf> {
        self.device_mut().syspath()
    }

    /// Destroy the device and release the file. Fails with `ClosedDevice` the second time.
    fn close(&mut self) -> Result<()> {
        self.device_mut().close()
    }
}

pub(crate) fn check_key(code: u16, max: u16) -> Result<()> {
    if code > max {
        return Err(Error::InvalidKeycode { code, max });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::device::testing as device_testing;
    use crate::handle::testing::Log;
    use std::sync::{Arc, Mutex};

    pub fn recorded(kind: DeviceKind, name: &str) -> (Device, Arc<Mutex<Log>>) {
        let descriptor = kind.descriptor(name.as_bytes()).unwrap();
        device_testing::recorded(descriptor, kind.capabilities())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [DeviceKind; 6] = [
        DeviceKind::Keyboard,
        DeviceKind::Mouse,
        DeviceKind::TouchPad {
            min_x: 0,
            max_x: 1919,
            min_y: 0,
            max_y: 1079,
        },
        DeviceKind::MultiTouch {
            min_x: 0,
            max_x: 1919,
            min_y: 0,
            max_y: 1079,
            max_contacts: 3,
        },
        DeviceKind::Gamepad {
            vendor: 0x045e,
            product: 0x028e,
        },
        DeviceKind::Dial,
    ];

    #[test]
    fn every_kind_rejects_bad_input_before_opening() {
        let settings = Settings::default();
        for kind in KINDS {
            assert!(matches!(
                kind.create(&settings, Path::new(""), b"dev"),
                Err(Error::EmptyPath)
            ));
            assert!(matches!(
                kind.create(&settings, Path::new("/some/bogus/path"), &[b'x'; 81]),
                Err(Error::NameTooLong { .. })
            ));
            assert!(matches!(
                kind.create(&settings, Path::new("/some/bogus/path"), b""),
                Err(Error::NameEmpty)
            ));
            assert!(matches!(
                kind.create(&settings, Path::new("/some/bogus/path"), b"dev"),
                Err(Error::PathNotFound { .. })
            ));
        }
    }

    #[test]
    fn keyboard_registers_the_standard_range() {
        let caps = DeviceKind::Keyboard.capabilities();
        let codes = caps.codes(CodeType::Key);
        assert_eq!(codes.len(), 249);
        assert_eq!(codes.first(), Some(&0));
        assert_eq!(codes.last(), Some(&keys::KEY_MICMUTE));
    }

    #[test]
    fn gamepad_tables() {
        let kind = DeviceKind::Gamepad {
            vendor: 0x054c,
            product: 0x09cc,
        };
        let caps = kind.capabilities();
        assert_eq!(caps.codes(CodeType::Key).len(), 17);
        assert_eq!(caps.codes(CodeType::Absolute).len(), 8);

        let desc = kind.descriptor(b"pad").unwrap();
        assert_eq!(desc.id, InputId::usb(0x054c, 0x09cc, 1));
        assert_eq!(desc.abs(ABS_X), Some(AbsRange::new(-32767, 32767)));
        assert_eq!(desc.abs(ABS_RZ), Some(AbsRange::new(-32767, 32767)));
        assert_eq!(desc.abs(ABS_HAT0Y), Some(AbsRange::new(-1, 1)));
    }

    #[test]
    fn dial_only_has_the_wheel() {
        let caps = DeviceKind::Dial.capabilities();
        assert_eq!(caps.iter().count(), 1);
        assert_eq!(caps.codes(CodeType::Relative), &[REL_WHEEL]);
    }

    #[test]
    fn multitouch_slot_range_matches_contact_count() {
        let kind = DeviceKind::MultiTouch {
            min_x: 0,
            max_x: 100,
            min_y: 0,
            max_y: 50,
            max_contacts: 4,
        };
        let desc = kind.descriptor(b"panel").unwrap();
        assert_eq!(desc.abs(ABS_MT_SLOT), Some(AbsRange::new(0, 3)));
        assert_eq!(desc.abs(ABS_MT_TRACKING_ID), Some(AbsRange::new(0, 3)));
        assert_eq!(desc.abs(ABS_MT_POSITION_Y), Some(AbsRange::new(0, 50)));
        assert_eq!(desc.id, InputId::usb(0, 0, 0));
        assert_eq!(desc.id.bustype, crate::descriptor::BUS_USB);
    }

    #[test]
    fn zero_contacts_is_rejected() {
        let kind = DeviceKind::MultiTouch {
            min_x: 0,
            max_x: 100,
            min_y: 0,
            max_y: 50,
            max_contacts: 0,
        };
        assert!(matches!(
            kind.descriptor(b"panel"),
            Err(Error::InvalidContactCount(0))
        ));
    }

    #[test]
    fn out_of_range_key_is_rejected() {
        assert!(check_key(keys::KEYBOARD_KEY_MAX, keys::KEYBOARD_KEY_MAX).is_ok());
        assert!(matches!(
            check_key(249, keys::KEYBOARD_KEY_MAX),
            Err(Error::InvalidKeycode { code: 249, max: 248 })
        ));
    }
}
