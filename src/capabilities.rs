use tracing::{debug, warn};

use crate::codes::{EV_ABS, EV_KEY, EV_REL};
use crate::device::destroy_and_close;
use crate::error::{Error, Result};
use crate::handle::DeviceFile;
use crate::sys::{UI_SET_ABSBIT, UI_SET_EVBIT, UI_SET_KEYBIT, UI_SET_RELBIT};

/// Event types whose individual codes are declared through their own ioctl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeType {
    Key,
    Relative,
    Absolute,
}

impl CodeType {
    pub fn event_type(self) -> u16 {
        match self {
            CodeType::Key => EV_KEY,
            CodeType::Relative => EV_REL,
            CodeType::Absolute => EV_ABS,
        }
    }

    fn request(self) -> u64 {
        match self {
            CodeType::Key => UI_SET_KEYBIT,
            CodeType::Relative => UI_SET_RELBIT,
            CodeType::Absolute => UI_SET_ABSBIT,
        }
    }
}

/// Which event types, and which codes under each, a device will emit.
///
/// Entries keep insertion order, which is the order the ioctls are issued in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    entries: Vec<(CodeType, Vec<u16>)>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a type and the given codes under it. Duplicates are dropped.
    pub fn with(mut self, code_type: CodeType, codes: impl IntoIterator<Item = u16>) -> Self {
        let idx = match self.entries.iter().position(|(t, _)| *t == code_type) {
            Some(idx) => idx,
            None => {
                self.entries.push((code_type, Vec::new()));
                self.entries.len() - 1
            }
        };

        let list = &mut self.entries[idx].1;
        for code in codes {
            if !list.contains(&code) {
                list.push(code);
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (CodeType, &[u16])> {
        self.entries.iter().map(|(t, codes)| (*t, codes.as_slice()))
    }

    pub fn codes(&self, code_type: CodeType) -> &[u16] {
        self.entries
            .iter()
            .find(|(t, _)| *t == code_type)
            .map(|(_, codes)| codes.as_slice())
            .unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn supports(&self, code_type: CodeType, code: u16) -> bool {
        self.codes(code_type).contains(&code)
    }
}

/// Issue the "enable event type" ioctl.
///
/// On failure the device is destroyed and the file closed before the error
/// is returned.
pub fn enable_type(mut file: DeviceFile, code_type: CodeType) -> Result<DeviceFile> {
    let event_type = code_type.event_type();
    match file.control(UI_SET_EVBIT, event_type.into()) {
        Ok(()) => Ok(file),
        Err(source) => {
            if let Err(e) = destroy_and_close(file) {
                warn!("Cleanup after failed evbit {:#x} registration: {}", event_type, e);
            }
            Err(Error::CapabilityRegistration {
                event_type,
                code: None,
                source,
            })
        }
    }
}

/// Issue the per-type "enable code" ioctl. The type must already be enabled.
///
/// On failure the file is closed (the device was never created, so there is
/// nothing to destroy).
pub fn enable_code(mut file: DeviceFile, code_type: CodeType, code: u16) -> Result<DeviceFile> {
    match file.control(code_type.request(), code.into()) {
        Ok(()) => Ok(file),
        Err(source) => {
            if let Err(e) = file.close() {
                warn!("Closing device file after failed code {:#x} registration: {}", code, e);
            }
            Err(Error::CapabilityRegistration {
                event_type: code_type.event_type(),
                code: Some(code),
                source,
            })
        }
    }
}

/// Declare the whole set, type before codes, in insertion order.
pub fn register(mut file: DeviceFile, caps: &CapabilitySet) -> Result<DeviceFile> {
    for (code_type, codes) in caps.iter() {
        file = enable_type(file, code_type)?;
        for &code in codes {
            file = enable_code(file, code_type, code)?;
        }
        debug!(
            "Registered {} codes for event type {:#x}",
            codes.len(),
            code_type.event_type()
        );
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{BTN_LEFT, BTN_RIGHT, REL_X, REL_Y};
    use crate::handle::testing::Recorder;
    use crate::sys::UI_DEV_DESTROY;

    fn mouse_caps() -> CapabilitySet {
        CapabilitySet::new()
            .with(CodeType::Key, [BTN_LEFT, BTN_RIGHT])
            .with(CodeType::Relative, [REL_X, REL_Y])
    }

    #[test]
    fn types_are_enabled_before_their_codes() {
        let (rec, log) = Recorder::new();
        let file = DeviceFile::from_backend(Box::new(rec), "/dev/uinput");
        register(file, &mouse_caps()).unwrap();

        let log = log.lock().unwrap();
        assert_eq!(
            log.controls,
            vec![
                (UI_SET_EVBIT, EV_KEY as libc::c_ulong),
                (UI_SET_KEYBIT, BTN_LEFT as libc::c_ulong),
                (UI_SET_KEYBIT, BTN_RIGHT as libc::c_ulong),
                (UI_SET_EVBIT, EV_REL as libc::c_ulong),
                (UI_SET_RELBIT, REL_X as libc::c_ulong),
                (UI_SET_RELBIT, REL_Y as libc::c_ulong),
            ]
        );
    }

    #[test]
    fn failed_type_destroys_and_closes() {
        let (rec, log) = Recorder::new();
        log.lock().unwrap().fail_control = Some((UI_SET_EVBIT, None));
        let file = DeviceFile::from_backend(Box::new(rec), "/dev/uinput");

        let err = register(file, &mouse_caps()).unwrap_err();
        assert!(matches!(
            err,
            Error::CapabilityRegistration { event_type: EV_KEY, code: None, .. }
        ));

        let log = log.lock().unwrap();
        assert_eq!(log.requests(), vec![UI_DEV_DESTROY]);
        assert!(log.closed);
    }

    #[test]
    fn failed_code_closes_without_destroy() {
        let (rec, log) = Recorder::new();
        log.lock().unwrap().fail_control = Some((UI_SET_RELBIT, Some(REL_Y as libc::c_ulong)));
        let file = DeviceFile::from_backend(Box::new(rec), "/dev/uinput");

        let err = register(file, &mouse_caps()).unwrap_err();
        assert!(matches!(
            err,
            Error::CapabilityRegistration { event_type: EV_REL, code: Some(REL_Y), .. }
        ));
        assert!(err.to_string().contains("0x1"));

        let log = log.lock().unwrap();
        assert!(!log.requests().contains(&UI_DEV_DESTROY));
        assert!(log.closed);
    }

    #[test]
    fn duplicate_codes_are_registered_once() {
        let caps = CapabilitySet::new()
            .with(CodeType::Key, [BTN_LEFT, BTN_LEFT])
            .with(CodeType::Key, [BTN_LEFT, BTN_RIGHT]);
        assert_eq!(caps.codes(CodeType::Key), &[BTN_LEFT, BTN_RIGHT]);
        assert_eq!(caps.iter().count(), 1);
        assert!(!caps.supports(CodeType::Relative, REL_X));
    }
}
