use std::fs::File;
use std::path::PathBuf;

use vhid::{Dial, Error, Gamepad, Keyboard, Mouse, MultiTouch, Settings, TouchPad, codes};

const MISSING: &str = "/some/bogus/path";

fn instant() -> Settings {
    Settings {
        settle_delay_ms: 0,
    }
}

/// Creates every kind against `path` with `name`.
fn create_all(path: &str, name: &str) -> Vec<vhid::Result<()>> {
    let s = instant();
    vec![
        Keyboard::create_with(&s, path, name).map(drop),
        Mouse::create_with(&s, path, name).map(drop),
        TouchPad::create_with(&s, path, name, 0, 1919, 0, 1079).map(drop),
        MultiTouch::create_with(&s, path, name, (0, 1919), (0, 1079), 3).map(drop),
        Gamepad::create_with(&s, path, name, 0x045e, 0x028e).map(drop),
        Dial::create_with(&s, path, name).map(drop),
    ]
}

struct ScratchFile(PathBuf);

impl ScratchFile {
    fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!("vhid-{}-{}", std::process::id(), tag));
        File::create(&path).unwrap();
        Self(path)
    }

    fn path(&self) -> &str {
        self.0.to_str().unwrap()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn empty_path_is_rejected() {
    for result in create_all("", "device") {
        assert!(matches!(result, Err(Error::EmptyPath)));
    }
}

#[test]
fn missing_path_is_reported() {
    for result in create_all(MISSING, "device") {
        match result {
            Err(Error::PathNotFound { path, .. }) => assert_eq!(path, PathBuf::from(MISSING)),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn long_name_message_names_the_limit() {
    let name = "a".repeat(81);
    for result in create_all(MISSING, &name) {
        let err = result.unwrap_err();
        assert!(matches!(err, Error::NameTooLong { .. }));
        assert_eq!(
            err.to_string(),
            format!("device name {name} is too long (maximum of 80 characters allowed)")
        );
    }
}

#[test]
fn empty_name_is_rejected() {
    for result in create_all(MISSING, "") {
        assert!(matches!(result, Err(Error::NameEmpty)));
    }
}

#[test]
fn path_is_checked_before_name() {
    let name = "a".repeat(81);
    for result in create_all("", &name) {
        assert!(matches!(result, Err(Error::EmptyPath)));
    }
}

#[test]
fn multitouch_needs_a_contact() {
    let result = MultiTouch::create_with(&instant(), MISSING, "panel", (0, 10), (0, 10), 0);
    assert!(matches!(result, Err(Error::InvalidContactCount(0))));
}

#[test]
fn regular_file_fails_capability_registration() {
    let scratch = ScratchFile::new("regular");
    for result in create_all(scratch.path(), "device") {
        match result {
            Err(Error::CapabilityRegistration {
                code: None, source, ..
            }) => assert_eq!(source.raw_os_error(), Some(libc::ENOTTY)),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn registration_error_names_the_event_type() {
    let scratch = ScratchFile::new("dial");
    match Dial::create_with(&instant(), scratch.path(), "dial") {
        Err(Error::CapabilityRegistration { event_type, .. }) => {
            assert_eq!(event_type, codes::EV_REL)
        }
        other => panic!("unexpected {other:?}"),
    }
}
