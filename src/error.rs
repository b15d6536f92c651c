use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while creating, driving or tearing down a
/// virtual device.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("device path must not be empty")]
    EmptyPath,

    #[error("device path '{}' does not exist", .path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not open device file '{}'", .path.display())]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("device name {name} is too long (maximum of {limit} characters allowed)")]
    NameTooLong { name: String, limit: usize },

    #[error("device name may not be empty")]
    NameEmpty,

    #[error("failed to register {}", registration(.event_type, .code))]
    CapabilityRegistration {
        event_type: u16,
        code: Option<u16>,
        #[source]
        source: io::Error,
    },

    #[error("failed to write uidev struct to device file")]
    DescriptorWrite(#[source] io::Error),

    #[error("failed to create device")]
    Create(#[source] io::Error),

    #[error("failed to write event (type {event_type:#x}, code {code:#x}) to device file")]
    Write {
        event_type: u16,
        code: u16,
        #[source]
        source: io::Error,
    },

    #[error("device is closed")]
    ClosedDevice,

    #[error("key code {code} is out of range (0..={max})")]
    InvalidKeycode { code: u16, max: u16 },

    #[error("failed to parse input direction {0}")]
    InvalidDirection(i32),

    #[error("a multi-touch device needs at least one contact (got {0})")]
    InvalidContactCount(u32),

    #[error("failed to destroy device{}", close_suffix(.close))]
    Destroy {
        #[source]
        source: io::Error,
        close: Option<io::Error>,
    },

    #[error("failed to close device")]
    Close(#[source] io::Error),

    #[error("failed to fetch syspath")]
    Syspath(#[source] io::Error),
}

fn registration(event_type: &u16, code: &Option<u16>) -> String {
    match code {
        Some(code) => format!("code {code:#x} for event type {event_type:#x}"),
        None => format!("event type {event_type:#x}"),
    }
}

fn close_suffix(close: &Option<io::Error>) -> String {
    match close {
        Some(e) => format!(" (closing the device file failed as well: {e})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MAX_NAME_SIZE;

    #[test]
    fn name_too_long_mentions_name_and_limit() {
        let err = Error::NameTooLong {
            name: "pad".into(),
            limit: MAX_NAME_SIZE,
        };
        assert_eq!(
            err.to_string(),
            "device name pad is too long (maximum of 80 characters allowed)"
        );
    }

    #[test]
    fn destroy_failure_chains_close_failure() {
        let err = Error::Destroy {
            source: io::Error::from_raw_os_error(libc::ENOTTY),
            close: Some(io::Error::from_raw_os_error(libc::EBADF)),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to destroy device"));
        assert!(msg.contains("closing the device file failed as well"));
        let source = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<io::Error>())
            .and_then(io::Error::raw_os_error);
        assert_eq!(source, Some(libc::ENOTTY));
    }

    #[test]
    fn registration_message_names_code() {
        let err = Error::CapabilityRegistration {
            event_type: 1,
            code: Some(0x110),
            source: io::Error::from_raw_os_error(libc::ENOTTY),
        };
        assert_eq!(err.to_string(), "failed to register code 0x110 for event type 0x1");
    }
}
