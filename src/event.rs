use std::mem::size_of;

use crate::codes::{EV_SYN, SYN_REPORT};
use crate::sys::EVENT_SIZE;

const WORD: usize = size_of::<libc::c_long>();

/// A single `struct input_event` frame.
///
/// The timestamp is always written as zero; the kernel stamps events itself
/// when they are injected through uinput.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub time_sec: i64,
    pub time_usec: i64,
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub const SIZE: usize = EVENT_SIZE;

    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            time_sec: 0,
            time_usec: 0,
            event_type,
            code,
            value,
        }
    }

    /// SYN_REPORT frame closing a group of events
    pub fn sync() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    /// Encode to the native little-endian wire layout.
    pub fn to_bytes(&self) -> [u8; EVENT_SIZE] {
        let mut buf = [0u8; EVENT_SIZE];
        put_word(&mut buf[..WORD], self.time_sec);
        put_word(&mut buf[WORD..2 * WORD], self.time_usec);

        let rest = &mut buf[2 * WORD..];
        rest[0..2].copy_from_slice(&self.event_type.to_le_bytes());
        rest[2..4].copy_from_slice(&self.code.to_le_bytes());
        rest[4..8].copy_from_slice(&self.value.to_le_bytes());
        buf
    }

    /// Decode one frame. Returns `None` if `bytes` is not exactly one frame long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != EVENT_SIZE {
            return None;
        }

        let rest = &bytes[2 * WORD..];
        Some(Self {
            time_sec: get_word(&bytes[..WORD]),
            time_usec: get_word(&bytes[WORD..2 * WORD]),
            event_type: u16::from_le_bytes([rest[0], rest[1]]),
            code: u16::from_le_bytes([rest[2], rest[3]]),
            value: i32::from_le_bytes([rest[4], rest[5], rest[6], rest[7]]),
        })
    }

    /// Split a buffer of back-to-back frames. Trailing partial frames are ignored.
    #[cfg(test)]
    pub fn decode_all(bytes: &[u8]) -> Vec<Self> {
        bytes
            .chunks_exact(EVENT_SIZE)
            .filter_map(Self::from_bytes)
            .collect()
    }

    #[cfg(test)]
    pub fn is_sync(&self) -> bool {
        self.event_type == EV_SYN && self.code == SYN_REPORT
    }
}

fn put_word(dst: &mut [u8], value: i64) {
    let bytes = value.to_le_bytes();
    dst.copy_from_slice(&bytes[..WORD]);
}

fn get_word(src: &[u8]) -> i64 {
    let mut bytes = [0u8; 8];
    bytes[..WORD].copy_from_slice(src);
    // Sign-extend 32-bit words
    if WORD < 8 && src[WORD - 1] & 0x80 != 0 {
        bytes[WORD..].fill(0xff);
    }
    i64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{ABS_X, EV_ABS};

    #[test]
    fn abs_event_round_trips() {
        let ev = InputEvent::new(EV_ABS, ABS_X, 500);
        let decoded = InputEvent::from_bytes(&ev.to_bytes()).unwrap();
        assert_eq!(
            (decoded.event_type, decoded.code, decoded.value),
            (3, 0, 500)
        );
    }

    #[test]
    fn timestamp_is_zero_and_fields_are_little_endian() {
        let bytes = InputEvent::new(EV_ABS, ABS_X, -1).to_bytes();
        assert_eq!(bytes.len(), InputEvent::SIZE);
        assert!(bytes[..2 * WORD].iter().all(|&b| b == 0));
        assert_eq!(&bytes[2 * WORD..], &[3, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn sync_frame_is_all_zero() {
        let bytes = InputEvent::sync().to_bytes();
        assert!(bytes.iter().all(|&b| b == 0));
        assert!(InputEvent::sync().is_sync());
    }

    #[test]
    fn wrong_length_does_not_decode() {
        assert_eq!(InputEvent::from_bytes(&[0u8; 3]), None);
    }

    #[test]
    fn decode_all_splits_frames() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&InputEvent::new(1, 30, 1).to_bytes());
        buf.extend_from_slice(&InputEvent::sync().to_bytes());
        buf.push(0);
        let frames = InputEvent::decode_all(&buf);
        assert_eq!(frames, vec![InputEvent::new(1, 30, 1), InputEvent::sync()]);
    }
}
