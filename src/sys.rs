//! Uinput ioctl opcodes and the kernel structures they operate on.
#![allow(non_camel_case_types)]

use std::mem::size_of;

const IOC_NONE: u64 = 0;
const IOC_WRITE: u64 = 1;
const IOC_READ: u64 = 2;

const UINPUT_IOCTL_BASE: u64 = b'U' as u64;

const fn ioc(dir: u64, nr: u64, size: usize) -> u64 {
    (dir << 30) | ((size as u64 & 0x3fff) << 16) | (UINPUT_IOCTL_BASE << 8) | nr
}

pub const UI_DEV_CREATE: u64 = ioc(IOC_NONE, 1, 0);
pub const UI_DEV_DESTROY: u64 = ioc(IOC_NONE, 2, 0);
pub const UI_SET_EVBIT: u64 = ioc(IOC_WRITE, 100, size_of::<libc::c_int>());
pub const UI_SET_KEYBIT: u64 = ioc(IOC_WRITE, 101, size_of::<libc::c_int>());
pub const UI_SET_RELBIT: u64 = ioc(IOC_WRITE, 102, size_of::<libc::c_int>());
pub const UI_SET_ABSBIT: u64 = ioc(IOC_WRITE, 103, size_of::<libc::c_int>());

/// Buffer length for the sysfs name query: 64 characters plus the NUL.
pub const SYSNAME_LEN: usize = 65;

// Get sysfs name for uinput device
pub const fn ui_get_sysname(len: usize) -> u64 {
    ioc(IOC_READ, 0x2c, len)
}

/// Number of absolute axes the legacy descriptor carries tables for.
pub const ABS_CNT: usize = 64;
pub const UINPUT_MAX_NAME_SIZE: usize = 80;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct input_id {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

// struct uinput_user_dev, the layout written before UI_DEV_CREATE
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct uinput_user_dev {
    pub name: [u8; UINPUT_MAX_NAME_SIZE],
    pub id: input_id,
    pub ff_effects_max: u32,
    pub absmax: [i32; ABS_CNT],
    pub absmin: [i32; ABS_CNT],
    pub absfuzz: [i32; ABS_CNT],
    pub absflat: [i32; ABS_CNT],
}

// struct input_event as the kernel reads it from the uinput node
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct input_event {
    pub time: libc::timeval,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

pub const USER_DEV_SIZE: usize = UINPUT_MAX_NAME_SIZE + 8 + 4 + 4 * ABS_CNT * 4;
pub const EVENT_SIZE: usize = 2 * size_of::<libc::c_long>() + 8;

const _: () = assert!(size_of::<uinput_user_dev>() == USER_DEV_SIZE);
const _: () = assert!(size_of::<input_event>() == EVENT_SIZE);
