use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sys::{ABS_CNT, UINPUT_MAX_NAME_SIZE, USER_DEV_SIZE};

pub const MAX_NAME_SIZE: usize = UINPUT_MAX_NAME_SIZE;

pub const BUS_USB: u16 = 0x03;

/// Bus and vendor/product/version identifiers reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputId {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

impl InputId {
    pub fn usb(vendor: u16, product: u16, version: u16) -> Self {
        Self {
            bustype: BUS_USB,
            vendor,
            product,
            version,
        }
    }
}

/// Range and noise parameters of one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbsRange {
    pub min: i32,
    pub max: i32,
    pub fuzz: i32,
    pub flat: i32,
}

impl AbsRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            fuzz: 0,
            flat: 0,
        }
    }
}

/// In-memory form of the legacy `uinput_user_dev` registration record.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    name: Vec<u8>,
    pub id: InputId,
    pub ff_effects_max: u32,
    pub abs_max: [i32; ABS_CNT],
    pub abs_min: [i32; ABS_CNT],
    pub abs_fuzz: [i32; ABS_CNT],
    pub abs_flat: [i32; ABS_CNT],
}

impl DeviceDescriptor {
    /// Validates the name: it must be non-empty and fit the kernel's 80 byte field.
    pub fn new(name: impl AsRef<[u8]>, id: InputId) -> Result<Self> {
        let name = name.as_ref();
        validate_name(name)?;

        Ok(Self {
            name: name.to_vec(),
            id,
            ff_effects_max: 0,
            abs_max: [0; ABS_CNT],
            abs_min: [0; ABS_CNT],
            abs_fuzz: [0; ABS_CNT],
            abs_flat: [0; ABS_CNT],
        })
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Name for log output
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    /// Set the table entries for one axis. Codes outside the legacy table are ignored.
    pub fn set_abs(&mut self, code: u16, range: AbsRange) -> &mut Self {
        let idx = code as usize;
        if idx < ABS_CNT {
            self.abs_min[idx] = range.min;
            self.abs_max[idx] = range.max;
            self.abs_fuzz[idx] = range.fuzz;
            self.abs_flat[idx] = range.flat;
        }
        self
    }

    pub fn abs(&self, code: u16) -> Option<AbsRange> {
        let idx = code as usize;
        (idx < ABS_CNT).then(|| AbsRange {
            min: self.abs_min[idx],
            max: self.abs_max[idx],
            fuzz: self.abs_fuzz[idx],
            flat: self.abs_flat[idx],
        })
    }

    /// Serialize into the fixed 1116 byte layout written before `UI_DEV_CREATE`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(USER_DEV_SIZE);

        let mut name = [0u8; MAX_NAME_SIZE];
        name[..self.name.len()].copy_from_slice(&self.name);
        buf.extend_from_slice(&name);

        buf.extend_from_slice(&self.id.bustype.to_le_bytes());
        buf.extend_from_slice(&self.id.vendor.to_le_bytes());
        buf.extend_from_slice(&self.id.product.to_le_bytes());
        buf.extend_from_slice(&self.id.version.to_le_bytes());
        buf.extend_from_slice(&self.ff_effects_max.to_le_bytes());

        for table in [&self.abs_max, &self.abs_min, &self.abs_fuzz, &self.abs_flat] {
            for v in table.iter() {
                buf.extend_from_slice(&v.to_le_bytes());
            }
        }

        debug_assert_eq!(buf.len(), USER_DEV_SIZE);
        buf
    }
}

pub(crate) fn validate_name(name: &[u8]) -> Result<()> {
    if name.is_empty() {
        return Err(Error::NameEmpty);
    }
    if name.len() > MAX_NAME_SIZE {
        return Err(Error::NameTooLong {
            name: String::from_utf8_lossy(name).into_owned(),
            limit: MAX_NAME_SIZE,
        });
    }
    Ok(())
}
