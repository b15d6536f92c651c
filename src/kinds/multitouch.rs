use std::path::Path;

use tracing::debug;

use crate::codes::{ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_SLOT, ABS_MT_TRACKING_ID, EV_ABS};
use crate::config::Settings;
use crate::device::Device;
use crate::error::Result;
use crate::event::InputEvent;

use super::{DeviceKind, VirtualDevice};

/// Tracking id of a slot with no finger down.
pub const RELEASED: i32 = -1;

/// One contact slot of a multi-touch panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    slot: u32,
    tracking_id: i32,
}

impl Contact {
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn tracking_id(&self) -> i32 {
        self.tracking_id
    }

    pub fn is_touching(&self) -> bool {
        self.tracking_id != RELEASED
    }
}

/// Type B multi-touch panel with a fixed pool of contact slots.
#[derive(Debug)]
pub struct MultiTouch {
    device: Device,
    contacts: Vec<Contact>,
}

impl MultiTouch {
    pub fn create(
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
        (min_x, max_x): (i32, i32),
        (min_y, max_y): (i32, i32),
        max_contacts: u32,
    ) -> Result<Self> {
        Self::create_with(
            &Settings::from_env(),
            path,
            name,
            (min_x, max_x),
            (min_y, max_y),
            max_contacts,
        )
    }

    /// `max_contacts` must be at least one.
    pub fn create_with(
        settings: &Settings,
        path: impl AsRef<Path>,
        name: impl AsRef<[u8]>,
        (min_x, max_x): (i32, i32),
        (min_y, max_y): (i32, i32),
        max_contacts: u32,
    ) -> Result<Self> {
        let kind = DeviceKind::MultiTouch {
            min_x,
            max_x,
            min_y,
            max_y,
            max_contacts,
        };
        let device = kind.create(settings, path.as_ref(), name.as_ref())?;
        Ok(Self::new(device, max_contacts))
    }

    fn new(device: Device, max_contacts: u32) -> Self {
        let contacts = (0..max_contacts)
            .map(|slot| Contact {
                slot,
                tracking_id: RELEASED,
            })
            .collect();
        Self { device, contacts }
    }

    /// All slots, ordered by slot index.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact_mut(&mut self, slot: u32) -> Option<ContactMut<'_>> {
        let contact = self.contacts.get_mut(slot as usize)?;
        Some(ContactMut {
            device: &mut self.device,
            contact,
        })
    }
}

impl VirtualDevice for MultiTouch {
    fn device(&self) -> &Device {
        &self.device
    }

    fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }
}

/// A contact borrowed together with the device it reports through.
pub struct ContactMut<'a> {
    device: &'a mut Device,
    contact: &'a mut Contact,
}

impl ContactMut<'_> {
    pub fn slot(&self) -> u32 {
        self.contact.slot
    }

    pub fn tracking_id(&self) -> i32 {
        self.contact.tracking_id
    }

    /// Put a finger down at `(x, y)`. Once written, the tracking id is the slot index.
    ///
    /// A touch at exactly `(0, 0)` is reported with `y = -1`.
    pub fn touch_down_at(&mut self, x: i32, y: i32) -> Result<()> {
        let slot = self.contact.slot as i32;
        let y = if x == 0 && y == 0 { -1 } else { y };
        debug!("Contact {} down at ({}, {})", slot, x, y);

        self.device.emit(&[
            InputEvent::new(EV_ABS, ABS_MT_SLOT, slot),
            InputEvent::new(EV_ABS, ABS_MT_TRACKING_ID, slot),
            InputEvent::new(EV_ABS, ABS_MT_POSITION_X, x),
            InputEvent::new(EV_ABS, ABS_MT_POSITION_Y, y),
        ])?;
        self.contact.tracking_id = slot;
        Ok(())
    }

    /// Lift the finger. The position is left as it was.
    pub fn touch_up(&mut self) -> Result<()> {
        let slot = self.contact.slot as i32;
        self.device.emit(&[
            InputEvent::new(EV_ABS, ABS_MT_SLOT, slot),
            InputEvent::new(EV_ABS, ABS_MT_TRACKING_ID, RELEASED),
        ])?;
        self.contact.tracking_id = RELEASED;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::handle::testing::Log;
    use crate::kinds::testing::recorded;
    use std::sync::{Arc, Mutex};

    fn panel(max_contacts: u32) -> (MultiTouch, Arc<Mutex<Log>>) {
        let kind = DeviceKind::MultiTouch {
            min_x: 0,
            max_x: 1919,
            min_y: 0,
            max_y: 1079,
            max_contacts,
        };
        let (device, log) = recorded(kind, "test panel");
        (MultiTouch::new(device, max_contacts), log)
    }

    #[test]
    fn contacts_have_distinct_slots() {
        let (mt, _log) = panel(3);
        let slots: Vec<u32> = mt.contacts().iter().map(Contact::slot).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert!(mt.contacts().iter().all(|c| !c.is_touching()));
    }

    #[test]
    fn touch_down_then_up() {
        let (mut mt, log) = panel(3);
        let mut contact = mt.contact_mut(2).unwrap();
        contact.touch_down_at(100, 200).unwrap();
        assert_eq!(contact.tracking_id(), 2);
        contact.touch_up().unwrap();
        assert_eq!(contact.tracking_id(), RELEASED);

        assert_eq!(
            log.lock().unwrap().frames(),
            vec![
                InputEvent::new(EV_ABS, ABS_MT_SLOT, 2),
                InputEvent::new(EV_ABS, ABS_MT_TRACKING_ID, 2),
                InputEvent::new(EV_ABS, ABS_MT_POSITION_X, 100),
                InputEvent::new(EV_ABS, ABS_MT_POSITION_Y, 200),
                InputEvent::sync(),
                InputEvent::new(EV_ABS, ABS_MT_SLOT, 2),
                InputEvent::new(EV_ABS, ABS_MT_TRACKING_ID, -1),
                InputEvent::sync(),
            ]
        );
    }

    #[test]
    fn origin_touch_reports_y_minus_one() {
        let (mut mt, log) = panel(1);
        mt.contact_mut(0).unwrap().touch_down_at(0, 0).unwrap();

        let bytes = log.lock().unwrap().frame_bytes();
        let y_frame = &bytes[3 * InputEvent::SIZE..4 * InputEvent::SIZE];
        let tail = &y_frame[InputEvent::SIZE - 8..];
        assert_eq!(tail, &[0x03, 0x00, 0x36, 0x00, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn only_the_origin_is_adjusted() {
        let (mut mt, log) = panel(1);
        mt.contact_mut(0).unwrap().touch_down_at(0, 5).unwrap();
        let frames = log.lock().unwrap().frames();
        assert_eq!(frames[3], InputEvent::new(EV_ABS, ABS_MT_POSITION_Y, 5));
    }

    #[test]
    fn unknown_slot_is_none() {
        let (mut mt, _log) = panel(2);
        assert!(mt.contact_mut(2).is_none());
    }

    #[test]
    fn closed_panel_rejects_touches() {
        let (mut mt, log) = panel(2);
        mt.close().unwrap();
        let result = mt.contact_mut(0).unwrap().touch_down_at(5, 5);
        assert!(matches!(result, Err(Error::ClosedDevice)));
        assert!(!mt.contacts()[0].is_touching());
        assert!(log.lock().unwrap().frames().is_empty());
    }
}
