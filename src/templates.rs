use serde::{Deserialize, Serialize};

/// Name and USB ids a virtual gamepad reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadIdentity {
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl GamepadIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor_id: 0x0000,
            product_id: 0x0000,
        }
    }

    /// Set vendor ID
    pub fn vendor_id(mut self, vendor_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self
    }

    /// Set product ID
    pub fn product_id(mut self, product_id: u16) -> Self {
        self.product_id = product_id;
        self
    }
}

/// Pre-configured gamepad identities
pub struct GamepadTemplates;

impl GamepadTemplates {
    /// Names accepted by [`GamepadTemplates::by_name`]
    pub const NAMES: [&'static str; 6] =
        ["xbox360", "xbox-one", "ps4", "ps5", "switch-pro", "generic"];

    /// Xbox 360 Controller
    pub fn xbox360() -> GamepadIdentity {
        GamepadIdentity::new("Microsoft X-Box 360 pad")
            .vendor_id(0x045e)
            .product_id(0x028e)
    }

    /// Xbox One Controller
    pub fn xbox_one() -> GamepadIdentity {
        GamepadIdentity::new("Microsoft X-Box One pad")
            .vendor_id(0x045e)
            .product_id(0x02ea)
    }

    /// PlayStation 4 Controller (DualShock 4)
    pub fn ps4() -> GamepadIdentity {
        GamepadIdentity::new("Sony Interactive Entertainment Wireless Controller")
            .vendor_id(0x054c)
            .product_id(0x09cc)
    }

    /// PlayStation 5 Controller (DualSense)
    pub fn ps5() -> GamepadIdentity {
        GamepadIdentity::new("Sony Interactive Entertainment DualSense Wireless Controller")
            .vendor_id(0x054c)
            .product_id(0x0ce6)
    }

    pub fn switch_pro() -> GamepadIdentity {
        GamepadIdentity::new("Nintendo Switch Pro Controller")
            .vendor_id(0x057e)
            .product_id(0x2009)
    }

    pub fn generic_gamepad() -> GamepadIdentity {
        GamepadIdentity::new("Generic USB Gamepad")
            .vendor_id(0x0079)
            .product_id(0x0006)
    }

    pub fn by_name(name: &str) -> Option<GamepadIdentity> {
        let identity = match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "xbox360" | "xbox-360" => Self::xbox360(),
            "xbox-one" | "xboxone" => Self::xbox_one(),
            "ps4" | "dualshock4" => Self::ps4(),
            "ps5" | "dualsense" => Self::ps5(),
            "switch-pro" | "switch" => Self::switch_pro(),
            "generic" => Self::generic_gamepad(),
            _ => return None,
        };
        Some(identity)
    }
}
