use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Time the kernel gets to finish enumerating a new device before events are sent.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

pub const SETTLE_ENV: &str = "VHID_SETTLE_MS";

/// Tunables shared by every device kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds to wait after `UI_DEV_CREATE`
    pub settle_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
        }
    }
}

impl Settings {
    /// Defaults, with the settle delay overridable through `VHID_SETTLE_MS`.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(ms) = std::env::var(SETTLE_ENV).ok().and_then(|v| parse_settle(&v)) {
            settings.settle_delay_ms = ms;
        }
        settings
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

// A malformed value keeps the default rather than failing device creation.
fn parse_settle(raw: &str) -> Option<u64> {
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", SETTLE_ENV, raw, e);
            None
        }
    }
}
