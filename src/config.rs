//! System configuration parameters
//!
//! All tunable parameters for the Keydeck firmware. There is no runtime
//! reconfiguration — the struct is built once at boot and handed to the
//! polling loop. The serde derives exist for host-side tooling and the
//! diagnostic dump, not for persistence.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which stock layout (and therefore which input backend) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// 16 keys behind the I²C port expander.
    MediaDeck16,
    /// 12 direct-wired GPIO keys.
    GameDeck12,
    /// 16 direct-wired GPIO keys, no LEDs populated.
    MacroPad16,
}

/// Core device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Stock layout to load at boot.
    pub layout: Layout,

    // --- Timing ---
    /// Poll cycle interval (milliseconds). Rate limiter against rapid
    /// double hits from quick presses — not real debouncing.
    pub poll_interval_ms: u32,

    // --- LEDs ---
    /// Global LED brightness (0–100%). Applied in the strip driver, so
    /// keymap colours stay full-scale.
    pub led_brightness_percent: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            layout: Layout::MediaDeck16,
            poll_interval_ms: 20, // 50 Hz sweep
            led_brightness_percent: 10,
        }
    }
}

impl DeviceConfig {
    /// Range validation, fatal at startup.
    pub fn validate(&self) -> Result<(), Error> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll interval must be non-zero"));
        }
        if self.poll_interval_ms > 1000 {
            return Err(Error::Config("poll interval above 1s misses short presses"));
        }
        if self.led_brightness_percent > 100 {
            return Err(Error::Config("brightness must be 0-100%"));
        }
        Ok(())
    }
}
