//! Hardware adapters — bridge real peripherals to domain port traits.
//!
//! The three ports map onto three thin adapters so the service can
//! borrow them independently within one cycle. On non-espidf targets
//! the underlying drivers use cfg-gated simulation stubs, so all of
//! this compiles and runs on the host.

use crate::app::ports::{IndicatorSink, InputSource, OutputSink};
use crate::error::{InputError, OutputError};
use crate::keycodes::{ConsumerCode, Keycode};
use crate::keymap::Rgb;

use crate::drivers::expander::ExpanderKeys;
use crate::drivers::hid::HidDevice;
use crate::drivers::keys::GpioKeys;
use crate::drivers::pixels::PixelStrip;

// ── InputSource ───────────────────────────────────────────────

/// Key bank behind whichever input backend the layout uses.
pub enum KeyInput {
    /// 16-key board: I²C port expander.
    Expander(ExpanderKeys),
    /// 12-key board: one GPIO per key.
    Direct(GpioKeys),
}

impl KeyInput {
    pub fn key_count(&self) -> usize {
        match self {
            Self::Expander(e) => e.key_count(),
            Self::Direct(g) => g.key_count(),
        }
    }
}

impl InputSource for KeyInput {
    fn sample(&mut self, samples: &mut [bool]) -> Result<(), InputError> {
        match self {
            Self::Expander(e) => e.read(samples),
            Self::Direct(g) => g.read(samples),
        }
    }
}

// ── OutputSink ────────────────────────────────────────────────

pub struct HidOutput {
    device: HidDevice,
}

impl HidOutput {
    pub fn new() -> Self {
        Self {
            device: HidDevice::new(),
        }
    }
}

impl Default for HidOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for HidOutput {
    fn press(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        self.device.press(keys)
    }

    fn release(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        self.device.release(keys)
    }

    fn send(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        self.device.send(keys)
    }

    fn send_code(&mut self, code: ConsumerCode) -> Result<(), OutputError> {
        self.device.send_code(code)
    }
}

// ── IndicatorSink ─────────────────────────────────────────────

pub struct PixelIndicator {
    strip: PixelStrip,
}

impl PixelIndicator {
    pub fn new(strip: PixelStrip) -> Self {
        Self { strip }
    }

    /// Blank the strip (shutdown path).
    pub fn all_off(&mut self) -> Result<(), OutputError> {
        self.strip.clear()
    }
}

impl IndicatorSink for PixelIndicator {
    fn set(&mut self, index: usize, rgb: Rgb) -> Result<(), OutputError> {
        self.strip.set(index, rgb)
    }
}
