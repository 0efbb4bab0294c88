//! APA102-class addressable LED strip driver.
//!
//! One pixel per key. Frame format: a 4-byte zero start frame, then
//! per pixel `0b111xxxxx` (5-bit global brightness), blue, green, red,
//! then a 4-byte `0xFF` end frame (sufficient below 64 pixels).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: every [`set`](PixelStrip::set) rewrites the whole frame
//! over SPI (the strip has no partial-update concept). On host/test:
//! tracks pixel state in-memory only.

use heapless::Vec;

use crate::error::OutputError;
use crate::keymap::Rgb;
use crate::pins::MAX_KEYS;

use super::hw_init;

/// Start frame + per-pixel slots + end frame.
const FRAME_CAP: usize = 4 + MAX_KEYS * 4 + 4;

pub struct PixelStrip {
    pixels: Vec<Rgb, MAX_KEYS>,
    /// 5-bit APA102 global brightness field, derived from the
    /// configured 0–100%.
    global: u8,
}

impl PixelStrip {
    /// A dark strip of `led_count` pixels at `brightness_percent`.
    ///
    /// # Panics
    ///
    /// If `led_count` exceeds [`MAX_KEYS`]; the keymap is validated
    /// against the same bound at startup.
    pub fn new(led_count: usize, brightness_percent: u8) -> Self {
        let mut pixels = Vec::new();
        pixels
            .resize(led_count, (0, 0, 0))
            .expect("led_count <= MAX_KEYS");
        Self {
            pixels,
            global: scale_brightness(brightness_percent),
        }
    }

    pub fn led_count(&self) -> usize {
        self.pixels.len()
    }

    /// Current colour of one pixel (host tests and diagnostics).
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Set one pixel and push the updated frame to the strip.
    pub fn set(&mut self, index: usize, rgb: Rgb) -> Result<(), OutputError> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(OutputError::PixelOutOfRange)?;
        *slot = rgb;
        self.show()
    }

    /// Blank the whole strip.
    pub fn clear(&mut self) -> Result<(), OutputError> {
        for p in &mut self.pixels {
            *p = (0, 0, 0);
        }
        self.show()
    }

    fn show(&self) -> Result<(), OutputError> {
        let mut frame: Vec<u8, FRAME_CAP> = Vec::new();
        let _ = frame.extend_from_slice(&[0x00; 4]);
        for &(r, g, b) in &self.pixels {
            let _ = frame.extend_from_slice(&[0xE0 | self.global, b, g, r]);
        }
        let _ = frame.extend_from_slice(&[0xFF; 4]);
        hw_init::spi_write(&frame).map_err(OutputError::SpiWriteFailed)
    }
}

/// 0–100% → the strip's 5-bit global brightness field (0–31).
fn scale_brightness(percent: u8) -> u8 {
    let clamped = u32::from(percent.min(100));
    ((clamped * 31) / 100) as u8
}
