//! 16-bit I²C port-expander key reader (TCA9555 class).
//!
//! All 16 keys on the MediaDeck board hang off one expander at 0x20.
//! A single two-byte read of the input-port register pair returns the
//! whole bank; keys are wired active-low (pressed pulls the bit to 0).
//!
//! The raw bus transaction lives in [`hw_init`](super::hw_init); the
//! bit decoding here is pure and host-tested.

use crate::error::InputError;
use crate::pins;

use super::hw_init;

pub struct ExpanderKeys {
    addr: u8,
    key_count: usize,
}

impl ExpanderKeys {
    pub fn new() -> Self {
        Self {
            addr: pins::EXPANDER_I2C_ADDR,
            key_count: 16,
        }
    }

    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Read the whole key bank in one bus transaction. A failed read
    /// propagates — never defaulted to "all released".
    pub fn read(&mut self, samples: &mut [bool]) -> Result<(), InputError> {
        if samples.len() != self.key_count {
            return Err(InputError::LengthMismatch);
        }
        let mut raw = [0u8; 2];
        hw_init::i2c_write_read(self.addr, &[pins::EXPANDER_INPUT_REG], &mut raw)
            .map_err(InputError::BusReadFailed)?;
        decode(u16::from_le_bytes(raw), samples);
        Ok(())
    }
}

impl Default for ExpanderKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Active-low bit field → per-key booleans (`true` = pressed).
fn decode(bits: u16, samples: &mut [bool]) {
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample = bits & (1 << i) == 0;
    }
}
