//! USB HID keyboard + consumer-control output.
//!
//! Maintains a boot-protocol keyboard report (modifier bitmask + six
//! key slots) across press/release calls and emits consumer-page
//! usages as one-shot reports. Report assembly is pure logic and runs
//! on the host; only the final report write is target-gated (see
//! [`hw_init::hid_report`]).

use crate::error::OutputError;
use crate::keycodes::{ConsumerCode, Keycode};

use super::hw_init;

/// Boot report key-slot count. More than six simultaneous non-modifier
/// keys is a rollover error.
const KEY_SLOTS: usize = 6;

pub struct HidDevice {
    modifiers: u8,
    slots: [u8; KEY_SLOTS],
}

impl HidDevice {
    pub fn new() -> Self {
        Self {
            modifiers: 0,
            slots: [0; KEY_SLOTS],
        }
    }

    /// Current modifier bitmask (host tests and diagnostics).
    pub fn modifier_mask(&self) -> u8 {
        self.modifiers
    }

    /// Non-modifier usages currently held.
    pub fn held_keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().copied().filter(|&u| u != 0)
    }

    /// Hold the given usages down and send the updated report.
    /// Pressing an already-held key is a no-op for that key.
    pub fn press(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        for &key in keys {
            if key.is_modifier() {
                self.modifiers |= key.modifier_bit();
            } else {
                self.add_slot(key.usage())?;
            }
        }
        self.write_keyboard_report()
    }

    /// Release the given usages and send the updated report.
    /// Releasing a key that is not held is a no-op for that key.
    pub fn release(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        for &key in keys {
            if key.is_modifier() {
                self.modifiers &= !key.modifier_bit();
            } else {
                for slot in &mut self.slots {
                    if *slot == key.usage() {
                        *slot = 0;
                    }
                }
            }
        }
        self.write_keyboard_report()
    }

    /// Tap: press then release in one call pair.
    pub fn send(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        self.press(keys)?;
        self.release(keys)
    }

    /// One-shot consumer-control usage (media keys): the usage report
    /// followed immediately by the empty report.
    pub fn send_code(&mut self, code: ConsumerCode) -> Result<(), OutputError> {
        self.write_consumer_report(code.usage())?;
        self.write_consumer_report(0)
    }

    fn add_slot(&mut self, usage: u8) -> Result<(), OutputError> {
        if self.slots.contains(&usage) {
            return Ok(());
        }
        match self.slots.iter_mut().find(|s| **s == 0) {
            Some(slot) => {
                *slot = usage;
                Ok(())
            }
            None => Err(OutputError::RolloverExceeded),
        }
    }

    fn write_keyboard_report(&self) -> Result<(), OutputError> {
        if !hw_init::hid_ready() {
            return Err(OutputError::HidNotReady);
        }
        let mut payload = [0u8; 8];
        payload[0] = self.modifiers;
        // payload[1] is the boot-protocol reserved byte.
        payload[2..].copy_from_slice(&self.slots);
        hw_init::hid_report(hw_init::HID_REPORT_ID_KEYBOARD, &payload)
            .map_err(|()| OutputError::HidWriteFailed)
    }

    fn write_consumer_report(&self, usage: u16) -> Result<(), OutputError> {
        if !hw_init::hid_ready() {
            return Err(OutputError::HidNotReady);
        }
        hw_init::hid_report(hw_init::HID_REPORT_ID_CONSUMER, &usage.to_le_bytes())
            .map_err(|()| OutputError::HidWriteFailed)
    }
}

impl Default for HidDevice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_go_into_the_bitmask_not_slots() {
        let mut hid = HidDevice::new();
        hid.press(&[Keycode::LeftShift, Keycode::W]).unwrap();
        assert_eq!(hid.modifier_mask(), Keycode::LeftShift.modifier_bit());
        assert_eq!(hid.held_keys().collect::<Vec<_>>(), vec![Keycode::W.usage()]);
    }

    #[test]
    fn release_clears_exactly_what_was_pressed() {
        let mut hid = HidDevice::new();
        hid.press(&[Keycode::LeftShift, Keycode::W]).unwrap();
        hid.release(&[Keycode::LeftShift, Keycode::W]).unwrap();
        assert_eq!(hid.modifier_mask(), 0);
        assert_eq!(hid.held_keys().count(), 0);
    }

    #[test]
    fn double_press_is_idempotent() {
        let mut hid = HidDevice::new();
        hid.press(&[Keycode::B]).unwrap();
        hid.press(&[Keycode::B]).unwrap();
        assert_eq!(hid.held_keys().count(), 1);
    }

    #[test]
    fn seventh_key_is_rollover() {
        let mut hid = HidDevice::new();
        for key in [
            Keycode::B,
            Keycode::E,
            Keycode::W,
            Keycode::F13,
            Keycode::F14,
            Keycode::KeypadPeriod,
        ] {
            hid.press(&[key]).unwrap();
        }
        // All six slots full: a seventh non-modifier is rollover, but a
        // modifier still fits in the bitmask.
        assert_eq!(hid.press(&[Keycode::A]), Err(OutputError::RolloverExceeded));
        assert!(hid.press(&[Keycode::LeftControl]).is_ok());
    }

    #[test]
    fn send_leaves_nothing_held() {
        let mut hid = HidDevice::new();
        hid.send(&[Keycode::LeftControl, Keycode::KeypadPeriod]).unwrap();
        assert_eq!(hid.modifier_mask(), 0);
        assert_eq!(hid.held_keys().count(), 0);
    }
}
