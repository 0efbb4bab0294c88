//! USB HID usage IDs used by the stock keymaps.
//!
//! Keyboard-page values go into the boot keyboard report; consumer-page
//! values go into the consumer-control report. Only the usages the
//! stock layouts need are listed — extend as layouts grow.

/// Keyboard/keypad page (0x07) usage IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Keycode {
    A = 0x04,
    B = 0x05,
    E = 0x08,
    W = 0x1A,
    F13 = 0x68,
    F14 = 0x69,
    KeypadPeriod = 0x63,
    LeftControl = 0xE0,
    LeftShift = 0xE1,
}

impl Keycode {
    /// HID usage ID on the keyboard page.
    pub fn usage(self) -> u8 {
        self as u8
    }

    /// Modifier usages (0xE0–0xE7) live in the report's modifier
    /// bitmask rather than the key-slot array.
    pub fn is_modifier(self) -> bool {
        (self as u8) >= 0xE0
    }

    /// Bit position within the modifier bitmask. Only meaningful when
    /// [`is_modifier`](Self::is_modifier) is true.
    pub fn modifier_bit(self) -> u8 {
        1 << ((self as u8) & 0x07)
    }
}

/// Consumer page (0x0C) usage IDs for media transport and volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ConsumerCode {
    ScanNextTrack = 0x00B5,
    ScanPreviousTrack = 0x00B6,
    Stop = 0x00B7,
    PlayPause = 0x00CD,
    Mute = 0x00E2,
    VolumeIncrement = 0x00E9,
    VolumeDecrement = 0x00EA,
}

impl ConsumerCode {
    pub fn usage(self) -> u16 {
        self as u16
    }
}
