//! Unified error types for the Keydeck firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping
//! the polling loop's error handling uniform. All variants are `Copy`
//! so they can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A key sample could not be acquired this cycle.
    Input(InputError),
    /// A HID or LED output command failed.
    Output(OutputError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Keymap or device configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Input (key sampling) errors
// ---------------------------------------------------------------------------

/// Failures while acquiring the per-cycle key snapshot.
///
/// A failed sample is fatal for the cycle: it propagates out of the
/// poll path instead of defaulting to "all released", so a stuck bus
/// is never misread as a key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// I2C transaction with the port expander failed (rc from ESP-IDF).
    BusReadFailed(i32),
    /// A GPIO level read returned an error.
    GpioReadFailed,
    /// The caller's sample buffer does not match the key count.
    LengthMismatch,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusReadFailed(rc) => write!(f, "expander I2C read failed (rc={rc})"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::LengthMismatch => write!(f, "sample buffer length mismatch"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Output (HID / LED) errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// The USB HID interface is not mounted (host not attached).
    HidNotReady,
    /// The HID report write failed.
    HidWriteFailed,
    /// More simultaneous keys than the boot report can carry.
    RolloverExceeded,
    /// SPI transfer to the LED strip failed (rc from ESP-IDF).
    SpiWriteFailed(i32),
    /// LED index outside the strip.
    PixelOutOfRange,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HidNotReady => write!(f, "HID interface not mounted"),
            Self::HidWriteFailed => write!(f, "HID report write failed"),
            Self::RolloverExceeded => write!(f, "boot report rollover exceeded"),
            Self::SpiWriteFailed(rc) => write!(f, "LED SPI write failed (rc={rc})"),
            Self::PixelOutOfRange => write!(f, "pixel index out of range"),
        }
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_identify_subsystem() {
        let e: Error = InputError::BusReadFailed(-1).into();
        assert!(e.to_string().starts_with("input:"));
        let e: Error = OutputError::HidNotReady.into();
        assert!(e.to_string().starts_with("output:"));
        assert_eq!(Error::Config("bad keymap").to_string(), "config: bad keymap");
    }
}
