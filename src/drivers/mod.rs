//! Key readers, output drivers, and hardware initialisation.

pub mod expander;
pub mod hid;
pub mod hw_init;
pub mod keys;
pub mod pixels;
pub mod watchdog;
