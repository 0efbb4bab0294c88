//! Application core — pure domain logic, zero I/O.
//!
//! This layer turns key samples into dispatched actions. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping the whole poll path testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
