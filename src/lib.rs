//! Keydeck firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod engine;
pub mod keycodes;
pub mod keymap;

pub mod error;
pub mod pins;

// Hardware-facing modules; the peripheral access inside is guarded by
// cfg attributes, so these compile on host targets too.
pub mod adapters;
pub mod drivers;
