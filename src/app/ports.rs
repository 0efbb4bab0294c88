//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ KeypadService (domain)
//! ```
//!
//! Driven adapters (key readers, HID output, LED strip, event sinks)
//! implement these traits. The [`KeypadService`](super::service::KeypadService)
//! consumes them via generics, so the domain core never touches
//! hardware directly.
//!
//! All port errors are typed — a failed sample or output call aborts
//! the poll cycle rather than being silently defaulted.

use crate::error::{InputError, OutputError};
use crate::keycodes::{ConsumerCode, Keycode};
use crate::keymap::Rgb;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: key hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one boolean per key per poll cycle.
pub trait InputSource {
    /// Fill `samples` (length = key count, index order) with this
    /// cycle's snapshot; `true` = key down. Must complete well inside
    /// the poll interval and must not block on a stuck bus — return
    /// the error instead, so a dead expander is never misread as
    /// "all keys released".
    fn sample(&mut self, samples: &mut [bool]) -> Result<(), InputError>;
}

// ───────────────────────────────────────────────────────────────
// Output port (domain → USB HID)
// ───────────────────────────────────────────────────────────────

/// Write-side port for keyboard and media-control output.
/// Fire-and-forget: the engine never reads anything back.
pub trait OutputSink {
    /// Hold the given keyboard usages down.
    fn press(&mut self, keys: &[Keycode]) -> Result<(), OutputError>;

    /// Release the given keyboard usages.
    fn release(&mut self, keys: &[Keycode]) -> Result<(), OutputError>;

    /// Tap: press then release in one call.
    fn send(&mut self, keys: &[Keycode]) -> Result<(), OutputError>;

    /// Emit a consumer-control (media) usage.
    fn send_code(&mut self, code: ConsumerCode) -> Result<(), OutputError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → per-key LEDs)
// ───────────────────────────────────────────────────────────────

/// Per-key visual feedback. `index` is a pixel index on the strip
/// (the keymap's pixel map has already been applied). No read-back.
pub trait IndicatorSink {
    fn set(&mut self, index: usize, rgb: Rgb) -> Result<(), OutputError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain reports structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// a display or host channel tomorrow).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
