//! Outbound application events.
//!
//! The [`KeypadService`](super::service::KeypadService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them — log to serial today, a
//! host-side channel tomorrow.
//!
//! Per-cycle ticks are deliberately not reported: at a 20 ms cadence
//! they would be pure noise.

/// Structured events emitted by the keypad core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A key index was stepped for the first time.
    KeySetup { index: usize },

    /// A press event was dispatched (edge or hold-repeat).
    KeyPressed { index: usize },

    /// A release event was dispatched (raw edge, or a toggle latching
    /// off on a press edge).
    KeyReleased { index: usize },
}
