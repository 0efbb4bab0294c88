//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured key events to the
//! logger (UART / USB-CDC in production). A future host-channel
//! adapter would implement the same trait.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            // Setup fires once per key at boot; keep it quiet.
            AppEvent::KeySetup { index } => debug!("KEY | setup idx={}", index),
            AppEvent::KeyPressed { index } => info!("KEY | pressed idx={}", index),
            AppEvent::KeyReleased { index } => info!("KEY | released idx={}", index),
        }
    }
}
