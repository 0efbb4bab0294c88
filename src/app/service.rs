//! Keypad service — the hexagonal core.
//!
//! [`KeypadService`] owns the event engine and the keymap. It exposes a
//! single operation, [`poll`](KeypadService::poll), that runs one full
//! cycle: sample every key, step the engine per index in order,
//! dispatch the bound actions, then commit the sweep. All I/O flows
//! through port traits injected at the call site, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  InputSource ──▶ ┌────────────────────────┐ ──▶ OutputSink
//!                  │     KeypadService      │ ──▶ IndicatorSink
//!                  │  EventEngine · Keymap  │ ──▶ EventSink
//!                  └────────────────────────┘
//! ```

use heapless::Vec;

use crate::engine::{EventEngine, KeyEvent};
use crate::error::Error;
use crate::keymap::{Action, Binding, Keymap};
use crate::pins::MAX_KEYS;

use super::events::AppEvent;
use super::ports::{EventSink, IndicatorSink, InputSource, OutputSink};

/// Orchestrates the sample → step → dispatch → commit cycle.
pub struct KeypadService {
    engine: EventEngine,
    keymap: Keymap,
    /// Whole-sweep sample snapshot, reused across cycles.
    samples: Vec<bool, MAX_KEYS>,
    cycle_count: u64,
}

impl KeypadService {
    /// Build the service for a layout. The keymap is validated here —
    /// a binding table that does not match the device is fatal before
    /// the first poll cycle.
    pub fn new(keymap: Keymap) -> Result<Self, Error> {
        keymap.validate()?;
        let n = keymap.button_count();
        let mut samples = Vec::new();
        samples
            .resize(n, false)
            .map_err(|()| Error::Config("keymap exceeds MAX_KEYS"))?;
        Ok(Self {
            engine: EventEngine::new(n),
            keymap,
            samples,
            cycle_count: 0,
        })
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Cycles completed (a cycle aborted by an error is not counted).
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Run one poll cycle at monotonic time `now_ms`.
    ///
    /// A sampling or action failure aborts the rest of the cycle and
    /// propagates; the sweep is then *not* committed, so edge detection
    /// next cycle still compares against the last completed sweep.
    pub fn poll(
        &mut self,
        input: &mut impl InputSource,
        output: &mut impl OutputSink,
        indicators: &mut impl IndicatorSink,
        sink: &mut impl EventSink,
        now_ms: u64,
    ) -> Result<(), Error> {
        input.sample(&mut self.samples)?;

        for index in 0..self.keymap.button_count() {
            let binding = self.keymap.bindings[index];
            let dispatch = self.engine.step(index, &binding, self.samples[index], now_ms);
            for event in dispatch {
                report(sink, index, event);
                if let Some(action) = slot(&binding, event) {
                    run_action(&self.keymap, index, &action, output, indicators)?;
                }
            }
        }

        self.engine.commit();
        self.cycle_count += 1;
        Ok(())
    }
}

/// The binding's action slot for one engine event.
fn slot(binding: &Binding, event: KeyEvent) -> Option<Action> {
    match event {
        KeyEvent::Setup => binding.on_setup,
        KeyEvent::Pressed => binding.on_pressed,
        KeyEvent::Released => binding.on_released,
        KeyEvent::Tick => binding.on_tick,
    }
}

fn report(sink: &mut impl EventSink, index: usize, event: KeyEvent) {
    let app_event = match event {
        KeyEvent::Setup => AppEvent::KeySetup { index },
        KeyEvent::Pressed => AppEvent::KeyPressed { index },
        KeyEvent::Released => AppEvent::KeyReleased { index },
        // Ticks fire every cycle for every key — not worth reporting.
        KeyEvent::Tick => return,
    };
    sink.emit(&app_event);
}

/// Execute one action with the key index explicit. Indicator actions
/// resolve the key's pixel through the layout's pixel map.
fn run_action(
    keymap: &Keymap,
    index: usize,
    action: &Action,
    output: &mut impl OutputSink,
    indicators: &mut impl IndicatorSink,
) -> Result<(), Error> {
    match action {
        Action::Indicator(rgb) => indicators.set(keymap.pixel_map[index], *rgb)?,
        Action::Press(keys) => output.press(keys)?,
        Action::Release(keys) => output.release(keys)?,
        Action::Send(keys) => output.send(keys)?,
        Action::Consumer(code) => output.send_code(*code)?,
        Action::Seq(actions) => {
            for a in *actions {
                run_action(keymap, index, a, output, indicators)?;
            }
        }
    }
    Ok(())
}
