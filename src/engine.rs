//! Per-key event-dispatch state machine.
//!
//! Turns the raw boolean sample stream (one sample per key per poll
//! cycle) into semantic key events. Each cycle, [`EventEngine::step`]
//! is called once per key index in ascending order with that cycle's
//! sample; after the whole sweep, [`EventEngine::commit`] swaps every
//! key's `previous` sample in one pass, so edge detection always
//! compares two coherent whole-sweep snapshots.
//!
//! ## Branch priority
//!
//! The checks form a priority chain — only the first matching branch
//! fires, and the order is load-bearing:
//!
//! 1. **Init** — the very first step of an index emits [`KeyEvent::Setup`]
//!    (then the chain below still runs in the same cycle, so a key that
//!    boots held-down also gets its first press event).
//! 2. **Hold-repeat** — a `hold` binding with the key down re-emits
//!    `Pressed` at most once per `hold_interval_ms`. Taking this branch
//!    (even on the cycles where the timer is not yet due) suppresses
//!    the edge branches: a hold key never produces a discrete
//!    press/toggle edge.
//! 3. **Rising edge** — plain `Pressed`, or the toggle latch: latch-on
//!    emits `Pressed`, latch-off emits `Released` (toggle "released"
//!    is delivered on a press edge, never a release edge).
//! 4. **Falling edge** — `Released` unless the binding toggles; a hold
//!    binding resets its repeat timer to the epoch here so the next
//!    press fires immediately.
//! 5. **Tick** — emitted every cycle, whatever else happened.

use heapless::Vec;

use crate::keymap::Binding;
use crate::pins::MAX_KEYS;

/// Semantic events emitted for one key in one cycle, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// First-ever step of this index.
    Setup,
    Pressed,
    Released,
    /// Fires every cycle.
    Tick,
}

/// Ordered event list for one `step` call. At most `Setup` + one edge
/// event + `Tick`.
pub type Dispatch = Vec<KeyEvent, 3>;

/// Persistent per-key state. Owned and mutated exclusively by the
/// engine; nothing else writes these fields.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    initialized: bool,
    current: bool,
    previous: bool,
    /// Latch state; only meaningful for toggle bindings.
    toggled: bool,
    /// Uptime of the last hold-repeat firing. `None` is the epoch:
    /// the next down-cycle fires immediately, regardless of how much
    /// uptime accumulated before the first press.
    last_action_ms: Option<u64>,
}

/// The per-key state machine bank.
pub struct EventEngine {
    states: Vec<ButtonState, MAX_KEYS>,
}

impl EventEngine {
    /// One state record per key, all fields at their zero values.
    ///
    /// # Panics
    ///
    /// If `button_count` exceeds [`MAX_KEYS`]; the keymap is validated
    /// against the same bound before the engine is built.
    pub fn new(button_count: usize) -> Self {
        let mut states = Vec::new();
        for _ in 0..button_count {
            states.push(ButtonState::default()).expect("button_count <= MAX_KEYS");
        }
        Self { states }
    }

    pub fn button_count(&self) -> usize {
        self.states.len()
    }

    /// Step one key with this cycle's sample. Must be called exactly
    /// once per index per cycle, in ascending index order, followed by
    /// one [`commit`](Self::commit) after the full sweep.
    pub fn step(&mut self, index: usize, binding: &Binding, sample: bool, now_ms: u64) -> Dispatch {
        let state = &mut self.states[index];
        let mut out = Dispatch::new();

        state.current = sample;

        if !state.initialized {
            state.initialized = true;
            let _ = out.push(KeyEvent::Setup);
        }

        if binding.hold && state.current {
            // Taken even when the repeat timer is not due — the edge
            // branches below must stay suppressed while the key is down.
            let due = match state.last_action_ms {
                None => true,
                Some(t) => now_ms.saturating_sub(t) > u64::from(binding.hold_interval_ms),
            };
            if due {
                let _ = out.push(KeyEvent::Pressed);
                state.last_action_ms = Some(now_ms);
            }
        } else if !state.previous && state.current {
            if binding.toggle {
                if state.toggled {
                    state.toggled = false;
                    let _ = out.push(KeyEvent::Released);
                } else {
                    state.toggled = true;
                    let _ = out.push(KeyEvent::Pressed);
                }
            } else {
                let _ = out.push(KeyEvent::Pressed);
            }
        } else if state.previous && !state.current {
            if !binding.toggle {
                let _ = out.push(KeyEvent::Released);
            }
            if binding.hold {
                state.last_action_ms = None;
            }
        }

        let _ = out.push(KeyEvent::Tick);
        out
    }

    /// Whole-sweep buffer swap: every key's `previous` becomes this
    /// cycle's `current`. Called once per cycle, after all indices have
    /// been stepped — never per key, so no index ever compares against
    /// a half-updated sweep.
    pub fn commit(&mut self) {
        for state in &mut self.states {
            state.previous = state.current;
        }
    }
}
