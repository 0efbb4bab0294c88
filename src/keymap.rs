//! Static per-key binding tables.
//!
//! A [`Keymap`] assigns every key index a [`Binding`]: the event-engine
//! flags (toggle, hold, hold interval) plus up to four [`Action`] slots.
//! Actions are plain data over `'static` slices — no capturing closures,
//! the key index is always passed explicitly at dispatch time — so a
//! layout is an ordinary table that can be validated once at startup.
//!
//! Three stock layouts ship with the firmware:
//!
//! | Layout       | Keys | Input            | Use                      |
//! |--------------|------|------------------|--------------------------|
//! | `MediaDeck16`| 16   | I²C expander     | media / volume control   |
//! | `GameDeck12` | 12   | direct GPIO      | game macros + transport  |
//! | `MacroPad16` | 16   | direct GPIO      | F-key macros, LED-less   |

use heapless::Vec;

use crate::error::Error;
use crate::keycodes::{ConsumerCode, Keycode};
use crate::pins::{LED_COUNT_12, LED_COUNT_16, MAX_KEYS};

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

// ── Palette ───────────────────────────────────────────────────

pub const COLOUR_BLUE: Rgb = (0, 0, 255);
pub const COLOUR_ICE: Rgb = (51, 153, 255);
pub const COLOUR_GREEN: Rgb = (0, 255, 0);
pub const COLOUR_RED: Rgb = (255, 0, 0);
pub const COLOUR_AMBER: Rgb = (255, 102, 0);
pub const COLOUR_YELLOW: Rgb = (255, 255, 0);
pub const COLOUR_MAGENTA: Rgb = (255, 0, 255);

// ── Actions ───────────────────────────────────────────────────

/// One dispatchable effect. `Seq` composes several (the usual shape is
/// "send a media code, then recolour the key's LED").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Recolour this key's LED (routed through the layout's pixel map).
    Indicator(Rgb),
    /// Hold the given keyboard usages down.
    Press(&'static [Keycode]),
    /// Release the given keyboard usages.
    Release(&'static [Keycode]),
    /// Tap: press and release in one report pair.
    Send(&'static [Keycode]),
    /// Emit a consumer-control (media) usage.
    Consumer(ConsumerCode),
    /// Run several actions in order.
    Seq(&'static [Action]),
}

// ── Bindings ──────────────────────────────────────────────────

/// Static configuration for one key index.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    /// Re-fire `on_pressed` repeatedly while the key is down. A key
    /// with `hold` set never produces a discrete press/toggle edge.
    pub hold: bool,
    /// Minimum gap between hold-repeat firings; 0 fires every cycle.
    pub hold_interval_ms: u32,
    /// Press edges alternate pressed/released; raw releases are ignored.
    pub toggle: bool,
    /// Runs once, the first cycle this key is ever stepped.
    pub on_setup: Option<Action>,
    pub on_pressed: Option<Action>,
    pub on_released: Option<Action>,
    /// Runs every cycle, independent of edge/hold state.
    pub on_tick: Option<Action>,
}

impl Binding {
    /// A key with no behaviour at all.
    pub const fn quiet() -> Self {
        Self {
            hold: false,
            hold_interval_ms: 0,
            toggle: false,
            on_setup: None,
            on_pressed: None,
            on_released: None,
            on_tick: None,
        }
    }
}

impl Default for Binding {
    fn default() -> Self {
        Self::quiet()
    }
}

// ── Keymap ────────────────────────────────────────────────────

/// A full device layout: one binding per key plus the key→LED routing.
#[derive(Debug, Clone)]
pub struct Keymap {
    pub name: &'static str,
    pub bindings: Vec<Binding, MAX_KEYS>,
    /// Key index → pixel index on the strip. The 12-key board routes
    /// its strip in column order, so this is not always the identity.
    pub pixel_map: &'static [usize],
    /// Pixels on the strip this layout drives.
    pub led_count: usize,
}

impl Keymap {
    pub fn button_count(&self) -> usize {
        self.bindings.len()
    }

    /// Startup validation. A keymap that references a missing pixel or
    /// mismatches its pixel map is a configuration error, fatal before
    /// the first poll cycle.
    pub fn validate(&self) -> Result<(), Error> {
        if self.bindings.is_empty() {
            return Err(Error::Config("keymap has no bindings"));
        }
        if self.pixel_map.len() != self.bindings.len() {
            return Err(Error::Config("pixel map length != binding count"));
        }
        if self.pixel_map.iter().any(|&p| p >= self.led_count) {
            return Err(Error::Config("pixel map references LED beyond strip"));
        }
        Ok(())
    }
}

// ── Stock layouts ─────────────────────────────────────────────

/// Media control deck: 16 keys behind the I²C expander, identity pixel
/// map. Volume keys repeat while held; key 12 latches Shift.
pub fn media_deck_16() -> Keymap {
    const IDENTITY_16: [usize; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

    let mut b = [Binding::quiet(); 16];

    b[1] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_AMBER)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::Mute),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_AMBER)),
        ..Binding::quiet()
    };
    b[2] = Binding {
        hold: true,
        hold_interval_ms: 200,
        on_setup: Some(Action::Indicator(COLOUR_GREEN)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::VolumeDecrement),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_GREEN)),
        ..Binding::quiet()
    };
    b[3] = Binding {
        hold: true,
        hold_interval_ms: 200,
        on_setup: Some(Action::Indicator(COLOUR_GREEN)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::VolumeIncrement),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_GREEN)),
        ..Binding::quiet()
    };
    b[4] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_RED)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::Stop),
            Action::Indicator(COLOUR_YELLOW),
        ])),
        on_released: Some(Action::Indicator(COLOUR_RED)),
        ..Binding::quiet()
    };
    b[5] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::ScanPreviousTrack),
            Action::Indicator(COLOUR_ICE),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };
    b[6] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_GREEN)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::PlayPause),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_GREEN)),
        ..Binding::quiet()
    };
    b[7] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::ScanNextTrack),
            Action::Indicator(COLOUR_ICE),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };
    // Latched Shift: press edges alternate on/off, the LED tracks the
    // latch state.
    b[12] = Binding {
        toggle: true,
        on_setup: Some(Action::Seq(&[
            Action::Indicator(COLOUR_BLUE),
            Action::Release(&[Keycode::LeftShift]),
        ])),
        on_pressed: Some(Action::Seq(&[
            Action::Indicator(COLOUR_ICE),
            Action::Press(&[Keycode::LeftShift]),
        ])),
        on_released: Some(Action::Seq(&[
            Action::Indicator(COLOUR_BLUE),
            Action::Release(&[Keycode::LeftShift]),
        ])),
        ..Binding::quiet()
    };
    b[15] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Indicator(COLOUR_MAGENTA),
            Action::Send(&[Keycode::LeftControl, Keycode::KeypadPeriod]),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };

    Keymap {
        name: "media-deck-16",
        bindings: Vec::from_slice(&b).expect("16 <= MAX_KEYS"),
        pixel_map: &IDENTITY_16,
        led_count: LED_COUNT_16,
    }
}

/// Game deck: 12 direct-wired keys. Key 0 latches Shift+W (autorun),
/// volume keys repeat while held, transport row in the middle.
pub fn game_deck_12() -> Keymap {
    // The strip snakes under the board in column order.
    const PIXEL_MAP_12: [usize; 12] = [8, 4, 0, 9, 5, 1, 10, 6, 2, 11, 7, 3];

    let mut b = [Binding::quiet(); 12];

    b[0] = Binding {
        toggle: true,
        on_setup: Some(Action::Seq(&[
            Action::Indicator(COLOUR_BLUE),
            Action::Release(&[Keycode::LeftShift, Keycode::W]),
        ])),
        on_pressed: Some(Action::Seq(&[
            Action::Indicator(COLOUR_ICE),
            Action::Press(&[Keycode::LeftShift, Keycode::W]),
        ])),
        on_released: Some(Action::Seq(&[
            Action::Indicator(COLOUR_BLUE),
            Action::Release(&[Keycode::LeftShift, Keycode::W]),
        ])),
        ..Binding::quiet()
    };
    b[2] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Indicator(COLOUR_MAGENTA),
            Action::Send(&[Keycode::LeftControl, Keycode::KeypadPeriod]),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };
    b[4] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Indicator(COLOUR_ICE),
            Action::Send(&[Keycode::B]),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };
    b[5] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Indicator(COLOUR_ICE),
            Action::Send(&[Keycode::E]),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };
    b[6] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::ScanPreviousTrack),
            Action::Indicator(COLOUR_ICE),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };
    b[7] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_GREEN)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::PlayPause),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_GREEN)),
        ..Binding::quiet()
    };
    b[8] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_BLUE)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::ScanNextTrack),
            Action::Indicator(COLOUR_ICE),
        ])),
        on_released: Some(Action::Indicator(COLOUR_BLUE)),
        ..Binding::quiet()
    };
    b[9] = Binding {
        on_setup: Some(Action::Indicator(COLOUR_AMBER)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::Mute),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_AMBER)),
        ..Binding::quiet()
    };
    b[10] = Binding {
        hold: true,
        hold_interval_ms: 200,
        on_setup: Some(Action::Indicator(COLOUR_GREEN)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::VolumeDecrement),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_GREEN)),
        ..Binding::quiet()
    };
    b[11] = Binding {
        hold: true,
        hold_interval_ms: 200,
        on_setup: Some(Action::Indicator(COLOUR_GREEN)),
        on_pressed: Some(Action::Seq(&[
            Action::Consumer(ConsumerCode::VolumeIncrement),
            Action::Indicator(COLOUR_RED),
        ])),
        on_released: Some(Action::Indicator(COLOUR_GREEN)),
        ..Binding::quiet()
    };

    Keymap {
        name: "game-deck-12",
        bindings: Vec::from_slice(&b).expect("12 <= MAX_KEYS"),
        pixel_map: &PIXEL_MAP_12,
        led_count: LED_COUNT_12,
    }
}

/// Macro pad: 16 direct-wired keys, no per-key LEDs populated (the
/// bindings drive no indicators). Function-key macros for stream-deck
/// software, autorun toggle, media transport. The B/E keys hold-repeat
/// every cycle; the volume keys repeat at 200 ms.
pub fn macro_pad_16() -> Keymap {
    const IDENTITY_16: [usize; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

    let mut b = [Binding::quiet(); 16];

    b[0] = Binding {
        toggle: true,
        on_setup: Some(Action::Release(&[Keycode::LeftShift, Keycode::W])),
        on_pressed: Some(Action::Press(&[Keycode::LeftShift, Keycode::W])),
        on_released: Some(Action::Release(&[Keycode::LeftShift, Keycode::W])),
        ..Binding::quiet()
    };
    b[2] = Binding {
        on_pressed: Some(Action::Send(&[Keycode::F14])),
        ..Binding::quiet()
    };
    b[3] = Binding {
        on_pressed: Some(Action::Send(&[Keycode::F13])),
        ..Binding::quiet()
    };
    b[4] = Binding {
        hold: true,
        on_pressed: Some(Action::Send(&[Keycode::B])),
        ..Binding::quiet()
    };
    b[5] = Binding {
        hold: true,
        on_pressed: Some(Action::Send(&[Keycode::E])),
        ..Binding::quiet()
    };
    b[9] = Binding {
        on_pressed: Some(Action::Consumer(ConsumerCode::ScanPreviousTrack)),
        ..Binding::quiet()
    };
    b[10] = Binding {
        on_pressed: Some(Action::Consumer(ConsumerCode::PlayPause)),
        ..Binding::quiet()
    };
    b[11] = Binding {
        on_pressed: Some(Action::Consumer(ConsumerCode::ScanNextTrack)),
        ..Binding::quiet()
    };
    b[13] = Binding {
        on_pressed: Some(Action::Consumer(ConsumerCode::Mute)),
        ..Binding::quiet()
    };
    b[14] = Binding {
        hold: true,
        hold_interval_ms: 200,
        on_pressed: Some(Action::Consumer(ConsumerCode::VolumeDecrement)),
        ..Binding::quiet()
    };
    b[15] = Binding {
        hold: true,
        hold_interval_ms: 200,
        on_pressed: Some(Action::Consumer(ConsumerCode::VolumeIncrement)),
        ..Binding::quiet()
    };

    Keymap {
        name: "macro-pad-16",
        bindings: Vec::from_slice(&b).expect("16 <= MAX_KEYS"),
        pixel_map: &IDENTITY_16,
        led_count: LED_COUNT_16,
    }
}
