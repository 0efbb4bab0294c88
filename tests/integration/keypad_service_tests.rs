//! Integration tests for the KeypadService → engine → dispatch pipeline.
//!
//! These run on the host (x86_64) and verify the full chain from a
//! scripted key sample down to the recorded HID and LED calls, without
//! any real hardware.

use crate::mock_hw::{
    OutputCall, RecordingEventSink, RecordingIndicator, RecordingOutput, ScriptedInput,
};

use keydeck::app::events::AppEvent;
use keydeck::app::service::KeypadService;
use keydeck::error::{Error, InputError, OutputError};
use keydeck::keycodes::{ConsumerCode, Keycode};
use keydeck::keymap::{self, COLOUR_GREEN, COLOUR_RED};

const POLL_MS: u64 = 20;

struct Rig {
    service: KeypadService,
    input: ScriptedInput,
    output: RecordingOutput,
    indicators: RecordingIndicator,
    events: RecordingEventSink,
    now_ms: u64,
}

impl Rig {
    fn new(keymap: keydeck::keymap::Keymap) -> Self {
        Self {
            service: KeypadService::new(keymap).unwrap(),
            input: ScriptedInput::new(),
            output: RecordingOutput::new(),
            indicators: RecordingIndicator::new(),
            events: RecordingEventSink::new(),
            now_ms: 0,
        }
    }

    /// One poll cycle; advances the clock by the poll interval.
    fn poll(&mut self) -> Result<(), Error> {
        let r = self.service.poll(
            &mut self.input,
            &mut self.output,
            &mut self.indicators,
            &mut self.events,
            self.now_ms,
        );
        self.now_ms += POLL_MS;
        r
    }

    fn poll_ok(&mut self) {
        self.poll().unwrap();
    }
}

// ── First cycle: setup sweep ─────────────────────────────────

#[test]
fn first_cycle_reports_setup_for_every_key() {
    let mut rig = Rig::new(keymap::media_deck_16());
    rig.input.push_keys_down(16, &[]);
    rig.poll_ok();

    let setups: Vec<usize> = rig
        .events
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::KeySetup { index } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(setups, (0..16).collect::<Vec<_>>());
}

#[test]
fn setup_sweep_paints_idle_colours_and_clears_latches() {
    let mut rig = Rig::new(keymap::media_deck_16());
    rig.input.push_keys_down(16, &[]);
    rig.poll_ok();

    // Play/pause key idles green on the identity-mapped strip.
    assert_eq!(rig.indicators.colour_of(6), Some(COLOUR_GREEN));
    // The Shift latch key clears its modifier on setup.
    assert_eq!(
        rig.output.calls,
        vec![OutputCall::Release(vec![Keycode::LeftShift])]
    );
}

// ── Press / release dispatch ─────────────────────────────────

#[test]
fn press_sends_media_code_and_recolours_led() {
    let mut rig = Rig::new(keymap::media_deck_16());
    rig.input.push_keys_down(16, &[]);
    rig.input.push_keys_down(16, &[6]);
    rig.input.push_keys_down(16, &[]);

    rig.poll_ok();
    rig.poll_ok();
    assert_eq!(rig.output.codes_sent(), vec![ConsumerCode::PlayPause]);
    assert_eq!(rig.indicators.colour_of(6), Some(COLOUR_RED));

    rig.poll_ok();
    // Release restores the idle colour; no further reports.
    assert_eq!(rig.output.codes_sent(), vec![ConsumerCode::PlayPause]);
    assert_eq!(rig.indicators.colour_of(6), Some(COLOUR_GREEN));

    assert_eq!(rig.events.pressed_indices(), vec![6]);
    assert!(rig
        .events
        .events
        .contains(&AppEvent::KeyReleased { index: 6 }));
}

#[test]
fn pixel_map_routes_key_to_strip_position() {
    let mut rig = Rig::new(keymap::game_deck_12());
    rig.input.push_keys_down(12, &[]);
    rig.input.push_keys_down(12, &[7]);

    rig.poll_ok();
    // Key 7 (play/pause) sits at strip position 6 on the snaked strip.
    assert_eq!(rig.indicators.colour_of(6), Some(COLOUR_GREEN));
    // Strip position 4 belongs to key 1, which is unbound.
    assert_eq!(rig.indicators.colour_of(4), None);

    rig.poll_ok();
    assert_eq!(rig.output.codes_sent(), vec![ConsumerCode::PlayPause]);
    assert_eq!(rig.indicators.colour_of(6), Some(COLOUR_RED));
}

// ── Toggle latch ─────────────────────────────────────────────

#[test]
fn toggle_key_latches_modifier_across_presses() {
    let mut rig = Rig::new(keymap::media_deck_16());
    rig.input.push_keys_down(16, &[]); // setup
    rig.input.push_keys_down(16, &[12]); // press: latch on
    rig.input.push_keys_down(16, &[]); // raw release: ignored
    rig.input.push_keys_down(16, &[12]); // press: latch off
    rig.input.push_keys_down(16, &[]);

    for _ in 0..5 {
        rig.poll_ok();
    }

    assert_eq!(
        rig.output.calls,
        vec![
            OutputCall::Release(vec![Keycode::LeftShift]), // setup clear
            OutputCall::Press(vec![Keycode::LeftShift]),   // latch on
            OutputCall::Release(vec![Keycode::LeftShift]), // latch off
        ]
    );
    // The latch-off release is reported even though it fired on a
    // press edge.
    assert_eq!(rig.events.pressed_indices(), vec![12]);
    assert_eq!(
        rig.events
            .events
            .iter()
            .filter(|e| matches!(e, AppEvent::KeyReleased { index: 12 }))
            .count(),
        1
    );
}

// ── Hold repeat ──────────────────────────────────────────────

#[test]
fn held_volume_key_repeats_at_its_interval() {
    let mut rig = Rig::new(keymap::media_deck_16());
    rig.input.push_keys_down(16, &[]);
    // Key 3 (volume up, 200 ms interval) held for 12 cycles.
    for _ in 0..12 {
        rig.input.push_keys_down(16, &[3]);
    }

    for _ in 0..13 {
        rig.poll_ok();
    }

    // First fire on the cycle the key goes down (t=20), second once
    // more than 200 ms has elapsed (t=240).
    assert_eq!(
        rig.output.codes_sent(),
        vec![
            ConsumerCode::VolumeIncrement,
            ConsumerCode::VolumeIncrement
        ]
    );
}

#[test]
fn macro_pad_sends_function_keys_and_repeats_every_cycle() {
    let mut rig = Rig::new(keymap::macro_pad_16());
    rig.input.push_keys_down(16, &[]);
    rig.input.push_keys_down(16, &[3]); // F13 macro
    rig.input.push_keys_down(16, &[]);
    // Key 4 (B) has a zero repeat interval: held three cycles, fires
    // three times.
    for _ in 0..3 {
        rig.input.push_keys_down(16, &[4]);
    }

    for _ in 0..6 {
        rig.poll_ok();
    }

    assert_eq!(
        rig.output.calls,
        vec![
            // Setup sweep clears the autorun toggle's chord.
            OutputCall::Release(vec![Keycode::LeftShift, Keycode::W]),
            OutputCall::Send(vec![Keycode::F13]),
            OutputCall::Send(vec![Keycode::B]),
            OutputCall::Send(vec![Keycode::B]),
            OutputCall::Send(vec![Keycode::B]),
        ]
    );
    // This board binds no indicators at all.
    assert!(rig.indicators.calls.is_empty());
}

// ── Failure paths ────────────────────────────────────────────

#[test]
fn sample_failure_propagates_and_is_not_counted() {
    let mut rig = Rig::new(keymap::media_deck_16());
    rig.input.push_keys_down(16, &[]);
    rig.input.push_error(InputError::BusReadFailed(-7));
    rig.input.push_keys_down(16, &[6]);

    rig.poll_ok();
    assert_eq!(
        rig.poll(),
        Err(Error::Input(InputError::BusReadFailed(-7)))
    );
    assert_eq!(rig.service.cycle_count(), 1);

    // The next good sample dispatches normally.
    rig.poll_ok();
    assert_eq!(rig.output.codes_sent(), vec![ConsumerCode::PlayPause]);
}

#[test]
fn action_failure_aborts_cycle_and_edge_is_retried() {
    let mut rig = Rig::new(keymap::media_deck_16());
    rig.input.push_keys_down(16, &[]);
    rig.input.push_keys_down(16, &[6]);
    rig.input.push_keys_down(16, &[6]);

    rig.poll_ok();

    // HID not mounted on the press cycle: the cycle aborts and is not
    // committed, so the same press edge is seen again next cycle.
    rig.output.fail_next = Some(OutputError::HidNotReady);
    assert_eq!(rig.poll(), Err(Error::Output(OutputError::HidNotReady)));
    assert_eq!(rig.service.cycle_count(), 1);
    assert!(rig.output.codes_sent().is_empty());

    rig.poll_ok();
    assert_eq!(rig.output.codes_sent(), vec![ConsumerCode::PlayPause]);
    assert_eq!(rig.service.cycle_count(), 2);
}

// ── Construction ─────────────────────────────────────────────

#[test]
fn mismatched_keymap_is_rejected_at_construction() {
    let mut km = keymap::media_deck_16();
    km.pixel_map = &[0, 1, 2];
    assert!(KeypadService::new(km).is_err());
}
