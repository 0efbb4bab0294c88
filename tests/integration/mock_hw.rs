//! Mock hardware adapters for integration tests.
//!
//! `ScriptedInput` replays queued sample frames; the recording sinks
//! capture every output call so tests can assert on the full command
//! history without touching real I²C/SPI/USB registers.

use std::collections::VecDeque;

use keydeck::app::events::AppEvent;
use keydeck::app::ports::{EventSink, IndicatorSink, InputSource, OutputSink};
use keydeck::error::{InputError, OutputError};
use keydeck::keycodes::{ConsumerCode, Keycode};
use keydeck::keymap::Rgb;

// ── Scripted key input ────────────────────────────────────────

/// Input source that replays a queued script of sample frames. A queued
/// error is returned in its turn; once the script runs out, every key
/// reads as released.
pub struct ScriptedInput {
    frames: VecDeque<Result<Vec<bool>, InputError>>,
}

#[allow(dead_code)]
impl ScriptedInput {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }

    pub fn push_frame(&mut self, frame: &[bool]) {
        self.frames.push_back(Ok(frame.to_vec()));
    }

    /// Frame with exactly the given key indices down.
    pub fn push_keys_down(&mut self, key_count: usize, down: &[usize]) {
        let mut frame = vec![false; key_count];
        for &i in down {
            frame[i] = true;
        }
        self.frames.push_back(Ok(frame));
    }

    pub fn push_error(&mut self, err: InputError) {
        self.frames.push_back(Err(err));
    }
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, samples: &mut [bool]) -> Result<(), InputError> {
        match self.frames.pop_front() {
            Some(Ok(frame)) => {
                if frame.len() != samples.len() {
                    return Err(InputError::LengthMismatch);
                }
                samples.copy_from_slice(&frame);
                Ok(())
            }
            Some(Err(e)) => Err(e),
            None => {
                samples.fill(false);
                Ok(())
            }
        }
    }
}

// ── Recording HID output ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputCall {
    Press(Vec<Keycode>),
    Release(Vec<Keycode>),
    Send(Vec<Keycode>),
    SendCode(ConsumerCode),
}

pub struct RecordingOutput {
    pub calls: Vec<OutputCall>,
    /// One-shot injected failure for the next output call.
    pub fail_next: Option<OutputError>,
}

#[allow(dead_code)]
impl RecordingOutput {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_next: None,
        }
    }

    pub fn codes_sent(&self) -> Vec<ConsumerCode> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                OutputCall::SendCode(code) => Some(*code),
                _ => None,
            })
            .collect()
    }

    fn take_failure(&mut self) -> Result<(), OutputError> {
        match self.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for RecordingOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for RecordingOutput {
    fn press(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        self.take_failure()?;
        self.calls.push(OutputCall::Press(keys.to_vec()));
        Ok(())
    }

    fn release(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        self.take_failure()?;
        self.calls.push(OutputCall::Release(keys.to_vec()));
        Ok(())
    }

    fn send(&mut self, keys: &[Keycode]) -> Result<(), OutputError> {
        self.take_failure()?;
        self.calls.push(OutputCall::Send(keys.to_vec()));
        Ok(())
    }

    fn send_code(&mut self, code: ConsumerCode) -> Result<(), OutputError> {
        self.take_failure()?;
        self.calls.push(OutputCall::SendCode(code));
        Ok(())
    }
}

// ── Recording LED indicator ───────────────────────────────────

pub struct RecordingIndicator {
    /// (pixel index, colour) in call order.
    pub calls: Vec<(usize, Rgb)>,
}

#[allow(dead_code)]
impl RecordingIndicator {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Last colour written to a pixel, if any.
    pub fn colour_of(&self, pixel: usize) -> Option<Rgb> {
        self.calls
            .iter()
            .rev()
            .find_map(|&(p, rgb)| (p == pixel).then_some(rgb))
    }
}

impl Default for RecordingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorSink for RecordingIndicator {
    fn set(&mut self, index: usize, rgb: Rgb) -> Result<(), OutputError> {
        self.calls.push((index, rgb));
        Ok(())
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingEventSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingEventSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn pressed_indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::KeyPressed { index } => Some(*index),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
