//! KeyDeck Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-rate poll loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  KeyInput          HidOutput        PixelIndicator       │
//! │  (InputSource)     (OutputSink)     (IndicatorSink)      │
//! │  LogEventSink      Esp32TimeAdapter                      │
//! │  (EventSink)       (clock)                               │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │         KeypadService (pure logic)             │      │
//! │  │  EventEngine · Keymap dispatch                 │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use keydeck::adapters::hardware::{HidOutput, KeyInput, PixelIndicator};
use keydeck::adapters::log_sink::LogEventSink;
use keydeck::adapters::time::Esp32TimeAdapter;
use keydeck::app::service::KeypadService;
use keydeck::config::{DeviceConfig, Layout};
use keydeck::drivers::expander::ExpanderKeys;
use keydeck::drivers::keys::GpioKeys;
use keydeck::drivers::pixels::PixelStrip;
use keydeck::drivers::watchdog::Watchdog;
use keydeck::drivers::hw_init;
use keydeck::keymap;
use keydeck::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  KeyDeck v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = DeviceConfig::default();
    if let Err(e) = config.validate() {
        log::error!("Config invalid: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    info!(
        "Layout: {:?}, poll interval {}ms, brightness {}%",
        config.layout, config.poll_interval_ms, config.led_brightness_percent
    );

    // ── 3. Peripheral bring-up ────────────────────────────────
    let keymap = match config.layout {
        Layout::MediaDeck16 => keymap::media_deck_16(),
        Layout::GameDeck12 => keymap::game_deck_12(),
        Layout::MacroPad16 => keymap::macro_pad_16(),
    };

    let init_result = match config.layout {
        Layout::MediaDeck16 => {
            hw_init::init_i2c().map(|()| KeyInput::Expander(ExpanderKeys::new()))
        }
        Layout::GameDeck12 => hw_init::init_key_gpios(&pins::KEY_GPIOS_12)
            .map(|()| KeyInput::Direct(GpioKeys::new(&pins::KEY_GPIOS_12))),
        Layout::MacroPad16 => hw_init::init_key_gpios(&pins::KEY_GPIOS_16)
            .map(|()| KeyInput::Direct(GpioKeys::new(&pins::KEY_GPIOS_16))),
    };
    let mut input = match init_result {
        Ok(i) => i,
        Err(e) => {
            // Key input failure is critical — log and halt. In production
            // the task watchdog resets the chip after timeout.
            log::error!("Key input init failed: {} — halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };

    if let Err(e) = hw_init::init_spi() {
        warn!("LED SPI init failed: {} — continuing without pixels", e);
    }
    if let Err(e) = hw_init::init_usb() {
        log::error!("USB init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let watchdog = Watchdog::new();
    let clock = Esp32TimeAdapter::new();

    // ── 4. Adapters + service ─────────────────────────────────
    let mut output = HidOutput::new();
    let mut indicators = PixelIndicator::new(PixelStrip::new(
        keymap.led_count,
        config.led_brightness_percent,
    ));
    let mut events = LogEventSink::new();

    let mut service = match KeypadService::new(keymap) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Keymap invalid: {} — halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };

    if let Err(e) = indicators.all_off() {
        warn!("Pixel clear failed: {}", e);
    }

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    let interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    loop {
        let now_ms = clock.uptime_ms();
        if let Err(e) = service.poll(&mut input, &mut output, &mut indicators, &mut events, now_ms)
        {
            // A failed cycle leaves edge state untouched, so the same
            // transition is retried on the next poll.
            log::error!("Poll cycle failed: {}", e);
        }

        watchdog.feed();
        thread::sleep(interval);
    }
}
