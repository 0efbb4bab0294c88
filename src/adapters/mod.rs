//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                  |
//! |------------|---------------|------------------------------|
//! | `hardware` | InputSource   | TCA9555 expander, ESP32 GPIO |
//! |            | OutputSink    | TinyUSB HID                  |
//! |            | IndicatorSink | APA102 strip over SPI        |
//! | `log_sink` | EventSink     | Serial log output            |
//! | `time`     | (clock)       | ESP32 system timer           |

pub mod hardware;
pub mod log_sink;
pub mod time;
