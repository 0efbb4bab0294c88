//! GPIO / peripheral pin assignments for the Keydeck boards.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers. Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// I²C bus (16-key board: keys behind a 16-bit port expander)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// I²C bus clock. The expander is the only device on the bus.
pub const I2C_FREQ_HZ: u32 = 400_000;

/// 7-bit address of the TCA9555-class 16-bit port expander.
pub const EXPANDER_I2C_ADDR: u8 = 0x20;
/// Input-port register pair; a two-byte read returns all 16 key bits.
pub const EXPANDER_INPUT_REG: u8 = 0x00;

// ---------------------------------------------------------------------------
// Direct-wired keys (12-key board: one GPIO per key, active-low)
// ---------------------------------------------------------------------------

/// Key index → GPIO, 12-key board. Internal pull-ups, switch to ground.
pub const KEY_GPIOS_12: [i32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 13];

/// Key index → GPIO, 16-key macro pad. Keys are numbered in reading
/// order; the switch matrix is wired column-first, so the array absorbs
/// that permutation.
pub const KEY_GPIOS_16: [i32; 16] = [
    1, 5, 9, 13, 2, 6, 10, 16, 3, 7, 11, 17, 4, 8, 12, 21,
];

// ---------------------------------------------------------------------------
// Addressable LED strip (APA102-class, SPI)
// ---------------------------------------------------------------------------

pub const LED_SPI_MOSI_GPIO: i32 = 18;
pub const LED_SPI_SCLK_GPIO: i32 = 19;
/// APA102 tolerates a wide clock range; 4 MHz keeps edges clean on the
/// unbuffered strip header.
pub const LED_SPI_FREQ_HZ: u32 = 4_000_000;

/// Strip length on the 16-key board (one pixel under each key).
pub const LED_COUNT_16: usize = 16;
/// Strip length on the 12-key board.
pub const LED_COUNT_12: usize = 12;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Largest key bank any supported board carries. Sizes the fixed
/// per-button state and sample buffers.
pub const MAX_KEYS: usize = 16;
