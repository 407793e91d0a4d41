//! GPIO / peripheral pin assignments for the waterer main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Moisture sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Capacitive moisture sensor, plant 1 — analog voltage via ADC1.
pub const MOISTURE_1_ADC_GPIO: i32 = 5;
/// Capacitive moisture sensor, plant 2.
pub const MOISTURE_2_ADC_GPIO: i32 = 6;
/// ADC attenuation for the moisture channels (11 dB → 0 – 3.1 V range).
pub const MOISTURE_ADC_ATTEN: u32 = 3; // esp_idf_hal::adc::attenuation::DB_11

// ---------------------------------------------------------------------------
// Water level sensor — 20-segment capacitive array (I2C)
// ---------------------------------------------------------------------------

/// I2C address of the ATtiny serving the upper 12 sensing segments.
pub const WATER_LEVEL_HIGH_ADDR: u8 = 0x78;
/// I2C address of the ATtiny serving the lower 8 sensing segments.
pub const WATER_LEVEL_LOW_ADDR: u8 = 0x77;
/// Byte count returned by the high-band ATtiny.
pub const WATER_LEVEL_HIGH_BYTES: usize = 12;
/// Byte count returned by the low-band ATtiny.
pub const WATER_LEVEL_LOW_BYTES: usize = 8;

/// I2C bus pins.
pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Pump relays (one latching relay channel per plant)
// ---------------------------------------------------------------------------

/// Digital output: relay channel for pump 1 (HIGH = relay open = pump running).
pub const RELAY_1_GPIO: i32 = 1;
/// Digital output: relay channel for pump 2.
pub const RELAY_2_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Touch buttons (capacitive pads on the carrier face)
// ---------------------------------------------------------------------------

/// Touch pad: navigate to the previous screen.
pub const TOUCH_PREV_GPIO: i32 = 10;
/// Touch pad: navigate to the next screen.
pub const TOUCH_NEXT_GPIO: i32 = 11;
/// Touch pad: contextual action (pump toggle on the pump screens).
pub const TOUCH_ACTION_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Buzzer (piezo, LEDC tone)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Display (round 240x240 LCD over SPI)
// ---------------------------------------------------------------------------

pub const DISPLAY_SCK_GPIO: i32 = 14;
pub const DISPLAY_MOSI_GPIO: i32 = 15;
pub const DISPLAY_CS_GPIO: i32 = 16;
pub const DISPLAY_DC_GPIO: i32 = 17;
