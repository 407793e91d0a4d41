//! 20-segment capacitive water level sensor (two ATtiny banks over I2C).
//!
//! The probe exposes two fixed-length byte arrays: 8 low segments at
//! [`WATER_LEVEL_LOW_ADDR`](crate::pins::WATER_LEVEL_LOW_ADDR) and 12 high
//! segments at [`WATER_LEVEL_HIGH_ADDR`](crate::pins::WATER_LEVEL_HIGH_ADDR),
//! ordered lowest physical position first.  A segment with water contact
//! reads above a fixed touch threshold.
//!
//! The decode assumes the water line is contiguous from the bottom: it
//! counts set bits upward from segment 0 and stops at the first dry one,
//! so a single fouled low segment caps the reading — an accepted
//! limitation of the probe, not an error.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: blocking I2C reads of exactly 8 and 12 bytes (a short
//! transfer hangs the bus layer — fatal by design).
//! On host/test: segment bytes come from atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU8, Ordering};

use crate::pins::{WATER_LEVEL_HIGH_BYTES, WATER_LEVEL_LOW_BYTES};

/// Total addressable sensing segments across both banks.
pub const SEGMENT_COUNT: usize = WATER_LEVEL_LOW_BYTES + WATER_LEVEL_HIGH_BYTES;

/// Segment byte values strictly above this count as water contact.
pub const TOUCH_THRESHOLD: u8 = 100;

/// Percent of full scale contributed by one triggered segment.
const PCT_PER_SEGMENT: u8 = 100 / SEGMENT_COUNT as u8;

#[cfg(not(target_os = "espidf"))]
#[allow(clippy::declare_interior_mutable_const)]
const ZERO: AtomicU8 = AtomicU8::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_LOW_SEGMENTS: [AtomicU8; WATER_LEVEL_LOW_BYTES] = [ZERO; WATER_LEVEL_LOW_BYTES];
#[cfg(not(target_os = "espidf"))]
static SIM_HIGH_SEGMENTS: [AtomicU8; WATER_LEVEL_HIGH_BYTES] = [ZERO; WATER_LEVEL_HIGH_BYTES];

/// Inject raw segment bytes for host-side tests.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_segments(
    low: &[u8; WATER_LEVEL_LOW_BYTES],
    high: &[u8; WATER_LEVEL_HIGH_BYTES],
) {
    for (slot, b) in SIM_LOW_SEGMENTS.iter().zip(low) {
        slot.store(*b, Ordering::Relaxed);
    }
    for (slot, b) in SIM_HIGH_SEGMENTS.iter().zip(high) {
        slot.store(*b, Ordering::Relaxed);
    }
}

/// Decode raw segment bytes into a level percentage (0–100).
///
/// Builds a 20-bit contact set (low bank = bits 0–7, high bank = bits
/// 8–19) and counts contiguously-set bits from bit 0; the first clear bit
/// stops the scan regardless of anything above it.
pub fn level_from_segments(
    low: &[u8; WATER_LEVEL_LOW_BYTES],
    high: &[u8; WATER_LEVEL_HIGH_BYTES],
) -> u8 {
    let mut touched: u32 = 0;
    for (i, b) in low.iter().enumerate() {
        if *b > TOUCH_THRESHOLD {
            touched |= 1 << i;
        }
    }
    for (i, b) in high.iter().enumerate() {
        if *b > TOUCH_THRESHOLD {
            touched |= 1 << (WATER_LEVEL_LOW_BYTES + i);
        }
    }

    let mut triggered: u8 = 0;
    while touched & 0x01 != 0 {
        triggered += 1;
        touched >>= 1;
    }

    triggered * PCT_PER_SEGMENT
}

pub struct WaterLevelSensor {
    low_data: [u8; WATER_LEVEL_LOW_BYTES],
    high_data: [u8; WATER_LEVEL_HIGH_BYTES],
}

impl WaterLevelSensor {
    pub fn new() -> Self {
        Self {
            low_data: [0; WATER_LEVEL_LOW_BYTES],
            high_data: [0; WATER_LEVEL_HIGH_BYTES],
        }
    }

    /// Fetch fresh segment data from both banks and decode the level.
    pub fn read(&mut self) -> u8 {
        self.fetch_segments();
        level_from_segments(&self.low_data, &self.high_data)
    }

    #[cfg(target_os = "espidf")]
    fn fetch_segments(&mut self) {
        use crate::pins::{WATER_LEVEL_HIGH_ADDR, WATER_LEVEL_LOW_ADDR};
        crate::drivers::hw_init::i2c_read_exact(WATER_LEVEL_LOW_ADDR, &mut self.low_data);
        crate::drivers::hw_init::i2c_read_exact(WATER_LEVEL_HIGH_ADDR, &mut self.high_data);
    }

    #[cfg(not(target_os = "espidf"))]
    fn fetch_segments(&mut self) {
        for (b, slot) in self.low_data.iter_mut().zip(&SIM_LOW_SEGMENTS) {
            *b = slot.load(Ordering::Relaxed);
        }
        for (b, slot) in self.high_data.iter_mut().zip(&SIM_HIGH_SEGMENTS) {
            *b = slot.load(Ordering::Relaxed);
        }
    }
}

impl Default for WaterLevelSensor {
    fn default() -> Self {
        Self::new()
    }
}
