//! Capacitive soil-moisture sensor driver.
//!
//! Reads the analog voltage through an ADC channel and maps it onto a
//! 0–100 % scale using a two-point calibration.  Note the inversion: a
//! *higher* raw value means drier soil and maps to a *lower* percentage.
//! The calibration bounds were tuned empirically per sensor batch and live
//! in [`PlantConfig`](crate::config::PlantConfig), never in this driver.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real ADC channel via the oneshot API.
//! On host/test: reads from per-plant `AtomicU16`s for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use log::debug;

#[cfg(not(target_os = "espidf"))]
use crate::config::MAX_PLANTS;
use crate::config::PlantConfig;

#[cfg(not(target_os = "espidf"))]
static SIM_MOISTURE_ADC: [AtomicU16; MAX_PLANTS] = [AtomicU16::new(0), AtomicU16::new(0)];

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_moisture_raw(plant: usize, raw: u16) {
    SIM_MOISTURE_ADC[plant].store(raw, Ordering::Relaxed);
}

/// Raw ADC full-scale for the moisture channels.
pub const ADC_FULL_SCALE: u16 = 1023;

pub struct MoistureSensor {
    /// Plant index — selects the ADC channel (and the sim slot on host).
    plant: usize,
    /// Raw reading with the probe fully dry (maps to 0 %).
    dry_raw: u16,
    /// Raw reading with the probe submerged (maps to 100 %).
    wet_raw: u16,
    /// Lowest raw value seen since boot. Diagnostics only; never reset.
    observed_low: u16,
    /// Highest raw value seen since boot. Diagnostics only; never reset.
    observed_high: u16,
    _adc_gpio: i32,
}

impl MoistureSensor {
    pub fn new(plant: usize, adc_gpio: i32, cfg: &PlantConfig) -> Self {
        Self {
            plant,
            dry_raw: cfg.moisture_dry_raw,
            wet_raw: cfg.moisture_wet_raw,
            observed_low: ADC_FULL_SCALE,
            observed_high: 0,
            _adc_gpio: adc_gpio,
        }
    }

    /// Acquire one reading and return the moisture percentage, 0–100.
    ///
    /// Never fails: a reading outside the calibrated range clamps to 0 or
    /// 100 and is reported at debug level only.
    pub fn sample(&mut self) -> u8 {
        let raw = self.read_adc();
        self.convert(raw)
    }

    /// Map one raw sample to a percentage, updating the observed extremes.
    /// Split from [`sample`] so the mapping is testable without hardware.
    pub fn convert(&mut self, raw: u16) -> u8 {
        if raw < self.observed_low {
            self.observed_low = raw;
            debug!("moisture[{}]: new low observed: {raw}", self.plant);
        }
        if raw > self.observed_high {
            self.observed_high = raw;
            debug!("moisture[{}]: new high observed: {raw}", self.plant);
        }

        // Linear map [dry_raw → wet_raw] onto [0 → 100].  dry > wet is
        // enforced by SystemConfig::validate, so the divisor is positive.
        let span = i32::from(self.dry_raw) - i32::from(self.wet_raw);
        let mapped = (i32::from(self.dry_raw) - i32::from(raw)) * 100 / span;

        if mapped > 100 {
            debug!(
                "moisture[{}]: raw {raw} beyond wet calibration {} — clamping to 100",
                self.plant, self.wet_raw
            );
            100
        } else if mapped < 0 {
            debug!(
                "moisture[{}]: raw {raw} beyond dry calibration {} — clamping to 0",
                self.plant, self.dry_raw
            );
            0
        } else {
            mapped as u8
        }
    }

    /// Extremes observed since boot, for telemetry: `(lowest, highest)`.
    pub fn observed_extremes(&self) -> (u16, u16) {
        (self.observed_low, self.observed_high)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        crate::drivers::hw_init::adc1_read_moisture(self.plant)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_MOISTURE_ADC[self.plant].load(Ordering::Relaxed)
    }
}
