//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! tick that the application service reads its decisions from.

pub mod moisture;
pub mod water_level;

use log::warn;

use crate::config::{MAX_PLANTS, SystemConfig};
use crate::pins;
use moisture::MoistureSensor;
use water_level::WaterLevelSensor;

/// A point-in-time snapshot of every sensor in the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorSnapshot {
    /// Reservoir water level, 0–100 % of a full tank.
    pub water_level_pct: u8,
    /// Soil moisture per plant, 0–100 %.  Disabled plants stay at their
    /// last sampled value (initially 0).
    pub moisture_pct: [u8; MAX_PLANTS],
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    moisture: [MoistureSensor; MAX_PLANTS],
    water_level: WaterLevelSensor,
    enabled: [bool; MAX_PLANTS],
    /// Decoded sensor percentage at which the tank is physically full.
    max_water_level_pct: u8,
    last: SensorSnapshot,
}

impl SensorHub {
    pub fn new(config: &SystemConfig) -> Self {
        let adc_gpios = [pins::MOISTURE_1_ADC_GPIO, pins::MOISTURE_2_ADC_GPIO];
        let moisture = core::array::from_fn(|i| MoistureSensor::new(i, adc_gpios[i], &config.plants[i]));
        let enabled = core::array::from_fn(|i| config.plants[i].enabled);

        Self {
            moisture,
            water_level: WaterLevelSensor::new(),
            enabled,
            max_water_level_pct: config.max_water_level_pct,
            last: SensorSnapshot::default(),
        }
    }

    /// Read every enabled sensor and return a unified snapshot.
    pub fn read_all(&mut self) -> SensorSnapshot {
        self.last.water_level_pct = self.scaled_water_level();
        for i in 0..MAX_PLANTS {
            if self.enabled[i] {
                self.last.moisture_pct[i] = self.moisture[i].sample();
            }
        }
        self.last
    }

    /// Observed raw-value extremes for one plant's moisture probe.
    pub fn moisture_extremes(&self, plant: usize) -> (u16, u16) {
        self.moisture[plant].observed_extremes()
    }

    /// Decode the raw level and rescale so a physically full tank (which
    /// the probe reads as `max_water_level_pct`) displays as 100 %.
    fn scaled_water_level(&mut self) -> u8 {
        let raw_pct = self.water_level.read();
        let mapped = u32::from(raw_pct) * 100 / u32::from(self.max_water_level_pct);

        if mapped > 100 {
            warn!(
                "water level {raw_pct}% exceeds tank-full calibration {}% — clamping",
                self.max_water_level_pct
            );
            100
        } else {
            mapped as u8
        }
    }
}
