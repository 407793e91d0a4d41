//! System configuration parameters
//!
//! All tunable parameters for the waterer. The moisture calibration bounds
//! and the tank-full percentage were found empirically per sensor batch —
//! they must stay configurable rather than hard-coded in the drivers.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Maximum number of plants the controller supports. Plant slots beyond the
/// first can be disabled per-config; all per-plant logic is index-driven.
pub const MAX_PLANTS: usize = 2;

/// Per-plant tunables: moisture calibration and pump trigger policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantConfig {
    /// Whether this plant slot is monitored and watered at all.
    pub enabled: bool,
    /// Raw ADC reading with the probe fully dry (maps to 0 %).
    pub moisture_dry_raw: u16,
    /// Raw ADC reading with the probe submerged (maps to 100 %).
    pub moisture_wet_raw: u16,
    /// Auto-trigger the pump only below this moisture percentage.
    pub trigger_threshold_pct: u8,
    /// Minimum time between automatic pump runs (milliseconds).
    pub pump_check_interval_ms: u64,
}

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Per-plant settings, indexed by plant id.
    pub plants: [PlantConfig; MAX_PLANTS],

    // --- Water level ---
    /// System status turns Warn at or below this water level (%).
    pub warn_level_pct: u8,
    /// System status turns Critical at or below this water level (%).
    pub critical_level_pct: u8,
    /// Decoded sensor percentage at which the tank is physically full.
    /// Readings are rescaled so this value displays as 100 %.
    pub max_water_level_pct: u8,

    // --- Pump ---
    /// Fixed pump run duration per activation (milliseconds).
    pub pump_run_duration_ms: u64,
    /// Measured pump flow rate (mL/s). Reserved for volume telemetry.
    pub pump_flow_ml_per_sec: u8,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            plants: [
                PlantConfig {
                    enabled: true,
                    moisture_dry_raw: 795,
                    moisture_wet_raw: 285,
                    trigger_threshold_pct: 50,
                    pump_check_interval_ms: 60_000,
                },
                PlantConfig {
                    enabled: true,
                    moisture_dry_raw: 795,
                    moisture_wet_raw: 285,
                    trigger_threshold_pct: 50,
                    // Offset from plant 1 so the two pumps never fire in
                    // the same tick and load the supply together.
                    pump_check_interval_ms: 67_000,
                },
            ],

            warn_level_pct: 50,
            critical_level_pct: 25,
            max_water_level_pct: 80,

            pump_run_duration_ms: 5_000,
            pump_flow_ml_per_sec: 8,

            control_loop_interval_ms: 10,
            telemetry_interval_secs: 60,
        }
    }
}

impl SystemConfig {
    /// Number of enabled plant slots.
    pub fn enabled_plants(&self) -> usize {
        self.plants.iter().filter(|p| p.enabled).count()
    }

    /// Whether the second plant slot is active (drives the screen cycle).
    pub fn plant2_enabled(&self) -> bool {
        self.plants[1].enabled
    }

    /// Shortest permissible control loop interval. The moisture ADC needs
    /// ~10 ms between samples of the same channel to settle.
    pub const MIN_LOOP_INTERVAL_MS: u32 = 10;

    /// Reject configurations that would make the control loop misbehave.
    /// Returns an [`Error::Config`] naming the offending field on failure.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.critical_level_pct >= self.warn_level_pct {
            return Err(Error::Config("critical_level_pct must be below warn_level_pct"));
        }
        if self.max_water_level_pct == 0 || self.max_water_level_pct > 100 {
            return Err(Error::Config("max_water_level_pct must be in 1..=100"));
        }
        if self.pump_run_duration_ms == 0 {
            return Err(Error::Config("pump_run_duration_ms must be non-zero"));
        }
        if self.control_loop_interval_ms < Self::MIN_LOOP_INTERVAL_MS {
            return Err(Error::Config("control_loop_interval_ms must allow the ADC to settle"));
        }
        if !self.plants[0].enabled {
            return Err(Error::Config("plant 1 cannot be disabled"));
        }
        for p in &self.plants {
            if p.moisture_wet_raw >= p.moisture_dry_raw {
                return Err(Error::Config("moisture_wet_raw must be below moisture_dry_raw"));
            }
            if p.trigger_threshold_pct > 100 {
                return Err(Error::Config("trigger_threshold_pct must be <= 100"));
            }
        }
        Ok(())
    }
}
