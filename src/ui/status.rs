//! Aggregate system status, derived from the reservoir level alone.
//!
//! Every mapping here is a total function over the enum — there is no
//! default/fallthrough arm to hide an unhandled variant, and the unit
//! tests walk every variant explicitly.

use super::Colour;
use crate::config::SystemConfig;

/// Overall system health shown on the status screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    Ok,
    Warn,
    Critical,
}

impl SystemStatus {
    /// All variants, for exhaustiveness checks in tests.
    pub const ALL: [Self; 3] = [Self::Ok, Self::Warn, Self::Critical];

    /// Recomputed every tick, independent of which screen is shown.
    pub fn derive(water_level_pct: u8, config: &SystemConfig) -> Self {
        if water_level_pct <= config.critical_level_pct {
            Self::Critical
        } else if water_level_pct <= config.warn_level_pct {
            Self::Warn
        } else {
            Self::Ok
        }
    }

    pub fn colour(self) -> Colour {
        match self {
            Self::Ok => Colour::Green,
            Self::Warn => Colour::Yellow,
            Self::Critical => Colour::Red,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Critical => "CRIT",
        }
    }
}

/// Gauge colour for a percentage value (water level / moisture screens):
/// red at or below critical, yellow at or below warn, blue otherwise.
pub fn colour_for_percentage(pct: u8, config: &SystemConfig) -> Colour {
    if pct <= config.critical_level_pct {
        Colour::Red
    } else if pct <= config.warn_level_pct {
        Colour::Yellow
    } else {
        Colour::Blue
    }
}
