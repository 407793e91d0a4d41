//! The screen cycle.
//!
//! ```text
//!   Status → WaterLevel → Moisture(0) → Pump(0) ─┬→ Moisture(1) → Pump(1) ─┐
//!      ▲                                         │ (plant 2 disabled)      │
//!      └─────────────────────────────────────────┴─────────────────────────┘
//! ```
//!
//! Navigation is a closed cycle over a fixed ordered set; the plant-2
//! screens drop out of the cycle when plant 2 is disabled by configuration.

/// Identity of one screen.  Per-plant screens carry the plant index so all
/// drawing and action handling is written once and parametrised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Aggregate system status (ring + OK/WARN/CRIT).  Initial screen.
    Status,
    /// Reservoir level percentage.
    WaterLevel,
    /// Soil moisture percentage for one plant.
    Moisture(usize),
    /// Pump state / countdown for one plant; the action button toggles it.
    Pump(usize),
}

impl Screen {
    /// Step forward along the cycle.
    pub fn next(self, plant2_enabled: bool) -> Self {
        match self {
            Self::Status => Self::WaterLevel,
            Self::WaterLevel => Self::Moisture(0),
            Self::Moisture(p) => Self::Pump(p),
            Self::Pump(0) if plant2_enabled => Self::Moisture(1),
            Self::Pump(_) => Self::Status,
        }
    }

    /// Step backward along the cycle (exact inverse of [`next`](Self::next)).
    pub fn previous(self, plant2_enabled: bool) -> Self {
        match self {
            Self::Status if plant2_enabled => Self::Pump(1),
            Self::Status => Self::Pump(0),
            Self::WaterLevel => Self::Status,
            Self::Moisture(0) => Self::WaterLevel,
            Self::Moisture(p) => Self::Pump(p - 1),
            Self::Pump(p) => Self::Moisture(p),
        }
    }

    /// Label drawn at the top of the per-value screens.
    pub fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::WaterLevel => "Water Level",
            Self::Moisture(0) => "Moisture 1",
            Self::Moisture(_) => "Moisture 2",
            Self::Pump(0) => "Pump 1",
            Self::Pump(_) => "Pump 2",
        }
    }
}
