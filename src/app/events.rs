//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today that is the serial log.

use crate::config::MAX_PLANTS;
use crate::ui::screen::Screen;
use crate::ui::status::SystemStatus;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The user navigated to a different screen.
    ScreenChanged { from: Screen, to: Screen },

    /// The aggregate system status crossed a threshold.
    StatusChanged { from: SystemStatus, to: SystemStatus },

    /// A pump turned on or off (auto trigger, manual toggle, or timer).
    PumpChanged { plant: usize, on: bool },

    /// The application service has started (carries the initial screen).
    Started(Screen),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub screen: Screen,
    pub status: SystemStatus,
    pub water_level_pct: u8,
    pub moisture_pct: [u8; MAX_PLANTS],
    pub pump_on: [bool; MAX_PLANTS],
    pub ms_since_last_run: [u64; MAX_PLANTS],
    /// Observed raw moisture extremes since boot, `(low, high)` per plant.
    pub moisture_raw_extremes: [(u16, u16); MAX_PLANTS],
}
