//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future telemetry-radio adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | screen={:?} status={:?} | water={}% | \
                     moist=[{}%, {}%] raw_extremes=[{:?}, {:?}] | \
                     pumps=[{}, {}] last_run=[{}s, {}s] ago",
                    t.screen,
                    t.status,
                    t.water_level_pct,
                    t.moisture_pct[0],
                    t.moisture_pct[1],
                    t.moisture_raw_extremes[0],
                    t.moisture_raw_extremes[1],
                    if t.pump_on[0] { "ON" } else { "off" },
                    if t.pump_on[1] { "ON" } else { "off" },
                    t.ms_since_last_run[0] / 1_000,
                    t.ms_since_last_run[1] / 1_000,
                );
            }
            AppEvent::ScreenChanged { from, to } => {
                info!("SCREEN | {:?} -> {:?}", from, to);
            }
            AppEvent::StatusChanged { from, to } => {
                info!("STATUS | {:?} -> {:?}", from, to);
            }
            AppEvent::PumpChanged { plant, on } => {
                info!("PUMP | plant {} {}", plant + 1, if *on { "ON" } else { "off" });
            }
            AppEvent::Started(screen) => {
                info!("START | initial_screen={:?}", screen);
            }
        }
    }
}
