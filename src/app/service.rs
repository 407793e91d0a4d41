//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the pump controllers, the screen cycle, and the
//! previous-frame snapshot that drives diff rendering.  It exposes a
//! clean, hardware-agnostic API; all I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │ ──▶ RelayPort
//!  InputEvents ──▶│  pumps · screen · status│ ──▶ DisplayPort
//!                 └────────────────────────┘ ──▶ AudioPort
//! ```

use log::info;

use crate::config::{MAX_PLANTS, SystemConfig};
use crate::control::pump::PumpController;
use crate::sensors::SensorSnapshot;
use crate::ui::render::{self, UiFrame};
use crate::ui::screen::Screen;
use crate::ui::status::SystemStatus;

use super::commands::InputEvent;
use super::events::{AppEvent, TelemetryData};
use super::ports::{AudioPort, DisplayPort, EventSink, RelayPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
///
/// It is the sole owner of every piece of mutable control state — sensor
/// percentages, pump state, screen state.  Collaborators see values
/// through the read-only accessors, never shared mutable memory.
pub struct AppService {
    config: SystemConfig,
    pumps: [PumpController; MAX_PLANTS],
    screen: Screen,
    status: SystemStatus,
    sensors: SensorSnapshot,
    /// Frame rendered last tick; `None` before the first render.
    prev_frame: Option<UiFrame>,
    /// Pump state as of the previous tick, for change events.
    prev_pump_on: [bool; MAX_PLANTS],
    last_telemetry_ms: u64,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    /// Call [`start`](Self::start) before the first [`tick`](Self::tick).
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            pumps: core::array::from_fn(PumpController::new),
            screen: Screen::Status,
            status: SystemStatus::Ok,
            sensors: SensorSnapshot::default(),
            prev_frame: None,
            prev_pump_on: [false; MAX_PLANTS],
            last_telemetry_ms: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup on the initial screen.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.screen));
        info!("AppService started on {:?} screen", self.screen);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle:
    /// read sensors → derive status → handle input → pump triggers →
    /// pump timers + relays → render → snapshot for the next diff.
    ///
    /// The `hw` parameter satisfies **all** hardware ports — this avoids
    /// a double mutable borrow while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        inputs: &[InputEvent],
        hw: &mut (impl SensorPort + RelayPort + DisplayPort + AudioPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Read sensors via SensorPort.
        self.sensors = hw.read_all();

        // 2. Derive aggregate status from the reservoir level.
        let status = SystemStatus::derive(self.sensors.water_level_pct, &self.config);
        if status != self.status {
            sink.emit(&AppEvent::StatusChanged {
                from: self.status,
                to: status,
            });
        }
        self.status = status;

        // 3. Handle touch input (may toggle pumps — do this before the
        //    timer step so a manual-on arms its deadline this tick).
        for &input in inputs {
            self.handle_input(input, hw, sink);
        }

        // 4. Scheduled auto-on checks.
        for plant in 0..MAX_PLANTS {
            if self.config.plants[plant].enabled {
                self.pumps[plant].evaluate_trigger(
                    now_ms,
                    self.sensors.moisture_pct[plant],
                    &self.config.plants[plant],
                );
            }
        }

        // 5. Advance run timers and command the relays.  Relay commands
        //    are issued every tick, idempotently.
        for plant in 0..MAX_PLANTS {
            self.pumps[plant].advance(now_ms, self.config.pump_run_duration_ms);
            let on = self.pumps[plant].is_on();
            hw.set_pump(plant, on);
            if on != self.prev_pump_on[plant] {
                sink.emit(&AppEvent::PumpChanged { plant, on });
            }
            self.prev_pump_on[plant] = on;
        }

        // 6. Render the current frame against last tick's.
        let frame = self.build_frame(now_ms);
        render::render(hw, &frame, self.prev_frame.as_ref(), &self.config);

        // 7. Snapshot for next tick's diff.
        self.prev_frame = Some(frame);

        // 8. Periodic telemetry.
        let telemetry_ms = u64::from(self.config.telemetry_interval_secs) * 1000;
        if now_ms.saturating_sub(self.last_telemetry_ms) >= telemetry_ms {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry(now_ms, hw)));
            self.last_telemetry_ms = now_ms;
        }
    }

    // ── Input handling ────────────────────────────────────────

    /// Interpret one touch event in the context of the current screen.
    /// Every touch gets a confirmation beep, action or not.
    fn handle_input(
        &mut self,
        input: InputEvent,
        hw: &mut impl AudioPort,
        sink: &mut impl EventSink,
    ) {
        let plant2 = self.config.plant2_enabled();
        match input {
            InputEvent::Next => {
                self.navigate(self.screen.next(plant2), hw, sink);
            }
            InputEvent::Previous => {
                self.navigate(self.screen.previous(plant2), hw, sink);
            }
            InputEvent::Action => {
                hw.beep();
                if let Screen::Pump(plant) = self.screen {
                    self.pumps[plant].toggle();
                }
            }
        }
    }

    fn navigate(
        &mut self,
        to: Screen,
        hw: &mut impl AudioPort,
        sink: &mut impl EventSink,
    ) {
        hw.beep();
        sink.emit(&AppEvent::ScreenChanged {
            from: self.screen,
            to,
        });
        self.screen = to;
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self, now_ms: u64, hw: &impl SensorPort) -> TelemetryData {
        TelemetryData {
            screen: self.screen,
            status: self.status,
            water_level_pct: self.sensors.water_level_pct,
            moisture_pct: self.sensors.moisture_pct,
            pump_on: core::array::from_fn(|i| self.pumps[i].is_on()),
            ms_since_last_run: core::array::from_fn(|i| self.pumps[i].ms_since_last_run(now_ms)),
            moisture_raw_extremes: core::array::from_fn(|i| hw.moisture_extremes(i)),
        }
    }

    /// Currently shown screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Aggregate system status as of the last tick.
    pub fn status(&self) -> SystemStatus {
        self.status
    }

    /// Whether a plant's pump is commanded on.
    pub fn pump_on(&self, plant: usize) -> bool {
        self.pumps[plant].is_on()
    }

    /// Reservoir level as of the last tick (0–100 %).
    pub fn water_level_pct(&self) -> u8 {
        self.sensors.water_level_pct
    }

    /// Soil moisture as of the last tick (0–100 %).
    pub fn moisture_pct(&self, plant: usize) -> u8 {
        self.sensors.moisture_pct[plant]
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }

    // ── Internal ──────────────────────────────────────────────

    fn build_frame(&self, now_ms: u64) -> UiFrame {
        UiFrame {
            screen: self.screen,
            status: self.status,
            water_level_pct: self.sensors.water_level_pct,
            moisture_pct: self.sensors.moisture_pct,
            pump_on: core::array::from_fn(|i| self.pumps[i].is_on()),
            pump_secs_remaining: core::array::from_fn(|i| {
                self.pumps[i].seconds_remaining(now_ms)
            }),
        }
    }
}
