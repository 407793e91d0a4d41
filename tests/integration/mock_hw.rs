//! Mock hardware adapter for integration tests.
//!
//! Records every actuator and display call so tests can assert on the
//! full command history without touching real GPIO/I2C/SPI registers.

use waterer::app::events::AppEvent;
use waterer::app::ports::{AudioPort, DisplayPort, EventSink, RelayPort, SensorPort};
use waterer::config::MAX_PLANTS;
use waterer::sensors::SensorSnapshot;
use waterer::ui::{Colour, TextPos};

// ── Display call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Ring(Colour),
    Text {
        text: String,
        size: u8,
        pos: TextPos,
        colour: Colour,
    },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Sensor values returned by the next `read_all()` — set these to
    /// script a scenario.
    pub water_level_pct: u8,
    pub moisture_pct: [u8; MAX_PLANTS],

    /// Full relay command history, `(plant, on)` per call.
    pub relay_calls: Vec<(usize, bool)>,
    /// Full display primitive history.
    pub draw_calls: Vec<DrawCall>,
    /// Confirmation beeps heard.
    pub beeps: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            water_level_pct: 100,
            moisture_pct: [100; MAX_PLANTS],
            relay_calls: Vec::new(),
            draw_calls: Vec::new(),
            beeps: 0,
        }
    }

    /// Latest commanded state of one plant's relay (off before any call).
    pub fn relay_open(&self, plant: usize) -> bool {
        self.relay_calls
            .iter()
            .rev()
            .find_map(|&(p, on)| (p == plant).then_some(on))
            .unwrap_or(false)
    }

    /// True if the relay was ever commanded open.
    pub fn relay_ever_opened(&self, plant: usize) -> bool {
        self.relay_calls.iter().any(|&(p, on)| p == plant && on)
    }

    pub fn draw_count(&self) -> usize {
        self.draw_calls.len()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            water_level_pct: self.water_level_pct,
            moisture_pct: self.moisture_pct,
        }
    }

    fn moisture_extremes(&self, _plant: usize) -> (u16, u16) {
        (1023, 0)
    }
}

impl RelayPort for MockHardware {
    fn set_pump(&mut self, plant: usize, on: bool) {
        self.relay_calls.push((plant, on));
    }
}

impl DisplayPort for MockHardware {
    fn clear(&mut self) {
        self.draw_calls.push(DrawCall::Clear);
    }

    fn draw_ring(&mut self, colour: Colour) {
        self.draw_calls.push(DrawCall::Ring(colour));
    }

    fn draw_text(&mut self, text: &str, size: u8, pos: TextPos, colour: Colour) {
        self.draw_calls.push(DrawCall::Text {
            text: text.to_owned(),
            size,
            pos,
            colour,
        });
    }
}

impl AudioPort for MockHardware {
    fn beep(&mut self) {
        self.beeps += 1;
    }
}

// ── Recording event sink ─────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn pump_changes(&self) -> Vec<(usize, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PumpChanged { plant, on } => Some((*plant, *on)),
                _ => None,
            })
            .collect()
    }

    pub fn screen_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ScreenChanged { .. }))
            .count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
