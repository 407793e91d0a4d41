//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them through
//! [`SensorPort`], [`RelayPort`], [`DisplayPort`] and [`AudioPort`].  This
//! is the only module in the system that touches actual hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{AudioPort, DisplayPort, RelayPort, SensorPort};
use crate::config::MAX_PLANTS;
use crate::drivers::buzzer;
use crate::drivers::display::DisplayDriver;
use crate::drivers::relay::RelayDriver;
use crate::pins;
use crate::sensors::{SensorHub, SensorSnapshot};
use crate::ui::{Colour, TextPos};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    relays: [RelayDriver; MAX_PLANTS],
    display: DisplayDriver,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub) -> Self {
        Self {
            sensor_hub,
            relays: [
                RelayDriver::new(pins::RELAY_1_GPIO),
                RelayDriver::new(pins::RELAY_2_GPIO),
            ],
            display: DisplayDriver::new(),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }

    fn moisture_extremes(&self, plant: usize) -> (u16, u16) {
        self.sensor_hub.moisture_extremes(plant)
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl RelayPort for HardwareAdapter {
    fn set_pump(&mut self, plant: usize, on: bool) {
        self.relays[plant].set(on);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn clear(&mut self) {
        self.display.clear();
    }

    fn draw_ring(&mut self, colour: Colour) {
        self.display.draw_ring(colour);
    }

    fn draw_text(&mut self, text: &str, size: u8, pos: TextPos, colour: Colour) {
        self.display.draw_text(text, size, pos, colour);
    }
}

// ── AudioPort implementation ──────────────────────────────────

impl AudioPort for HardwareAdapter {
    fn beep(&mut self) {
        buzzer::beep();
    }
}
