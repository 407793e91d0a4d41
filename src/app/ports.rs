//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, relays, display, buzzer, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly — and the whole control loop runs against mocks on the host.

use crate::sensors::SensorSnapshot;
use crate::ui::{Colour, TextPos};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;

    /// Observed raw extremes of one plant's moisture probe (diagnostics).
    fn moisture_extremes(&self, plant: usize) -> (u16, u16);
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → pump relays)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the pump relays.
///
/// Commands are idempotent: the service re-commands the current state
/// every tick rather than relying on edge-triggered calls, so a missed
/// tick can never leave a relay latched the wrong way.
pub trait RelayPort {
    /// Open (`true`) or close (`false`) one plant's pump relay.
    fn set_pump(&mut self, plant: usize, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel primitives)
// ───────────────────────────────────────────────────────────────

/// Stateless primitive drawing: the core computes what and where, the
/// panel shim executes.
pub trait DisplayPort {
    /// Fill the whole panel with the background colour.
    fn clear(&mut self);

    /// Draw the outer gauge ring in the given colour.
    fn draw_ring(&mut self, colour: Colour);

    /// Draw centred text at a named anchor position.
    fn draw_text(&mut self, text: &str, size: u8, pos: TextPos, colour: Colour);
}

// ───────────────────────────────────────────────────────────────
// Audio port (driven adapter: domain → buzzer)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget confirmation tone.
pub trait AudioPort {
    fn beep(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// a telemetry radio would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
