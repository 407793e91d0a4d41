//! Diff-aware frame renderer.
//!
//! The display sits on a slow SPI bus, so redrawing everything each tick
//! would flicker and eat the tick budget.  The renderer instead compares
//! the current [`UiFrame`] against the previous tick's frame:
//!
//! - entering a screen fresh (`prev.screen != cur.screen`) clears and
//!   redraws fully;
//! - a repeat tick on the same screen redraws only sub-elements whose
//!   value changed, erasing the old value in the background colour first.
//!
//! A repeat tick with nothing changed issues **zero** display calls — the
//! tests hold the renderer to that.

use core::fmt::Write as _;

use heapless::String;

use super::screen::Screen;
use super::status::{SystemStatus, colour_for_percentage};
use super::{Colour, TextPos};
use crate::app::ports::DisplayPort;
use crate::config::{MAX_PLANTS, SystemConfig};

/// Everything the renderer needs to draw one tick, captured as plain data
/// so the previous tick's frame can be kept for diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiFrame {
    pub screen: Screen,
    pub status: SystemStatus,
    pub water_level_pct: u8,
    pub moisture_pct: [u8; MAX_PLANTS],
    pub pump_on: [bool; MAX_PLANTS],
    pub pump_secs_remaining: [u64; MAX_PLANTS],
}

/// Render one tick.  `prev` is `None` only on the very first frame after
/// boot, which draws fresh.
pub fn render(
    display: &mut impl DisplayPort,
    cur: &UiFrame,
    prev: Option<&UiFrame>,
    config: &SystemConfig,
) {
    let fresh = prev.is_none_or(|p| p.screen != cur.screen);

    match cur.screen {
        Screen::Status => {
            render_status(display, cur.status, prev.map(|p| p.status), fresh);
        }
        Screen::WaterLevel => {
            render_gauge(
                display,
                cur.screen.label(),
                cur.water_level_pct,
                prev.map(|p| p.water_level_pct),
                fresh,
                config,
            );
        }
        Screen::Moisture(p) => {
            render_gauge(
                display,
                cur.screen.label(),
                cur.moisture_pct[p],
                prev.map(|f| f.moisture_pct[p]),
                fresh,
                config,
            );
        }
        Screen::Pump(p) => {
            render_pump(
                display,
                cur.screen.label(),
                cur.pump_on[p],
                cur.pump_secs_remaining[p],
                prev.map(|f| (f.pump_on[p], f.pump_secs_remaining[p])),
                fresh,
            );
        }
    }
}

// ── Status screen ─────────────────────────────────────────────

fn render_status(
    display: &mut impl DisplayPort,
    status: SystemStatus,
    prev_status: Option<SystemStatus>,
    fresh: bool,
) {
    let colour = status.colour();
    if fresh {
        display.clear();
        display.draw_ring(colour);
        display.draw_text(status.text(), 4, TextPos::Centre, colour);
    } else if let Some(prev) = prev_status {
        if prev != status {
            display.draw_ring(colour);
            display.draw_text(prev.text(), 4, TextPos::Centre, Colour::Black);
            display.draw_text(status.text(), 4, TextPos::Centre, colour);
        }
    }
}

// ── Percentage gauge screens (water level, moisture) ──────────

fn render_gauge(
    display: &mut impl DisplayPort,
    label: &str,
    pct: u8,
    prev_pct: Option<u8>,
    fresh: bool,
    config: &SystemConfig,
) {
    if fresh {
        display.clear();
        draw_percentage(display, label, pct, colour_for_percentage(pct, config));
    } else if let Some(prev) = prev_pct {
        if prev != pct {
            draw_percentage(display, label, prev, Colour::Black);
            draw_percentage(display, label, pct, colour_for_percentage(pct, config));
        }
    }
}

fn draw_percentage(display: &mut impl DisplayPort, label: &str, pct: u8, colour: Colour) {
    let mut value: String<8> = String::new();
    let _ = write!(value, "{pct}%");
    display.draw_text(label, 2, TextPos::Label, colour);
    display.draw_text(&value, 3, TextPos::Value, colour);
    display.draw_ring(colour);
}

// ── Pump screens ──────────────────────────────────────────────

fn render_pump(
    display: &mut impl DisplayPort,
    label: &str,
    on: bool,
    secs_remaining: u64,
    prev: Option<(bool, u64)>,
    fresh: bool,
) {
    let colour = if on { Colour::Blue } else { Colour::White };

    if fresh {
        display.clear();
        draw_countdown(display, label, if on { secs_remaining } else { 0 }, colour);
        return;
    }
    let Some((prev_on, prev_secs)) = prev else {
        return;
    };

    if on && !prev_on {
        // Transitioning into a countdown: wipe and start over.
        display.clear();
        draw_countdown(display, label, secs_remaining, colour);
    } else if on && secs_remaining != prev_secs {
        // Same countdown, new second: erase and redraw the number only.
        display.draw_text(&countdown_text(prev_secs), 3, TextPos::Value, Colour::Black);
        display.draw_text(&countdown_text(secs_remaining), 3, TextPos::Value, colour);
    } else if !on && prev_on {
        // Transitioning out of a countdown: simpler to wipe the screen.
        display.clear();
        draw_countdown(display, label, 0, colour);
    }
}

fn draw_countdown(display: &mut impl DisplayPort, label: &str, secs: u64, colour: Colour) {
    display.draw_text(label, 2, TextPos::Label, colour);
    display.draw_text(&countdown_text(secs), 3, TextPos::Value, colour);
    display.draw_ring(colour);
}

fn countdown_text(secs: u64) -> String<12> {
    let mut s: String<12> = String::new();
    if secs == 0 {
        let _ = s.push_str("Off");
    } else {
        let _ = write!(s, "{secs}");
    }
    s
}
