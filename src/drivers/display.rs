//! Round LCD display driver boundary.
//!
//! The panel itself (GC9A01 over SPI) is handled by the display module on
//! the carrier board; this driver is the command boundary the renderer
//! draws through. It tracks what was last drawn and logs each primitive,
//! which is also what the host simulation runs against.

use log::debug;

use crate::ui::{Colour, TextPos};

pub struct DisplayDriver {
    draw_ops: u64,
    last_ring: Option<Colour>,
}

impl DisplayDriver {
    pub fn new() -> Self {
        Self {
            draw_ops: 0,
            last_ring: None,
        }
    }

    /// Fill the whole panel black.
    pub fn clear(&mut self) {
        self.draw_ops += 1;
        self.last_ring = None;
        debug!("display: clear");
    }

    /// Draw the outer status ring.
    pub fn draw_ring(&mut self, colour: Colour) {
        self.draw_ops += 1;
        self.last_ring = Some(colour);
        debug!("display: ring {:?}", colour);
    }

    /// Draw centred text at one of the fixed layout positions.
    pub fn draw_text(&mut self, text: &str, size: u8, pos: TextPos, colour: Colour) {
        self.draw_ops += 1;
        debug!("display: text {:?} size {} at {:?} in {:?}", text, size, pos, colour);
    }

    pub fn draw_ops(&self) -> u64 {
        self.draw_ops
    }

    pub fn last_ring(&self) -> Option<Colour> {
        self.last_ring
    }
}

impl Default for DisplayDriver {
    fn default() -> Self {
        Self::new()
    }
}
