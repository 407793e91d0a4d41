//! Pump relay driver (one latching relay channel per plant).
//!
//! A relay channel is a dumb on/off actuator: HIGH opens the relay and
//! powers the pump, LOW closes it. All run-duration policy lives in the
//! pump controller; this driver only mirrors the commanded state onto
//! the GPIO.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::debug;

use crate::drivers::hw_init;

pub struct RelayDriver {
    gpio: i32,
    is_open: bool,
}

impl RelayDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            is_open: false,
        }
    }

    /// Open (true) or close (false) the relay. Idempotent — repeat writes
    /// of the current state touch neither the GPIO nor the log.
    pub fn set(&mut self, open: bool) {
        if open == self.is_open {
            return;
        }
        hw_init::gpio_write(self.gpio, open);
        self.is_open = open;
        debug!(
            "relay(gpio {}): {}",
            self.gpio,
            if open { "open" } else { "closed" }
        );
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
