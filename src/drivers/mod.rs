//! Hardware drivers (ESP-IDF implementations with host-side simulation).

pub mod buzzer;
pub mod display;
pub mod hw_init;
pub mod relay;
pub mod touch;
