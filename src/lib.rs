//! Waterer firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod events;
pub mod ui;

pub mod error;

mod pins;

// Hardware-facing modules; the ESP-IDF implementations are guarded by
// cfg attributes inside, the host builds run the simulation stubs.
pub mod adapters;
pub mod drivers;
pub mod sensors;
