//! Driven adapters — concrete implementations of the app's port traits.

pub mod hardware;
pub mod log_sink;
pub mod time;

pub use hardware::HardwareAdapter;
pub use log_sink::LogEventSink;
pub use time::MonotonicClock;
