//! Unified error types for the waterer firmware.
//!
//! The control core itself is deliberately infallible: out-of-calibration
//! sensor readings clamp to the valid range, and a wedged I2C transfer is a
//! fatal hang at the transport layer, not a recoverable error here.  These
//! types cover the boundaries that *can* fail — peripheral init and
//! configuration — and keep the top-level error handling uniform.
//! All variants are `Copy` so they can be passed around without allocation.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed. The raw ESP-IDF return code is
    /// logged at the failure site; the payload names the stage that failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
