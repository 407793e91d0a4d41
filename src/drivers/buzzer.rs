//! Piezo buzzer driver (LEDC tone).
//!
//! Emits a short confirmation chirp on touch input. The tone is started
//! non-blocking — `beep()` raises the duty and records a deadline, and
//! `service()` (called every control tick) silences the channel once the
//! beep duration has elapsed. The control loop is never stalled.
//!
//! On host builds the beep is a log line only.

use core::sync::atomic::{AtomicI64, Ordering};

use log::debug;

use crate::drivers::hw_init;

/// Beep tone, E7 on the piano.
pub const BEEP_FREQ_HZ: u32 = 2637;
/// Beep duration.
pub const BEEP_DURATION_MS: i64 = 100;

/// Deadline (us since boot) at which the running beep stops; 0 = silent.
static BEEP_OFF_DEADLINE_US: AtomicI64 = AtomicI64::new(0);

/// Start a confirmation chirp. Non-blocking.
pub fn beep() {
    debug!("buzzer: beep ({} Hz, {} ms)", BEEP_FREQ_HZ, BEEP_DURATION_MS);
    hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, 128);
    BEEP_OFF_DEADLINE_US.store(now_us() + BEEP_DURATION_MS * 1_000, Ordering::Release);
}

/// Silence the buzzer once the beep duration has elapsed.
/// Call once per control tick.
pub fn service() {
    let deadline = BEEP_OFF_DEADLINE_US.load(Ordering::Acquire);
    if deadline != 0 && now_us() >= deadline {
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, 0);
        BEEP_OFF_DEADLINE_US.store(0, Ordering::Release);
    }
}

#[cfg(target_os = "espidf")]
fn now_us() -> i64 {
    // SAFETY: esp_timer_get_time is a monotonic counter read.
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

#[cfg(not(target_os = "espidf"))]
fn now_us() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or(0)
}
