//! Waterer firmware — main entry point.
//!
//! Hexagonal architecture with a fixed-rate control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter            LogEventSink  MonotonicClock │
//! │  (Sensor+Relay+Display+Audio) (EventSink)                │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  Pump hysteresis · Screen cycle · Diff render  │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use waterer::adapters::{HardwareAdapter, LogEventSink, MonotonicClock};
use waterer::app::commands::InputEvent;
use waterer::app::service::AppService;
use waterer::config::SystemConfig;
use waterer::{drivers, events, sensors};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Waterer v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — continuing without touch input", e);
    }

    // ── 3. Validate the compiled-in configuration ─────────────
    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        log::error!("invalid configuration: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(sensors::SensorHub::new(&config));
    let mut log_sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 5. Construct app service ──────────────────────────────
    let tick_ms = config.control_loop_interval_ms;
    let mut app = AppService::new(config);
    app.start(&mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        // Drain touch events pushed by the ISRs since the last tick.
        let mut inputs: heapless::Vec<InputEvent, 8> = heapless::Vec::new();
        events::drain_events(|event| {
            let _ = inputs.push(InputEvent::from(event));
        });

        app.tick(clock.now_ms(), &inputs, &mut hw, &mut log_sink);

        // Silence the beep once its duration elapses.
        drivers::buzzer::service();

        esp_idf_hal::delay::FreeRtos::delay_ms(tick_ms as u32);
    }
}
