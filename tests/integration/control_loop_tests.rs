//! Integration tests for the full AppService control cycle.
//!
//! Each tick runs the whole pipeline — sensor read, status derivation,
//! input handling, pump triggers, relay commands, diff rendering and
//! event emission — against the recording mocks.

use crate::mock_hw::{LogSink, MockHardware};

use waterer::app::commands::InputEvent;
use waterer::app::events::AppEvent;
use waterer::app::service::AppService;
use waterer::config::SystemConfig;
use waterer::ui::screen::Screen;
use waterer::ui::status::SystemStatus;

const TICK_MS: u64 = 10;

fn make_app() -> (AppService, MockHardware, LogSink) {
    let config = SystemConfig::default();
    config.validate().expect("default config must be valid");
    let mut app = AppService::new(config);
    let mut sink = LogSink::new();
    app.start(&mut sink);
    (app, MockHardware::new(), sink)
}

/// Run ticks with no input from `from_ms` until just before `to_ms`.
fn run_idle(
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut LogSink,
    from_ms: u64,
    to_ms: u64,
) {
    let mut now = from_ms;
    while now < to_ms {
        app.tick(now, &[], hw, sink);
        now += TICK_MS;
    }
}

// ── Automatic watering ────────────────────────────────────────

#[test]
fn dry_soil_opens_relay_after_interval_and_closes_after_run() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.moisture_pct = [10, 100]; // plant 1 dry, plant 2 fine

    let interval = app.current_config().plants[0].pump_check_interval_ms;
    let run_ms = app.current_config().pump_run_duration_ms;

    // Dry soil alone is not enough — the check interval gates the trigger.
    run_idle(&mut app, &mut hw, &mut sink, 0, interval);
    assert!(!hw.relay_ever_opened(0), "no run before the interval elapses");

    // First tick past the interval starts a run.
    let t_on = interval + TICK_MS;
    app.tick(t_on, &[], &mut hw, &mut sink);
    assert!(app.pump_on(0));
    assert!(hw.relay_open(0));
    assert_eq!(sink.pump_changes(), vec![(0, true)]);

    // The run survives a saturated mid-run reading.
    hw.moisture_pct[0] = 100;
    run_idle(&mut app, &mut hw, &mut sink, t_on + TICK_MS, t_on + run_ms);
    assert!(app.pump_on(0), "run is never cut short by sensor readings");

    // First tick at the deadline closes the relay.
    app.tick(t_on + run_ms, &[], &mut hw, &mut sink);
    assert!(!app.pump_on(0));
    assert!(!hw.relay_open(0));
    assert_eq!(sink.pump_changes(), vec![(0, true), (0, false)]);

    // Plant 2 was never involved.
    assert!(!hw.relay_ever_opened(1));
}

#[test]
fn wet_soil_never_triggers_a_run() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.moisture_pct = [100, 100];

    let interval = app.current_config().plants[1].pump_check_interval_ms;
    run_idle(&mut app, &mut hw, &mut sink, 0, interval * 3);

    assert!(!hw.relay_ever_opened(0));
    assert!(!hw.relay_ever_opened(1));
    assert!(sink.pump_changes().is_empty());
}

#[test]
fn staggered_intervals_keep_the_pumps_from_starting_together() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.moisture_pct = [0, 0]; // both plants bone dry

    let cfg = app.current_config();
    let i1 = cfg.plants[0].pump_check_interval_ms;
    let i2 = cfg.plants[1].pump_check_interval_ms;
    assert!(i2 > i1, "plant intervals are deliberately offset");

    app.tick(i1 + TICK_MS, &[], &mut hw, &mut sink);
    assert!(app.pump_on(0));
    assert!(!app.pump_on(1), "plant 2 waits for its own interval");

    app.tick(i2 + TICK_MS, &[], &mut hw, &mut sink);
    assert!(app.pump_on(1));
}

// ── Manual control ────────────────────────────────────────────

#[test]
fn action_on_the_pump_screen_toggles_that_pump() {
    let (mut app, mut hw, mut sink) = make_app();

    // Navigate Status → WaterLevel → Moisture 1 → Pump 1.
    for i in 0..3u64 {
        app.tick(i * TICK_MS, &[InputEvent::Next], &mut hw, &mut sink);
    }
    assert_eq!(app.screen(), Screen::Pump(0));

    app.tick(40, &[InputEvent::Action], &mut hw, &mut sink);
    assert!(app.pump_on(0), "manual toggle bypasses the trigger gate");
    assert!(hw.relay_open(0));
    assert_eq!(hw.beeps, 4, "every touch is confirmed audibly");

    // A second press cancels the run early.
    app.tick(50, &[InputEvent::Action], &mut hw, &mut sink);
    assert!(!app.pump_on(0));
    assert!(!hw.relay_open(0));
    assert_eq!(sink.pump_changes(), vec![(0, true), (0, false)]);
}

#[test]
fn action_on_a_non_pump_screen_beeps_but_does_nothing() {
    let (mut app, mut hw, mut sink) = make_app();
    assert_eq!(app.screen(), Screen::Status);

    app.tick(0, &[InputEvent::Action], &mut hw, &mut sink);

    assert_eq!(hw.beeps, 1);
    assert!(!app.pump_on(0));
    assert!(!app.pump_on(1));
    assert!(sink.pump_changes().is_empty());
}

#[test]
fn manual_run_still_times_out_after_the_fixed_duration() {
    let (mut app, mut hw, mut sink) = make_app();
    let run_ms = app.current_config().pump_run_duration_ms;

    for i in 0..3u64 {
        app.tick(i * TICK_MS, &[InputEvent::Next], &mut hw, &mut sink);
    }
    app.tick(100, &[InputEvent::Action], &mut hw, &mut sink);
    assert!(app.pump_on(0));

    run_idle(&mut app, &mut hw, &mut sink, 100 + TICK_MS, 100 + run_ms);
    assert!(app.pump_on(0));
    app.tick(100 + run_ms, &[], &mut hw, &mut sink);
    assert!(!app.pump_on(0));
}

// ── Status derivation ─────────────────────────────────────────

#[test]
fn status_events_fire_as_the_reservoir_drains() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.water_level_pct = 100;
    app.tick(0, &[], &mut hw, &mut sink);
    assert_eq!(app.status(), SystemStatus::Ok);

    hw.water_level_pct = 50; // warn threshold is inclusive
    app.tick(10, &[], &mut hw, &mut sink);
    assert_eq!(app.status(), SystemStatus::Warn);

    hw.water_level_pct = 25; // critical threshold is inclusive
    app.tick(20, &[], &mut hw, &mut sink);
    assert_eq!(app.status(), SystemStatus::Critical);

    let transitions: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StatusChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (SystemStatus::Ok, SystemStatus::Warn),
            (SystemStatus::Warn, SystemStatus::Critical),
        ]
    );
}

// ── Diff rendering ────────────────────────────────────────────

#[test]
fn unchanged_ticks_issue_no_display_traffic() {
    let (mut app, mut hw, mut sink) = make_app();

    app.tick(0, &[], &mut hw, &mut sink);
    assert!(hw.draw_count() > 0, "first tick paints the screen fresh");

    let after_first = hw.draw_count();
    for i in 1..50u64 {
        app.tick(i * TICK_MS, &[], &mut hw, &mut sink);
    }
    assert_eq!(
        hw.draw_count(),
        after_first,
        "steady state must not repaint the panel"
    );
}

#[test]
fn a_changed_reading_repaints_once_then_goes_quiet() {
    let (mut app, mut hw, mut sink) = make_app();

    app.tick(0, &[], &mut hw, &mut sink);
    app.tick(10, &[InputEvent::Next], &mut hw, &mut sink);
    assert_eq!(app.screen(), Screen::WaterLevel);
    app.tick(20, &[], &mut hw, &mut sink); // gauge settled
    let settled = hw.draw_count();

    hw.water_level_pct = 60;
    app.tick(30, &[], &mut hw, &mut sink);
    assert!(hw.draw_count() > settled, "a new reading repaints the value");

    let after_change = hw.draw_count();
    app.tick(40, &[], &mut hw, &mut sink);
    assert_eq!(hw.draw_count(), after_change);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_follows_the_configured_cadence() {
    let (mut app, mut hw, mut sink) = make_app();
    let period_ms = u64::from(app.current_config().telemetry_interval_secs) * 1000;

    run_idle(&mut app, &mut hw, &mut sink, TICK_MS, period_ms);
    let telem_count = |s: &LogSink| {
        s.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    };
    assert_eq!(telem_count(&sink), 0);

    app.tick(period_ms, &[], &mut hw, &mut sink);
    assert_eq!(telem_count(&sink), 1);

    run_idle(&mut app, &mut hw, &mut sink, period_ms + TICK_MS, 2 * period_ms);
    assert_eq!(telem_count(&sink), 1, "one report per period, not per tick");
}
