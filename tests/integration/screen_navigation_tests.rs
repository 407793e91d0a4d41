//! Integration tests for touch navigation through the screen cycle.

use crate::mock_hw::{LogSink, MockHardware};

use waterer::app::commands::InputEvent;
use waterer::app::events::AppEvent;
use waterer::app::service::AppService;
use waterer::config::SystemConfig;
use waterer::ui::screen::Screen;

fn make_app(config: SystemConfig) -> (AppService, MockHardware, LogSink) {
    let mut app = AppService::new(config);
    let mut sink = LogSink::new();
    app.start(&mut sink);
    (app, MockHardware::new(), sink)
}

#[test]
fn next_walks_the_full_cycle_and_wraps() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());

    let expected = [
        Screen::WaterLevel,
        Screen::Moisture(0),
        Screen::Pump(0),
        Screen::Moisture(1),
        Screen::Pump(1),
        Screen::Status,
    ];

    for (i, &want) in expected.iter().enumerate() {
        app.tick(i as u64 * 10, &[InputEvent::Next], &mut hw, &mut sink);
        assert_eq!(app.screen(), want, "after {} Next presses", i + 1);
    }
    assert_eq!(sink.screen_changes(), expected.len());
}

#[test]
fn previous_from_status_wraps_to_the_last_screen() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());

    app.tick(0, &[InputEvent::Previous], &mut hw, &mut sink);
    assert_eq!(app.screen(), Screen::Pump(1));

    app.tick(10, &[InputEvent::Previous], &mut hw, &mut sink);
    assert_eq!(app.screen(), Screen::Moisture(1));
}

#[test]
fn disabling_plant_two_drops_its_screens_from_the_cycle() {
    let mut config = SystemConfig::default();
    config.plants[1].enabled = false;
    let (mut app, mut hw, mut sink) = make_app(config);

    let expected = [
        Screen::WaterLevel,
        Screen::Moisture(0),
        Screen::Pump(0),
        Screen::Status,
    ];
    for (i, &want) in expected.iter().enumerate() {
        app.tick(i as u64 * 10, &[InputEvent::Next], &mut hw, &mut sink);
        assert_eq!(app.screen(), want);
    }

    // And backwards wraps straight to pump 1.
    app.tick(100, &[InputEvent::Previous], &mut hw, &mut sink);
    assert_eq!(app.screen(), Screen::Pump(0));
}

#[test]
fn every_navigation_beeps_and_emits_an_event() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());

    app.tick(0, &[InputEvent::Next], &mut hw, &mut sink);
    app.tick(10, &[InputEvent::Previous], &mut hw, &mut sink);

    assert_eq!(hw.beeps, 2);
    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ScreenChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (Screen::Status, Screen::WaterLevel),
            (Screen::WaterLevel, Screen::Status),
        ]
    );
}

#[test]
fn navigating_to_a_new_screen_repaints_it_fresh() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());

    app.tick(0, &[], &mut hw, &mut sink);
    let before = hw.draw_count();
    app.tick(10, &[InputEvent::Next], &mut hw, &mut sink);
    assert!(
        hw.draw_count() > before,
        "a screen change always paints the new screen"
    );
}
