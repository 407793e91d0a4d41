//! Hysteretic, timed pump controller — one instance per plant.
//!
//! ```text
//!          [moisture < threshold AND interval elapsed]  or  manual toggle
//!   OFF ────────────────────────────────────────────────────────────▶ ON
//!    ▲                                                                │
//!    └──────────────[now >= off deadline]  or  manual toggle──────────┘
//! ```
//!
//! The off-deadline is derived exactly once on the off→on edge and is
//! re-checked every tick rather than being a scheduled callback, so a
//! missed tick can delay a turn-off but never lose it.  Sensor readings
//! are ignored while the pump runs: a run always lasts the fixed duration
//! unless manually cancelled.

use log::info;

use crate::config::PlantConfig;

/// Per-plant pump state machine.
#[derive(Debug, Clone, Copy)]
pub struct PumpController {
    plant: usize,
    is_on: bool,
    /// `is_on` as of the previous [`advance`](Self::advance) call — detects
    /// the off→on edge that arms the deadline.
    prev_is_on: bool,
    /// Tick time at which the current run must end.  Valid only while on.
    off_deadline_ms: u64,
    /// Tick time the pump was last seen running (tracks `now` for the whole
    /// run, so the elapsed counter restarts from the end of a run).
    last_run_start_ms: u64,
}

impl PumpController {
    pub fn new(plant: usize) -> Self {
        Self {
            plant,
            is_on: false,
            prev_is_on: false,
            off_deadline_ms: 0,
            last_run_start_ms: 0,
        }
    }

    /// Whether the relay should be commanded open this tick.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Milliseconds since the pump last ran (or since boot, before the
    /// first run).  Recomputed from `now` every call.
    pub fn ms_since_last_run(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_run_start_ms)
    }

    /// Whole seconds until the current run's deadline; 0 while off.
    pub fn seconds_remaining(&self, now_ms: u64) -> u64 {
        if self.is_on {
            self.off_deadline_ms.saturating_sub(now_ms) / 1000
        } else {
            0
        }
    }

    /// Scheduled auto-on check.  Turns the pump on iff it is currently off,
    /// the soil is below the trigger threshold, *and* the minimum check
    /// interval has elapsed since the last run.  Returns `true` when the
    /// pump was turned on.
    pub fn evaluate_trigger(&mut self, now_ms: u64, moisture_pct: u8, cfg: &PlantConfig) -> bool {
        if !self.is_on
            && moisture_pct < cfg.trigger_threshold_pct
            && self.ms_since_last_run(now_ms) > cfg.pump_check_interval_ms
        {
            self.is_on = true;
            info!(
                "pump[{}]: auto-on (moisture {moisture_pct}% < {}%)",
                self.plant, cfg.trigger_threshold_pct
            );
            return true;
        }
        false
    }

    /// Manual override: unconditionally flip the pump, bypassing the
    /// trigger rule.  A manual-on still obeys the fixed run duration.
    /// Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_on = !self.is_on;
        info!(
            "pump[{}]: manual toggle -> {}",
            self.plant,
            if self.is_on { "on" } else { "off" }
        );
        self.is_on
    }

    /// Advance the run timer by one tick.
    ///
    /// On the off→on edge the deadline is armed to `now + run_duration`;
    /// while on, the first tick at or past the deadline turns the pump off.
    /// Re-entering "on" from "on" never re-arms the deadline.
    pub fn advance(&mut self, now_ms: u64, run_duration_ms: u64) {
        if self.is_on {
            if !self.prev_is_on {
                self.off_deadline_ms = now_ms + run_duration_ms;
                info!("pump[{}]: run started, off at t+{run_duration_ms}ms", self.plant);
            } else if now_ms >= self.off_deadline_ms {
                self.is_on = false;
                info!("pump[{}]: run duration elapsed, off", self.plant);
            }
        }

        if self.is_on {
            self.last_run_start_ms = now_ms;
        }
        self.prev_is_on = self.is_on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;

    const RUN_MS: u64 = 5_000;

    fn plant_cfg() -> PlantConfig {
        SystemConfig::default().plants[0].clone()
    }

    fn make_pump() -> PumpController {
        PumpController::new(0)
    }

    #[test]
    fn no_trigger_when_moisture_at_threshold() {
        let cfg = plant_cfg();
        let mut p = make_pump();
        let late = cfg.pump_check_interval_ms + 1;
        assert!(!p.evaluate_trigger(late, cfg.trigger_threshold_pct, &cfg));
        assert!(!p.is_on());
    }

    #[test]
    fn no_trigger_before_interval_elapsed() {
        let cfg = plant_cfg();
        let mut p = make_pump();
        assert!(!p.evaluate_trigger(cfg.pump_check_interval_ms, 0, &cfg));
        assert!(!p.is_on());
    }

    #[test]
    fn triggers_when_dry_and_interval_elapsed() {
        let cfg = plant_cfg();
        let mut p = make_pump();
        let late = cfg.pump_check_interval_ms + 1;
        assert!(p.evaluate_trigger(late, cfg.trigger_threshold_pct - 1, &cfg));
        assert!(p.is_on());
    }

    #[test]
    fn run_lasts_exactly_the_fixed_duration() {
        let cfg = plant_cfg();
        let mut p = make_pump();
        let t0 = cfg.pump_check_interval_ms + 1;
        p.evaluate_trigger(t0, 0, &cfg);
        p.advance(t0, RUN_MS);
        assert!(p.is_on());

        // Ticks before the deadline leave the pump on even if the soil
        // reads saturated — run duration is not re-evaluated mid-run.
        for dt in (100..RUN_MS).step_by(700) {
            assert!(!p.evaluate_trigger(t0 + dt, 100, &cfg));
            p.advance(t0 + dt, RUN_MS);
            assert!(p.is_on(), "pump must stay on at t0+{dt}");
        }

        p.advance(t0 + RUN_MS, RUN_MS);
        assert!(!p.is_on(), "first tick at the deadline turns off");
    }

    #[test]
    fn deadline_is_not_rearmed_mid_run() {
        let cfg = plant_cfg();
        let mut p = make_pump();
        let t0 = cfg.pump_check_interval_ms + 1;
        p.evaluate_trigger(t0, 0, &cfg);
        p.advance(t0, RUN_MS);
        assert_eq!(p.seconds_remaining(t0), RUN_MS / 1000);

        p.advance(t0 + 2_000, RUN_MS);
        assert_eq!(
            p.seconds_remaining(t0 + 2_000),
            (RUN_MS - 2_000) / 1000,
            "countdown runs down — the deadline was not re-derived"
        );
    }

    #[test]
    fn manual_toggle_on_still_obeys_run_duration() {
        let mut p = make_pump();
        assert!(p.toggle());
        p.advance(1_000, RUN_MS);
        assert!(p.is_on());
        p.advance(1_000 + RUN_MS, RUN_MS);
        assert!(!p.is_on());
    }

    #[test]
    fn manual_toggle_cancels_a_run() {
        let mut p = make_pump();
        p.toggle();
        p.advance(0, RUN_MS);
        assert!(p.is_on());
        assert!(!p.toggle());
        p.advance(10, RUN_MS);
        assert!(!p.is_on());
    }

    #[test]
    fn elapsed_counter_restarts_at_end_of_run() {
        let cfg = plant_cfg();
        let mut p = make_pump();
        let t0 = cfg.pump_check_interval_ms + 1;
        p.evaluate_trigger(t0, 0, &cfg);
        let mut t = t0;
        while p.is_on() {
            p.advance(t, RUN_MS);
            t += 10;
        }
        let run_end = t - 10 - 10; // last tick while still on
        assert_eq!(p.ms_since_last_run(run_end + 500), 500);

        // Immediately after a run the interval gate holds the pump off.
        assert!(!p.evaluate_trigger(t, 0, &cfg));
    }

    #[test]
    fn turn_off_happens_exactly_once() {
        let mut p = make_pump();
        p.toggle();
        p.advance(0, RUN_MS);
        p.advance(RUN_MS, RUN_MS);
        assert!(!p.is_on());
        // Staying off through later ticks: the stale deadline has no effect.
        p.advance(RUN_MS + 10, RUN_MS);
        p.advance(RUN_MS + 20, RUN_MS);
        assert!(!p.is_on());
        assert_eq!(p.seconds_remaining(RUN_MS + 20), 0);
    }
}
