//! Frame timestamps and the tick driver
//!
//! The sim is stepped once per frame with whatever timestamp the platform
//! supplies. Browsers hand us `requestAnimationFrame` times; headless runs use
//! a synthetic 60 Hz cadence.

use crate::autopilot::Autopilot;
use crate::highscores::ScoreStore;
use crate::scene::Scene;
use crate::session::{Session, StepOutcome};
use crate::sim::RandomSource;

/// Nominal frame length for synthetic clocks (ms)
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Turns raw frame times into a monotonic sequence
///
/// Out-of-order or non-finite samples repeat the previous timestamp.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, raw: f64) -> f64 {
        let now = match self.last {
            Some(last) if !raw.is_finite() || raw < last => last,
            None if !raw.is_finite() => 0.0,
            _ => raw,
        };
        self.last = Some(now);
        now
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Fixed-cadence clock for headless runs
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: f64,
    step: f64,
}

impl FixedClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            now: 0.0,
            step: step_ms,
        }
    }

    /// Next timestamp (the first call returns 0)
    pub fn next(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(FRAME_MS)
    }
}

/// Summary of a headless run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub frames: u64,
    pub score: u64,
    pub high_score: u64,
    pub crashed: bool,
}

/// Drive a started session until game over or `max_frames`
///
/// Each frame: optional autopilot input, one step, then the scene catches up.
/// Stops scheduling as soon as the session says so.
pub fn run_headless<S: ScoreStore, R: RandomSource>(
    session: &mut Session<S, R>,
    clock: &mut FixedClock,
    scene: &mut impl Scene,
    pilot: Option<&Autopilot>,
    max_frames: u64,
) -> RunReport {
    let mut frames = 0;
    let mut crashed = false;

    while frames < max_frames {
        if let Some(pilot) = pilot {
            if pilot.wants_jump(session.state(), session.tuning(), session.viewport().width) {
                session.request_jump();
            }
        }

        let outcome = session.step(clock.next());
        frames += 1;
        session.present(scene);

        if outcome == StepOutcome::Stop {
            crashed = session.state().is_over();
            break;
        }
    }

    RunReport {
        frames,
        score: session.state().score,
        high_score: session.high_score(),
        crashed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::scene::LogScene;
    use crate::sim::{SeededRng, Viewport};
    use crate::tuning::Tuning;

    #[test]
    fn test_frame_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.sample(f64::NAN), 0.0);
        assert_eq!(clock.sample(16.0), 16.0);
        assert_eq!(clock.sample(10.0), 16.0);
        assert_eq!(clock.sample(f64::INFINITY), 16.0);
        assert_eq!(clock.sample(33.0), 33.0);
        clock.reset();
        assert_eq!(clock.last(), None);
    }

    #[test]
    fn test_fixed_clock_cadence() {
        let mut clock = FixedClock::new(10.0);
        assert_eq!(clock.next(), 0.0);
        assert_eq!(clock.next(), 10.0);
        assert_eq!(clock.next(), 20.0);
    }

    fn new_session(seed: u64) -> Session<MemoryStore, SeededRng> {
        Session::new(
            Tuning::default(),
            MemoryStore::new(),
            SeededRng::new(seed),
            Viewport::default(),
        )
    }

    #[test]
    fn test_unstarted_session_stops_immediately() {
        let mut session = new_session(1);
        let report = run_headless(
            &mut session,
            &mut FixedClock::default(),
            &mut LogScene::default(),
            None,
            100,
        );
        assert_eq!(report.frames, 1);
        assert!(!report.crashed);
    }

    #[test]
    fn test_without_pilot_the_first_stack_ends_the_run() {
        let mut session = new_session(3);
        session.start();
        let mut scene = LogScene::default();
        let report = run_headless(
            &mut session,
            &mut FixedClock::default(),
            &mut scene,
            None,
            10_000,
        );
        assert!(report.crashed);
        assert!(report.frames < 10_000);
        assert_eq!(report.high_score, report.score);
        assert_eq!(scene.messages.len(), 2);
        assert_eq!(scene.messages[0], "WELCOME TO THE WORLD OF BLOCKS");
    }

    #[test]
    fn test_pilot_runs_to_the_frame_cap() {
        let mut session = new_session(11);
        session.start();
        let report = run_headless(
            &mut session,
            &mut FixedClock::default(),
            &mut LogScene::default(),
            Some(&Autopilot::default()),
            2000,
        );
        assert!(!report.crashed);
        assert_eq!(report.frames, 2000);
        assert!(report.score > 0);
    }
}
