//! Session controller
//!
//! Wraps the sim in its lifecycle: `Ready -> Running -> GameOver`, with
//! restart going back to `Ready`. Owns the random source, the tuning, the
//! persisted record, and the jump latch input handlers write into.

use crate::highscores::{HighScore, ScoreStore};
use crate::scene::{Scene, present};
use crate::sim::{
    Banner, GameEvent, GamePhase, GameState, RandomSource, TickInput, TickOutcome, Viewport, tick,
};
use crate::tuning::Tuning;

/// Whether the driver should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Stop,
}

pub struct Session<S: ScoreStore, R: RandomSource> {
    state: GameState,
    tuning: Tuning,
    viewport: Viewport,
    record: HighScore,
    store: S,
    rng: R,
    /// Set by input between ticks, consumed by the next tick
    jump_latch: bool,
}

impl<S: ScoreStore, R: RandomSource> Session<S, R> {
    /// Fresh session in `Ready`, with the record loaded from `store`
    pub fn new(tuning: Tuning, store: S, rng: R, viewport: Viewport) -> Self {
        let record = HighScore::load(&store);
        Self {
            state: GameState::new(record.best, &tuning),
            tuning,
            viewport,
            record,
            store,
            rng,
            jump_latch: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.record.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `Ready -> Running`. No-op in any other phase.
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Ready {
            return;
        }
        self.state.phase = GamePhase::Running;
        self.state.events.push(GameEvent::Message(Banner::Welcome));
        log::info!("Run started (high score {})", self.record.best);
    }

    /// Latch a jump for the next tick. Ignored unless running.
    pub fn request_jump(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.jump_latch = true;
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Run one frame at timestamp `now`
    pub fn step(&mut self, now: f64) -> StepOutcome {
        let input = TickInput {
            now,
            jump: std::mem::take(&mut self.jump_latch),
            viewport: self.viewport,
        };

        match tick(&mut self.state, &input, &self.tuning, &mut self.rng) {
            TickOutcome::Running => StepOutcome::Continue,
            TickOutcome::Crashed => {
                self.finish();
                StepOutcome::Stop
            }
            TickOutcome::Halted => StepOutcome::Stop,
        }
    }

    /// Game over bookkeeping: record check, persist, banner
    fn finish(&mut self) {
        let score = self.state.score;
        let banner = if self.record.submit(score) {
            self.record.save(&mut self.store);
            self.state.high_score = self.record.best;
            log::info!("Game over: new high score {}", score);
            Banner::NewHighScore { score }
        } else {
            log::info!("Game over: score {} (best {})", score, self.record.best);
            Banner::GameOver { score }
        };
        self.state.events.push(GameEvent::Message(banner));
    }

    /// Reset everything but the record and go back to `Ready`
    pub fn restart(&mut self) {
        self.state = GameState::new(self.record.best, &self.tuning);
        self.state.events.push(GameEvent::Reset);
        self.jump_latch = false;
        log::info!("Session reset");
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Hand pending events to the scene
    pub fn present(&mut self, scene: &mut impl Scene) {
        let events = self.state.drain_events();
        present(scene, &self.state, &events, &self.tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIGH_SCORE_KEY;
    use crate::highscores::MemoryStore;
    use crate::scene::LogScene;
    use crate::sim::{Obstacle, ScriptedRng};

    fn session(store: MemoryStore) -> Session<MemoryStore, ScriptedRng> {
        Session::new(
            Tuning::default(),
            store,
            ScriptedRng::new([]),
            Viewport::default(),
        )
    }

    /// Obstacle that lands on the grounded player next tick
    fn wall(session: &Session<MemoryStore, ScriptedRng>) -> Obstacle {
        let tuning = session.tuning();
        let speed = tuning.speed_for_score(session.state().score);
        Obstacle {
            id: 999,
            offset: session.viewport().width - (tuning.player_x + 40.0) - speed,
            width: 40.0,
            stack: 1,
            color: 0,
        }
    }

    fn crash(session: &mut Session<MemoryStore, ScriptedRng>) {
        let obstacle = wall(session);
        session.state.world.obstacles.push(obstacle);
        assert_eq!(session.step(0.0), StepOutcome::Stop);
    }

    #[test]
    fn test_lifecycle() {
        let mut session = session(MemoryStore::new());
        assert_eq!(session.phase(), GamePhase::Ready);
        assert_eq!(session.step(0.0), StepOutcome::Stop);

        session.start();
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Message(Banner::Welcome)]
        );
        assert_eq!(session.step(0.0), StepOutcome::Continue);

        crash(&mut session);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.step(16.0), StepOutcome::Stop);
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let store = MemoryStore::with_item(HIGH_SCORE_KEY, "3");
        let mut session = session(store.clone());
        assert_eq!(session.high_score(), 3);

        session.start();
        for _ in 0..100 {
            session.step(0.0);
        }
        crash(&mut session);

        assert_eq!(session.high_score(), 8);
        assert_eq!(session.state().high_score, 8);
        assert_eq!(store.get(HIGH_SCORE_KEY).as_deref(), Some("8"));
        assert!(session
            .drain_events()
            .contains(&GameEvent::Message(Banner::NewHighScore { score: 8 })));
    }

    #[test]
    fn test_lower_score_keeps_record() {
        let store = MemoryStore::with_item(HIGH_SCORE_KEY, "50");
        let mut session = session(store.clone());
        session.start();
        session.step(0.0);
        crash(&mut session);

        assert_eq!(session.high_score(), 50);
        assert_eq!(store.get(HIGH_SCORE_KEY).as_deref(), Some("50"));
        assert!(session
            .drain_events()
            .contains(&GameEvent::Message(Banner::GameOver { score: 0 })));
    }

    #[test]
    fn test_restart_resets_all_but_record() {
        let mut session = session(MemoryStore::new());
        session.start();
        for _ in 0..40 {
            session.step(0.0);
        }
        crash(&mut session);
        let best = session.high_score();
        assert!(best > 0);

        session.restart();
        assert_eq!(session.drain_events(), vec![GameEvent::Reset]);
        let state = session.state();
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert!(state.world.is_empty());
        assert!(state.player.on_ground);
        assert_eq!(state.spawner.last_spawn, None);
        assert_eq!(session.high_score(), best);
        assert_eq!(state.high_score, best);

        session.start();
        assert_eq!(session.step(0.0), StepOutcome::Continue);
    }

    #[test]
    fn test_restart_resets_the_scene() {
        let mut session = session(MemoryStore::new());
        let mut scene = LogScene::default();
        session.start();
        session.request_jump();
        session.step(0.0);
        let obstacle = Obstacle {
            id: 5,
            offset: 0.0,
            width: 30.0,
            stack: 1,
            color: 0,
        };
        scene.add_obstacle(&obstacle, session.tuning());
        session.present(&mut scene);
        assert_eq!(scene.spin_deg, 90.0);
        assert_eq!(scene.live, 1);

        // Mid-air, rotated, one node on screen
        session.restart();
        session.start();
        session.present(&mut scene);
        assert_eq!(scene.live, 0);
        assert_eq!(scene.spin_deg, 0.0);
        assert_eq!(
            scene.messages.last().map(String::as_str),
            Some("WELCOME TO THE WORLD OF BLOCKS")
        );
    }

    #[test]
    fn test_resize_moves_the_prune_line() {
        let mut session = session(MemoryStore::new());
        session.start();
        session.resize(Viewport {
            width: 2000.0,
            height: 600.0,
        });
        // Past the old 800 + 50 line after one advance, well short of 2050
        session.state.world.obstacles.push(Obstacle {
            id: 5,
            offset: 845.0,
            width: 30.0,
            stack: 1,
            color: 0,
        });
        assert_eq!(session.step(0.0), StepOutcome::Continue);
        assert_eq!(session.state().world.obstacles.len(), 1);

        session.resize(Viewport::default());
        assert_eq!(session.step(16.0), StepOutcome::Continue);
        assert!(session.state().world.obstacles.is_empty());
        assert!(session.drain_events().contains(&GameEvent::ObstacleGone(5)));
    }

    #[test]
    fn test_jump_latch_consumed_once() {
        let mut session = session(MemoryStore::new());
        // Ignored before start
        session.request_jump();
        session.start();
        session.step(0.0);
        assert!(session.state().player.on_ground);

        session.request_jump();
        session.step(16.0);
        assert!(!session.state().player.on_ground);
        assert!(!session.jump_latch);
    }

    #[test]
    fn test_high_score_never_decreases_across_sessions() {
        let store = MemoryStore::new();
        let mut best = 0;
        for ticks in [30, 10, 60, 0] {
            let mut session = session(store.clone());
            session.start();
            for _ in 0..ticks {
                session.step(0.0);
            }
            crash(&mut session);
            assert!(session.high_score() >= best);
            best = session.high_score();
        }
        assert!(best > 0);
        assert_eq!(HighScore::load(&store).best, best);
    }
}
