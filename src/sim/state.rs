//! Game state and core simulation types
//!
//! One explicit struct holds everything a run mutates. Nothing in the sim
//! reaches for globals.

use serde::{Deserialize, Serialize};

use super::body::PlayerBody;
use super::spawn::Spawner;
use super::world::{Bonus, EntityId, Obstacle, World};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh state, loop not started
    Ready,
    /// Ticking
    Running,
    /// Run ended by a collision; terminal until restart
    GameOver,
}

/// Transient on-screen text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Banner {
    Welcome,
    GameOver { score: u64 },
    NewHighScore { score: u64 },
}

impl Banner {
    pub fn text(&self) -> String {
        match self {
            Banner::Welcome => "WELCOME TO THE WORLD OF BLOCKS".to_string(),
            Banner::GameOver { score } => format!("Game Over! Your score: {}", score),
            Banner::NewHighScore { score } => format!("New High Score! {}", score),
        }
    }
}

/// Things that happened during a tick, for the scene to mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned(Obstacle),
    BonusSpawned(Bonus),
    /// Obstacle scrolled off-screen
    ObstacleGone(EntityId),
    /// Bonus scrolled off-screen unclaimed
    BonusMissed(EntityId),
    BonusCollected { id: EntityId, reward: u64 },
    /// Jump started; carries the new spin target when a spin started
    Jumped { spin_deg: Option<f32> },
    Crashed { obstacle: EntityId },
    Message(Banner),
    /// Fresh round after a restart; visuals from the old round are stale
    Reset,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: PlayerBody,
    pub world: World,
    pub spawner: Spawner,
    /// Floor of `distance`
    pub score: u64,
    pub distance: f64,
    /// Best score seen, loaded from storage
    pub high_score: u64,
    /// Ticks run this session
    pub ticks: u64,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameState {
    pub fn new(high_score: u64, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Ready,
            player: PlayerBody::default(),
            world: World::new(tuning.speed_for_score(0)),
            spawner: Spawner::default(),
            score: 0,
            distance: 0.0,
            high_score,
            ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add distance and re-derive the score; score never goes down
    pub fn add_distance(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.distance += amount;
        }
        self.score = self.score.max(self.distance.floor() as u64);
    }

    /// HUD line
    pub fn hud_text(&self) -> String {
        format!("Score: {}  |  High Score: {}", self.score, self.high_score)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready_and_empty() {
        let state = GameState::new(42, &Tuning::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 42);
        assert!(state.world.is_empty());
        assert_eq!(state.world.speed, 8.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_add_distance_floors_score() {
        let mut state = GameState::new(0, &Tuning::default());
        state.add_distance(0.08);
        assert_eq!(state.score, 0);
        state.add_distance(0.95);
        assert_eq!(state.score, 1);
        state.add_distance(5.0);
        assert_eq!(state.score, 6);
    }

    #[test]
    fn test_add_distance_ignores_garbage() {
        let mut state = GameState::new(0, &Tuning::default());
        state.add_distance(3.5);
        state.add_distance(f64::NAN);
        state.add_distance(-10.0);
        assert_eq!(state.distance, 3.5);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_banner_text() {
        assert_eq!(
            Banner::GameOver { score: 12 }.text(),
            "Game Over! Your score: 12"
        );
        assert_eq!(Banner::NewHighScore { score: 40 }.text(), "New High Score! 40");
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(99, &Tuning::default());
        state.add_distance(7.2);
        assert_eq!(state.hud_text(), "Score: 7  |  High Score: 99");
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(0, &Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(5, &Tuning::default());
        let json = state.to_json().unwrap();
        assert!(json.contains("\"high_score\":5"));
        assert!(json.contains("\"phase\":\"Ready\""));
    }
}
