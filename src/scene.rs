//! Rendering seam
//!
//! The sim never touches visuals. After each step the session hands its
//! events to a [`Scene`], which creates, moves and destroys whatever it uses
//! to draw (DOM nodes on web, nothing at all headless).

use crate::sim::{Bonus, EntityId, GameEvent, GameState, Obstacle};
use crate::tuning::Tuning;

pub trait Scene {
    /// New obstacle stack at the right edge
    fn add_obstacle(&mut self, obstacle: &Obstacle, tuning: &Tuning);
    fn add_bonus(&mut self, bonus: &Bonus);
    /// Entity left play (scrolled off, collected)
    fn remove(&mut self, id: EntityId);
    /// Cosmetic player rotation; fire-and-forget
    fn spin_player(&mut self, angle_deg: f32);
    /// Transient banner (auto-fades after [`crate::consts::MESSAGE_FADE_MS`])
    fn show_message(&mut self, text: &str);
    /// Drop every entity and put the player back upright (restart)
    fn reset(&mut self);
    /// Reposition everything and refresh the HUD
    fn sync(&mut self, state: &GameState);
}

/// Mirror a batch of events into the scene, then sync positions
pub fn present(scene: &mut impl Scene, state: &GameState, events: &[GameEvent], tuning: &Tuning) {
    for event in events {
        match event {
            GameEvent::ObstacleSpawned(obstacle) => scene.add_obstacle(obstacle, tuning),
            GameEvent::BonusSpawned(bonus) => scene.add_bonus(bonus),
            GameEvent::ObstacleGone(id)
            | GameEvent::BonusMissed(id)
            | GameEvent::BonusCollected { id, .. } => scene.remove(*id),
            GameEvent::Jumped {
                spin_deg: Some(angle),
            } => scene.spin_player(*angle),
            GameEvent::Jumped { spin_deg: None } | GameEvent::Crashed { .. } => {}
            GameEvent::Message(banner) => scene.show_message(&banner.text()),
            GameEvent::Reset => scene.reset(),
        }
    }
    scene.sync(state);
}

/// Draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScene;

impl Scene for NullScene {
    fn add_obstacle(&mut self, _obstacle: &Obstacle, _tuning: &Tuning) {}
    fn add_bonus(&mut self, _bonus: &Bonus) {}
    fn remove(&mut self, _id: EntityId) {}
    fn spin_player(&mut self, _angle_deg: f32) {}
    fn show_message(&mut self, _text: &str) {}
    fn reset(&mut self) {}
    fn sync(&mut self, _state: &GameState) {}
}

/// Headless scene: banners go to the log, entities are only counted
#[derive(Debug, Clone, Default)]
pub struct LogScene {
    pub live: usize,
    pub spawned: usize,
    /// Current player rotation
    pub spin_deg: f32,
    pub messages: Vec<String>,
}

impl Scene for LogScene {
    fn add_obstacle(&mut self, _obstacle: &Obstacle, _tuning: &Tuning) {
        self.live += 1;
        self.spawned += 1;
    }

    fn add_bonus(&mut self, _bonus: &Bonus) {
        self.live += 1;
    }

    fn remove(&mut self, _id: EntityId) {
        self.live = self.live.saturating_sub(1);
    }

    fn spin_player(&mut self, angle_deg: f32) {
        self.spin_deg = angle_deg;
    }

    fn show_message(&mut self, text: &str) {
        log::info!("{}", text);
        self.messages.push(text.to_string());
    }

    fn reset(&mut self) {
        self.live = 0;
        self.spin_deg = 0.0;
    }

    fn sync(&mut self, _state: &GameState) {}
}
