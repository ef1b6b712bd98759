//! Player body: vertical jump arc under gravity
//!
//! Integration is per tick (one animation frame), not per second. There is no
//! delta-time scaling, so the arc plays faster on high refresh-rate displays.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Cosmetic rotation played on each jump (never touches physics)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    /// Accumulated target angle in degrees
    pub angle_deg: f32,
    /// Timestamp until which the current spin is still in flight
    pub busy_until: f64,
}

impl Spin {
    pub fn is_spinning(&self, now: f64) -> bool {
        now < self.busy_until
    }

    /// Start a new quarter turn unless one is still playing.
    /// Returns the new target angle when a spin starts.
    pub fn trigger(&mut self, now: f64, tuning: &Tuning) -> Option<f32> {
        if self.is_spinning(now) {
            return None;
        }
        self.angle_deg += tuning.spin_step_deg;
        self.busy_until = now + tuning.spin_duration_ms;
        Some(self.angle_deg)
    }
}

/// Vertical state of the player
///
/// `on_ground` implies `y == 0.0 && vy == 0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Height above the ground (>= 0)
    pub y: f32,
    /// Vertical velocity (positive = up)
    pub vy: f32,
    pub on_ground: bool,
    pub spin: Spin,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            y: 0.0,
            vy: 0.0,
            on_ground: true,
            spin: Spin::default(),
        }
    }
}

impl PlayerBody {
    /// Apply the jump impulse. No-op while airborne.
    /// Returns `true` if the jump happened.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = tuning.jump_force;
        self.on_ground = false;
        true
    }

    /// One Euler step: gravity, move, clamp to the ground
    pub fn integrate(&mut self, tuning: &Tuning) {
        if self.on_ground {
            return;
        }

        self.vy -= tuning.gravity;
        self.y += self.vy;

        if self.y <= 0.0 || !self.y.is_finite() {
            self.land();
        }
    }

    fn land(&mut self) {
        self.y = 0.0;
        self.vy = 0.0;
        self.on_ground = true;
    }

    /// Check the grounded invariant
    pub fn is_consistent(&self) -> bool {
        !self.on_ground || (self.y == 0.0 && self.vy == 0.0)
    }
}
