//! Idle/demo mode - the computer plays
//!
//! Jumps when the nearest stack ahead is about to reach the player, so the
//! player is near the top of the arc while the stack passes underneath.

use crate::sim::GameState;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Ticks between take-off and the stack reaching the player's hit-box
    pub lead_ticks: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { lead_ticks: 8.0 }
    }
}

impl Autopilot {
    /// Should the player jump this frame?
    pub fn wants_jump(&self, state: &GameState, tuning: &Tuning, viewport_width: f32) -> bool {
        if !state.player.on_ground {
            return false;
        }

        let player_right = tuning.player_x + tuning.player_size;
        // Padded boxes start touching this far before the raw edges meet
        let slack = 2.0 * tuning.obstacle_padding;
        let speed = tuning.speed_for_score(state.score);

        state
            .world
            .obstacles
            .iter()
            .map(|o| viewport_width - o.offset - o.width - player_right)
            .filter(|gap| *gap > -slack)
            .any(|gap| gap <= self.lead_ticks * speed - slack)
    }
}
