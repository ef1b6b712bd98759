//! Obstacle and bonus spawning
//!
//! Spawns are timestamp-gated: nothing before `min_spawn_interval`, a forced
//! spawn after `max_spawn_interval`, and a small per-tick chance in between.
//! Difficulty grows only through scroll speed, which shrinks the distance
//! between spawns of the same timing.

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::world::{Bonus, EntityId, Obstacle};
use crate::tuning::Tuning;

/// Shape parameters for one spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub stack: u8,
    pub width: f32,
    pub color: usize,
    /// Bottom of the paired bonus, if one was rolled
    pub bonus_height: Option<f32>,
}

/// Spawn timing state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Timestamp of the last spawn (seeded on the first tick)
    pub last_spawn: Option<f64>,
}

impl Spawner {
    /// Decide whether to spawn at timestamp `now`
    ///
    /// The first call only seeds the clock. Resets the clock when it fires.
    pub fn should_spawn(&mut self, now: f64, tuning: &Tuning, rng: &mut impl RandomSource) -> bool {
        let last = *self.last_spawn.get_or_insert(now);
        let elapsed = now - last;

        if elapsed <= tuning.min_spawn_interval {
            return false;
        }

        // Short-circuit: a forced spawn consumes no draw
        let fire = elapsed > tuning.max_spawn_interval || rng.chance(tuning.spawn_chance);
        if fire {
            self.last_spawn = Some(now);
        }
        fire
    }

    pub fn reset(&mut self) {
        self.last_spawn = None;
    }
}

/// Roll the shape of a new obstacle (and its optional bonus)
///
/// Draw order: stack branch, [low-stack height], width, colour, bonus.
pub fn plan_spawn(tuning: &Tuning, rng: &mut impl RandomSource, palette_len: usize) -> SpawnPlan {
    let stack = if rng.chance(1.0 - tuning.tall_stack_chance) {
        // 1 or 2, uniform
        1 + rng.index(2) as u8
    } else {
        crate::consts::MAX_STACK
    };

    let width = rng.range(tuning.min_block_width, tuning.max_block_width);
    let color = rng.index(palette_len.max(1));

    let bonus_height = (stack <= crate::consts::MAX_STACK && rng.chance(tuning.bonus_chance))
        .then(|| stack as f32 * tuning.block_height + tuning.bonus_lift);

    SpawnPlan {
        stack,
        width,
        color,
        bonus_height,
    }
}

/// Materialize a plan at the right edge (offset 0)
pub fn build(plan: &SpawnPlan, tuning: &Tuning, mut next_id: impl FnMut() -> EntityId) -> (Obstacle, Option<Bonus>) {
    let obstacle = Obstacle {
        id: next_id(),
        offset: 0.0,
        width: plan.width,
        stack: plan.stack,
        color: plan.color,
    };

    let bonus = plan.bonus_height.map(|height| Bonus {
        id: next_id(),
        offset: 0.0,
        height_above_ground: height,
        size: tuning.bonus_size,
    });

    (obstacle, bonus)
}
