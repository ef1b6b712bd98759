//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! (LocalStorage on web) without rebuilding. Missing fields take defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    pub gravity: f32,
    pub jump_force: f32,

    // === Scroll ===
    pub base_speed: f32,
    pub speed_per_point: f32,

    // === Spawning ===
    pub min_spawn_interval: f64,
    pub max_spawn_interval: f64,
    pub spawn_chance: f32,
    pub tall_stack_chance: f32,
    pub block_height: f32,
    pub min_block_width: f32,
    pub max_block_width: f32,
    pub bonus_chance: f32,
    pub bonus_size: f32,
    pub bonus_lift: f32,

    // === Scoring / collision ===
    pub bonus_reward: u64,
    pub offscreen_margin: f32,
    pub obstacle_padding: f32,
    pub bonus_padding: f32,

    // === Player ===
    pub player_x: f32,
    pub player_size: f32,
    pub spin_step_deg: f32,
    pub spin_duration_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,

            base_speed: BASE_SPEED,
            speed_per_point: SPEED_PER_POINT,

            min_spawn_interval: MIN_SPAWN_INTERVAL,
            max_spawn_interval: MAX_SPAWN_INTERVAL,
            spawn_chance: SPAWN_CHANCE,
            tall_stack_chance: TALL_STACK_CHANCE,
            block_height: BLOCK_HEIGHT,
            min_block_width: MIN_BLOCK_WIDTH,
            max_block_width: MAX_BLOCK_WIDTH,
            bonus_chance: BONUS_CHANCE,
            bonus_size: BONUS_SIZE,
            bonus_lift: BONUS_LIFT,

            bonus_reward: BONUS_REWARD,
            offscreen_margin: OFFSCREEN_MARGIN,
            obstacle_padding: OBSTACLE_PADDING,
            bonus_padding: BONUS_PADDING,

            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            spin_step_deg: SPIN_STEP_DEG,
            spin_duration_ms: SPIN_DURATION_MS,
        }
    }
}

impl Tuning {
    /// LocalStorage key for overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_runner_tuning";

    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse JSON, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring invalid tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Replace unusable values with defaults
    ///
    /// Non-finite or negative numbers and inverted ranges would make the sim
    /// produce NaN offsets or never spawn.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();

        fn fix(value: &mut f32, fallback: f32) {
            if !value.is_finite() || *value < 0.0 {
                *value = fallback;
            }
        }
        fn fix_f64(value: &mut f64, fallback: f64) {
            if !value.is_finite() || *value < 0.0 {
                *value = fallback;
            }
        }

        fix(&mut self.gravity, d.gravity);
        fix(&mut self.jump_force, d.jump_force);
        fix(&mut self.base_speed, d.base_speed);
        fix(&mut self.speed_per_point, d.speed_per_point);
        fix_f64(&mut self.min_spawn_interval, d.min_spawn_interval);
        fix_f64(&mut self.max_spawn_interval, d.max_spawn_interval);
        fix(&mut self.spawn_chance, d.spawn_chance);
        fix(&mut self.tall_stack_chance, d.tall_stack_chance);
        fix(&mut self.block_height, d.block_height);
        fix(&mut self.min_block_width, d.min_block_width);
        fix(&mut self.max_block_width, d.max_block_width);
        fix(&mut self.bonus_chance, d.bonus_chance);
        fix(&mut self.bonus_size, d.bonus_size);
        fix(&mut self.bonus_lift, d.bonus_lift);
        fix(&mut self.offscreen_margin, d.offscreen_margin);
        fix(&mut self.obstacle_padding, d.obstacle_padding);
        fix(&mut self.bonus_padding, d.bonus_padding);
        fix(&mut self.player_x, d.player_x);
        fix(&mut self.player_size, d.player_size);
        fix(&mut self.spin_step_deg, d.spin_step_deg);
        fix_f64(&mut self.spin_duration_ms, d.spin_duration_ms);

        if self.max_spawn_interval < self.min_spawn_interval {
            self.min_spawn_interval = d.min_spawn_interval;
            self.max_spawn_interval = d.max_spawn_interval;
        }
        if self.max_block_width < self.min_block_width {
            self.min_block_width = d.min_block_width;
            self.max_block_width = d.max_block_width;
        }
        self
    }

    /// Scroll speed for a given score
    pub fn speed_for_score(&self, score: u64) -> f32 {
        self.base_speed + score as f32 * self.speed_per_point
    }

    /// Load overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded tuning overrides from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
