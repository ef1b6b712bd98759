//! Block Runner - an endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, spawning, collisions, scoring)
//! - `session`: Game-over / high-score / restart state machine around the sim
//! - `scene`: Rendering seam the session reports entity changes to
//! - `platform`: Browser/native glue (clock, input mapping, storage)
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod highscores;
pub mod platform;
pub mod scene;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScore, MemoryStore, ScoreStore};
pub use scene::Scene;
pub use session::{Session, StepOutcome};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Downward acceleration per tick while airborne
    pub const GRAVITY: f32 = 1.1;
    /// Upward velocity applied by a jump
    pub const JUMP_FORCE: f32 = 18.0;

    /// Scroll speed at score 0 (units per tick)
    pub const BASE_SPEED: f32 = 8.0;
    /// Extra scroll speed per point of score
    pub const SPEED_PER_POINT: f32 = 0.04;

    /// Spawn timing window (timestamp units, nominally ms)
    pub const MIN_SPAWN_INTERVAL: f64 = 800.0;
    pub const MAX_SPAWN_INTERVAL: f64 = 2000.0;
    /// Per-tick spawn probability once the min interval has passed
    pub const SPAWN_CHANCE: f32 = 0.02;

    /// Chance that a spawn is a full three-block stack
    pub const TALL_STACK_CHANCE: f32 = 0.3;
    pub const MAX_STACK: u8 = 3;
    /// Height of one stacked block
    pub const BLOCK_HEIGHT: f32 = 35.0;
    /// Obstacle width range, [min, max)
    pub const MIN_BLOCK_WIDTH: f32 = 25.0;
    pub const MAX_BLOCK_WIDTH: f32 = 50.0;

    /// Chance a spawn carries a bonus star above it
    pub const BONUS_CHANCE: f32 = 0.25;
    pub const BONUS_SIZE: f32 = 20.0;
    /// Gap between the top of the stack and the bonus
    pub const BONUS_LIFT: f32 = 20.0;
    /// Score and distance granted by one bonus
    pub const BONUS_REWARD: u64 = 5;

    /// Entities past `viewport width + margin` are pruned
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Inward hit-box padding (applied to both boxes)
    pub const OBSTACLE_PADDING: f32 = 6.0;
    pub const BONUS_PADDING: f32 = 4.0;

    /// Player placement (left edge, from the viewport's left side) and size
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Cosmetic spin per jump (degrees) and how long one spin is in flight (ms)
    pub const SPIN_STEP_DEG: f32 = 90.0;
    pub const SPIN_DURATION_MS: f64 = 550.0;

    /// How long a banner stays up before fading (ms)
    pub const MESSAGE_FADE_MS: u32 = 4000;

    /// LocalStorage key for the persisted record
    pub const HIGH_SCORE_KEY: &str = "highScore";
}

/// Obstacle colours, picked uniformly per spawn
pub const PALETTE: [&str; 11] = [
    "#FF3344", "#FFAA33", "#33FF88", "#33AAFF", "#AA33FF", "#FF33CC", "#44FF99", "#FF6666",
    "#33FFAA", "#00FFFF", "#FFCC00",
];
