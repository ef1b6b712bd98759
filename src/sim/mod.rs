//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per animation frame, no wall-clock reads
//! - Injected random source only
//! - Entities kept in spawn order
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod random;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{PlayerBody, Spin};
pub use collision::{Aabb, bonus_box, obstacle_boxes, player_box};
pub use random::{RandomSource, ScriptedRng, SeededRng};
pub use spawn::{SpawnPlan, Spawner};
pub use state::{Banner, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, Viewport, tick};
pub use world::{Bonus, EntityId, Obstacle, World};
