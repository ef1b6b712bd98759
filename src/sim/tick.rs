//! Per-frame simulation tick
//!
//! One call per animation frame, in a fixed order: physics, spawn, advance,
//! collision, scoring. Collision sees positions already advanced this tick.

use serde::{Deserialize, Serialize};

use super::collision::{hits_obstacle, player_box, touches_bonus};
use super::random::RandomSource;
use super::spawn::{build, plan_spawn};
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Visible play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Frame timestamp (monotonic, nominally ms)
    pub now: f64,
    /// Jump requested since the previous tick
    pub jump: bool,
    pub viewport: Viewport,
}

/// What the tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running; schedule another tick
    Running,
    /// Hit an obstacle this tick; the run is over
    Crashed,
    /// Not running (ready or already over); nothing happened
    Halted,
}

/// Advance the game by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Halted;
    }

    state.ticks += 1;

    // Physics
    if input.jump && state.player.jump(tuning) {
        let spin_deg = state.player.spin.trigger(input.now, tuning);
        state.events.push(GameEvent::Jumped { spin_deg });
    }
    state.player.integrate(tuning);

    // Spawn
    if state.spawner.should_spawn(input.now, tuning, rng) {
        spawn(state, tuning, rng);
    }

    // Advance
    let speed = tuning.speed_for_score(state.score);
    state.world.advance(speed);

    let limit = input.viewport.width + tuning.offscreen_margin;
    for id in state.world.prune_obstacles(limit) {
        state.events.push(GameEvent::ObstacleGone(id));
    }

    // Collision
    let player = player_box(&state.player, tuning);
    let width = input.viewport.width;

    let hit = state
        .world
        .obstacles
        .iter()
        .find(|o| hits_obstacle(&player, o, width, tuning))
        .map(|o| o.id);
    if let Some(obstacle) = hit {
        log::debug!("Crashed into obstacle {} at score {}", obstacle, state.score);
        state.events.push(GameEvent::Crashed { obstacle });
        state.phase = GamePhase::GameOver;
        return TickOutcome::Crashed;
    }

    let collected: Vec<_> = state
        .world
        .bonuses
        .iter()
        .filter(|b| touches_bonus(&player, b, width, tuning))
        .map(|b| b.id)
        .collect();
    for id in collected {
        if state.world.remove_bonus(id).is_some() {
            let reward = tuning.bonus_reward;
            state.add_distance(reward as f64);
            log::debug!("Collected bonus {} (+{}), score {}", id, reward, state.score);
            state.events.push(GameEvent::BonusCollected { id, reward });
        }
    }
    for id in state.world.prune_bonuses(limit) {
        state.events.push(GameEvent::BonusMissed(id));
    }

    // Scoring
    state.add_distance(speed as f64 / 100.0);

    TickOutcome::Running
}

fn spawn(state: &mut GameState, tuning: &Tuning, rng: &mut impl RandomSource) {
    let plan = plan_spawn(tuning, rng, crate::PALETTE.len());
    let (obstacle, bonus) = build(&plan, tuning, || state.next_entity_id());

    log::debug!(
        "Spawned obstacle {} (stack {}, width {:.1}){}",
        obstacle.id,
        obstacle.stack,
        obstacle.width,
        if bonus.is_some() { " with bonus" } else { "" }
    );

    state.events.push(GameEvent::ObstacleSpawned(obstacle.clone()));
    state.world.obstacles.push(obstacle);
    if let Some(bonus) = bonus {
        state.events.push(GameEvent::BonusSpawned(bonus.clone()));
        state.world.bonuses.push(bonus);
    }
}
