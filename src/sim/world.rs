//! Scrolling world: obstacles, bonus stars and the current speed
//!
//! Horizontal positions are `offset`s measured from the right edge of the
//! viewport, growing as entities scroll toward the player on the left.

use serde::{Deserialize, Serialize};

/// Stable entity handle, for scene adapters
pub type EntityId = u32;

/// A stack of 1-3 equal blocks sharing one offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    /// Distance of the right edge from the viewport's right edge
    pub offset: f32,
    pub width: f32,
    /// Number of stacked blocks (1-3)
    pub stack: u8,
    /// Index into [`crate::PALETTE`]
    pub color: usize,
}

impl Obstacle {
    /// Total stack height
    pub fn height(&self, block_height: f32) -> f32 {
        self.stack as f32 * block_height
    }

    pub fn color_hex(&self) -> &'static str {
        crate::PALETTE[self.color % crate::PALETTE.len()]
    }
}

/// A collectible star floating above an obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    pub id: EntityId,
    pub offset: f32,
    /// Height of the star's bottom edge above the ground
    pub height_above_ground: f32,
    pub size: f32,
}

/// Everything that scrolls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// Spawn order
    pub obstacles: Vec<Obstacle>,
    /// Spawn order
    pub bonuses: Vec<Bonus>,
    /// Scroll speed used by the most recent advance
    pub speed: f32,
}

impl World {
    pub fn new(speed: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            bonuses: Vec::new(),
            speed,
        }
    }

    /// Move every entity `speed` units toward the player
    pub fn advance(&mut self, speed: f32) {
        self.speed = speed;
        for obstacle in &mut self.obstacles {
            obstacle.offset += speed;
        }
        for bonus in &mut self.bonuses {
            bonus.offset += speed;
        }
    }

    /// Drop obstacles past `limit`, returning their ids
    pub fn prune_obstacles(&mut self, limit: f32) -> Vec<EntityId> {
        let mut gone = Vec::new();
        self.obstacles.retain(|o| {
            let keep = o.offset <= limit;
            if !keep {
                gone.push(o.id);
            }
            keep
        });
        gone
    }

    /// Drop unclaimed bonuses past `limit`, returning their ids
    pub fn prune_bonuses(&mut self, limit: f32) -> Vec<EntityId> {
        let mut gone = Vec::new();
        self.bonuses.retain(|b| {
            let keep = b.offset <= limit;
            if !keep {
                gone.push(b.id);
            }
            keep
        });
        gone
    }

    pub fn remove_bonus(&mut self, id: EntityId) -> Option<Bonus> {
        let pos = self.bonuses.iter().position(|b| b.id == id)?;
        Some(self.bonuses.remove(pos))
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.bonuses.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.bonuses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn obstacle(id: EntityId, offset: f32) -> Obstacle {
        Obstacle {
            id,
            offset,
            width: 30.0,
            stack: 1,
            color: 0,
        }
    }

    #[test]
    fn test_advance_moves_everything() {
        let mut world = World::new(8.0);
        world.obstacles.push(obstacle(1, 0.0));
        world.bonuses.push(Bonus {
            id: 2,
            offset: 10.0,
            height_above_ground: 55.0,
            size: 20.0,
        });

        world.advance(8.0);
        world.advance(8.5);

        assert_eq!(world.obstacles[0].offset, 16.5);
        assert_eq!(world.bonuses[0].offset, 26.5);
        assert_eq!(world.speed, 8.5);
    }

    #[test]
    fn test_prune_past_limit_only() {
        let mut world = World::new(8.0);
        world.obstacles.push(obstacle(1, 849.0));
        world.obstacles.push(obstacle(2, 850.0));
        world.obstacles.push(obstacle(3, 851.0));

        let gone = world.prune_obstacles(850.0);
        assert_eq!(gone, vec![3]);
        assert_eq!(
            world.obstacles.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_remove_bonus_by_id() {
        let mut world = World::default();
        for id in 1..=3 {
            world.bonuses.push(Bonus {
                id,
                offset: 0.0,
                height_above_ground: 40.0,
                size: 20.0,
            });
        }
        assert_eq!(world.remove_bonus(2).map(|b| b.id), Some(2));
        assert!(world.remove_bonus(2).is_none());
        assert_eq!(world.bonuses.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_offset_is_ticks_times_speed(ticks in 0u32..500, speed in 1u32..40) {
            // Integral speeds keep the float sums exact
            let speed = speed as f32;
            let mut world = World::new(speed);
            world.obstacles.push(obstacle(1, 0.0));
            for _ in 0..ticks {
                world.advance(speed);
            }
            prop_assert_eq!(world.obstacles[0].offset, ticks as f32 * speed);
        }
    }
}
