//! Hit-box tests between the player and scrolling entities
//!
//! Screen space here is x to the right from the viewport's left edge and y up
//! from the ground. Both boxes are shrunk by a padding before the overlap test,
//! which makes grazes forgiving.

use glam::Vec2;

use super::body::PlayerBody;
use super::world::{Bonus, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from its bottom-left corner and size
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    /// Shrink inward by `padding` on every side
    pub fn shrink(&self, padding: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(padding),
            max: self.max - Vec2::splat(padding),
        }
    }

    /// Inclusive overlap (touching edges count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }

    /// Overlap after shrinking both boxes by `padding`
    pub fn overlaps_padded(&self, other: &Aabb, padding: f32) -> bool {
        self.shrink(padding).overlaps(&other.shrink(padding))
    }
}

/// Player hit-box at its current height
pub fn player_box(body: &PlayerBody, tuning: &Tuning) -> Aabb {
    Aabb::from_corner(
        Vec2::new(tuning.player_x, body.y.max(0.0)),
        Vec2::splat(tuning.player_size),
    )
}

/// One box per stacked block, bottom first
pub fn obstacle_boxes(
    obstacle: &Obstacle,
    viewport_width: f32,
    tuning: &Tuning,
) -> impl Iterator<Item = Aabb> {
    let right = viewport_width - obstacle.offset;
    let left = right - obstacle.width;
    let block = tuning.block_height;
    (0..obstacle.stack).map(move |i| {
        Aabb::new(
            Vec2::new(left, i as f32 * block),
            Vec2::new(right, (i + 1) as f32 * block),
        )
    })
}

pub fn bonus_box(bonus: &Bonus, viewport_width: f32) -> Aabb {
    let right = viewport_width - bonus.offset;
    Aabb::from_corner(
        Vec2::new(right - bonus.size, bonus.height_above_ground),
        Vec2::splat(bonus.size),
    )
}

/// Does any block of the stack hit the player?
pub fn hits_obstacle(player: &Aabb, obstacle: &Obstacle, viewport_width: f32, tuning: &Tuning) -> bool {
    obstacle_boxes(obstacle, viewport_width, tuning)
        .any(|block| player.overlaps_padded(&block, tuning.obstacle_padding))
}

pub fn touches_bonus(player: &Aabb, bonus: &Bonus, viewport_width: f32, tuning: &Tuning) -> bool {
    player.overlaps_padded(&bonus_box(bonus, viewport_width), tuning.bonus_padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VW: f32 = 800.0;

    fn stack(offset: f32, stack: u8) -> Obstacle {
        Obstacle {
            id: 1,
            offset,
            width: 30.0,
            stack,
            color: 0,
        }
    }

    /// Offset that puts the obstacle's left edge at screen x
    fn offset_for_left(left: f32, width: f32) -> f32 {
        VW - (left + width)
    }

    #[test]
    fn test_padding_forgives_grazes() {
        let a = Aabb::from_corner(Vec2::ZERO, Vec2::splat(40.0));
        let b = Aabb::from_corner(Vec2::new(35.0, 0.0), Vec2::splat(40.0));
        assert!(a.overlaps(&b));
        // 5 units of overlap vanish under 6 units of padding on each box
        assert!(!a.overlaps_padded(&b, 6.0));
        assert!(a.overlaps_padded(&b, 2.0));
    }

    #[test]
    fn test_grounded_player_hits_low_stack() {
        let tuning = Tuning::default();
        let body = PlayerBody::default();
        let player = player_box(&body, &tuning);
        let obstacle = stack(offset_for_left(tuning.player_x + 10.0, 30.0), 1);
        assert!(hits_obstacle(&player, &obstacle, VW, &tuning));
    }

    #[test]
    fn test_high_player_clears_stack() {
        let tuning = Tuning::default();
        let body = PlayerBody {
            y: 3.0 * tuning.block_height + 10.0,
            vy: 0.0,
            on_ground: false,
            ..Default::default()
        };
        let player = player_box(&body, &tuning);
        let obstacle = stack(offset_for_left(tuning.player_x, 30.0), 3);
        assert!(!hits_obstacle(&player, &obstacle, VW, &tuning));
    }

    #[test]
    fn test_top_block_is_its_own_hitbox() {
        let tuning = Tuning::default();
        // Player level with the third block only
        let body = PlayerBody {
            y: 2.0 * tuning.block_height + 5.0,
            vy: 0.0,
            on_ground: false,
            ..Default::default()
        };
        let player = player_box(&body, &tuning);
        let low = stack(offset_for_left(tuning.player_x, 30.0), 2);
        let tall = stack(offset_for_left(tuning.player_x, 30.0), 3);
        assert!(!hits_obstacle(&player, &low, VW, &tuning));
        assert!(hits_obstacle(&player, &tall, VW, &tuning));
    }

    #[test]
    fn test_obstacle_boxes_stack_upward() {
        let tuning = Tuning::default();
        let boxes: Vec<_> = obstacle_boxes(&stack(100.0, 3), VW, &tuning).collect();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].min, Vec2::new(670.0, 0.0));
        assert_eq!(boxes[2].max, Vec2::new(700.0, 105.0));
    }

    #[test]
    fn test_bonus_pickup() {
        let tuning = Tuning::default();
        let body = PlayerBody::default();
        let player = player_box(&body, &tuning);
        let bonus = Bonus {
            id: 2,
            offset: VW - (tuning.player_x + 30.0),
            height_above_ground: 10.0,
            size: 20.0,
        };
        assert!(touches_bonus(&player, &bonus, VW, &tuning));

        let above = Bonus {
            height_above_ground: 125.0,
            ..bonus
        };
        assert!(!touches_bonus(&player, &above, VW, &tuning));
    }
}
