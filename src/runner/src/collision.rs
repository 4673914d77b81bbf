// src/runner/src/collision.rs
//
// Pure hitbox math. The obstacle box is shrunk inward before the overlap
// test so near-misses feel fair; the player box is used as-is.

use serde::{Deserialize, Serialize};

use crate::tuning;

/// Axis-aligned bounds in the presentation layer's coordinate space.
/// `top < bottom`, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// The two entities the sampling loop asks the environment about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackEntity {
    Player,
    Obstacle,
}

/// Environment geometry provider. Returning `None` for either entity skips
/// the whole tick: no score, no collision judged.
pub trait SpatialQuery {
    fn bounds(&self, entity: TrackEntity) -> Option<Rect>;
}

/// Obstacle bounds with the grace margins applied: 25% of the width off
/// each side, 35% of the height off the top. The bottom edge is untouched.
pub(crate) fn grace_adjusted(obstacle: Rect) -> Rect {
    let grace_x = obstacle.width() * tuning::GRACE_X;
    let grace_y = obstacle.height() * tuning::GRACE_Y;
    Rect {
        left: obstacle.left + grace_x,
        top: obstacle.top + grace_y,
        right: obstacle.right - grace_x,
        bottom: obstacle.bottom,
    }
}

/// Collision holds iff the horizontal extents overlap the shrunk box AND
/// the player's bottom edge is below its top edge.
pub(crate) fn collides(player: Rect, obstacle: Rect) -> bool {
    let shrunk = grace_adjusted(obstacle);
    let horizontal = player.right > shrunk.left && player.left < shrunk.right;
    let vertical = player.bottom > shrunk.top;
    horizontal && vertical
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBSTACLE: Rect = Rect {
        left: 100.0,
        top: 20.0,
        right: 200.0,
        bottom: 60.0,
    };

    #[test]
    fn grace_margins_shrink_the_box() {
        let shrunk = grace_adjusted(OBSTACLE);
        assert_eq!(shrunk.left, 125.0);
        assert_eq!(shrunk.right, 175.0);
        assert_eq!(shrunk.top, 34.0);
        assert_eq!(shrunk.bottom, 60.0);
    }

    #[test]
    fn raw_overlap_inside_grace_is_forgiven() {
        // Overlaps the raw box (right edge at 120 > 100) but stays left of
        // the shrunk edge at 125.
        let player = Rect::new(110.0, 40.0, 120.0, 55.0);
        assert!(!collides(player, OBSTACLE));
    }

    #[test]
    fn grounded_player_inside_shrunk_box_collides() {
        let player = Rect::new(130.0, 40.0, 150.0, 55.0);
        assert!(collides(player, OBSTACLE));
    }

    #[test]
    fn airborne_player_clears_the_top() {
        // Bottom edge above the shrunk top at 34.
        let player = Rect::new(130.0, 10.0, 150.0, 30.0);
        assert!(!collides(player, OBSTACLE));
    }
}
