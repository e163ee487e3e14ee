//! Axis-aligned boxes and the arena rectangle
//!
//! Combatants are boxes anchored at their top-left corner. Collision between
//! boxes is deliberately "early": each box is inflated by a fixed margin so two
//! bodies never visually clip given discrete per-tick steps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::COLLISION_MARGIN;

/// An axis-aligned box (position is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Inclusive point-in-box test (no margin)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.pos.x && p.x <= max.x && p.y >= self.pos.y && p.y <= max.y
    }
}

/// Check whether two boxes collide, with both inflated by [`COLLISION_MARGIN`]
///
/// Pure and symmetric: `overlaps(a, b) == overlaps(b, a)`.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let m = COLLISION_MARGIN;
    let (a_max, b_max) = (a.max(), b.max());
    a.pos.x < b_max.x + m && a_max.x > b.pos.x - m && a.pos.y < b_max.y + m && a_max.y > b.pos.y - m
}

/// Fixed rectangular play field `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if the point lies inside the arena (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Clamp a box position so the whole box stays inside the arena
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, (self.width - size.x).max(0.0)),
            pos.y.clamp(0.0, (self.height - size.y).max(0.0)),
        )
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(crate::consts::ARENA_WIDTH, crate::consts::ARENA_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::splat(40.0))
    }

    #[test]
    fn test_margin_triggers_before_contact() {
        let a = square(0.0, 0.0);
        // 4 units of clear air: inside the 5-unit margin
        assert!(overlaps(&a, &square(44.0, 0.0)));
        // Exactly at the margin edge does not count
        assert!(!overlaps(&a, &square(45.0, 0.0)));
        assert!(!overlaps(&a, &square(100.0, 0.0)));
    }

    #[test]
    fn test_needs_overlap_on_both_axes() {
        let a = square(0.0, 0.0);
        assert!(!overlaps(&a, &square(10.0, 200.0)));
        assert!(overlaps(&a, &square(10.0, 30.0)));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let b = square(10.0, 10.0);
        assert!(b.contains_point(Vec2::new(10.0, 10.0)));
        assert!(b.contains_point(Vec2::new(50.0, 50.0)));
        assert!(!b.contains_point(Vec2::new(50.1, 30.0)));
        assert_eq!(b.center(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_arena_clamp_box() {
        let arena = Arena::new(200.0, 100.0);
        let size = Vec2::splat(40.0);
        assert_eq!(arena.clamp_box(Vec2::new(-3.0, 90.0), size), Vec2::new(0.0, 60.0));
        assert!(arena.contains(Vec2::new(200.0, 0.0)));
        assert!(!arena.contains(Vec2::new(200.5, 0.0)));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric_and_stable(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let (a, b) = (square(ax, ay), square(bx, by));
            let first = overlaps(&a, &b);
            prop_assert_eq!(first, overlaps(&b, &a));
            prop_assert_eq!(first, overlaps(&a, &b));
        }
    }
}
