//! Collision detection for axis-aligned boxes
//!
//! Entities are squares centered on their position; obstacles are rectangles
//! centered on theirs. Touching edges never count as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Arena;

/// Axis-aligned rectangle stored as center + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Square box of side `side` around `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    /// Left/top corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    /// Right/bottom corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// Strict AABB overlap: both axis ranges must intersect with positive length
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Check whether an entity centered at `pos` would leave the arena.
///
/// The center may come to exactly half the entity size from any edge.
#[inline]
pub fn out_of_bounds(pos: Vec2, entity_size: f32, width: f32, height: f32) -> bool {
    let half = entity_size / 2.0;
    pos.x < half || pos.x > width - half || pos.y < half || pos.y > height - half
}

/// Check whether an entity of side `entity_size` may stand at `pos`.
///
/// Blocked if any part of its box leaves the arena or overlaps an obstacle.
pub fn is_blocked(pos: Vec2, entity_size: f32, arena: &Arena) -> bool {
    if out_of_bounds(pos, entity_size, arena.width, arena.height) {
        return true;
    }

    let body = Rect::square(pos, entity_size);
    arena.obstacles.iter().any(|obstacle| body.overlaps(&obstacle.rect))
}
