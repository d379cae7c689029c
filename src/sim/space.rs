//! Toroidal space geometry
//!
//! The play area is a rectangle whose opposite edges are glued together.
//! Every movement step ends with a wrap so positions always stay inside
//! `[0, width) × [0, height)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Arena extents, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the plane (craft spawn point)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside the half-open arena rectangle
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }
}

/// Anything with a position and velocity in the arena
pub trait Body {
    fn pos(&self) -> Vec2;
    fn pos_mut(&mut self) -> &mut Vec2;
    fn vel(&self) -> Vec2;
}

/// Euclidean distance between two bodies
#[inline]
pub fn distance(a: &impl Body, b: &impl Body) -> f32 {
    a.pos().distance(b.pos())
}

/// Wrap a single coordinate into `[0, extent)`.
///
/// Handles at most one extent of overflow, which is enough because per-tick
/// displacement is always smaller than the arena.
#[inline]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        let wrapped = value + extent;
        // A tiny negative value can round up to exactly `extent`
        if wrapped >= extent { 0.0 } else { wrapped }
    } else if value >= extent {
        value - extent
    } else {
        value
    }
}

/// Wrap a position into the arena, independently per axis
#[inline]
pub fn wrap_position(pos: Vec2, arena: &Arena) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, arena.width), wrap_axis(pos.y, arena.height))
}

/// Wrap a body's position in place
pub fn wrap(body: &mut impl Body, arena: &Arena) {
    let pos = body.pos_mut();
    *pos = wrap_position(*pos, arena);
}

/// Rescale velocity down to `max` when its magnitude exceeds it
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    vel.clamp_length_max(max)
}

/// Unit vector, or zero for degenerate input
#[inline]
pub fn unit_or_zero(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Direction a heading points at. Heading 0 is "up" (negative y).
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}
