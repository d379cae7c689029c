//! Obstacle creation: waves, fragments, outlines
//!
//! Outlines are rolled once per obstacle and never regenerated.

use glam::Vec2;
use std::f32::consts::TAU;

use super::rng::RandomSource;
use super::space::{Arena, heading_vector, unit_or_zero, wrap_position};
use super::state::{GameState, Obstacle, Tier};
use crate::consts::*;

/// Number of obstacles in the wave for a given level
#[inline]
pub fn wave_size(level: u32) -> u32 {
    BASE_OBSTACLE_COUNT + level
}

/// Drift speed ceiling for a level
pub fn level_speed(level: u32) -> f32 {
    OBSTACLE_SPEED * (1.0 + LEVEL_SPEED_STEP * level.saturating_sub(1) as f32)
}

/// Roll a fresh irregular outline
pub fn random_outline(rng: &mut impl RandomSource) -> Vec<f32> {
    (0..OUTLINE_VERTICES)
        .map(|_| rng.range(OUTLINE_JITTER_MIN, OUTLINE_JITTER_MAX))
        .collect()
}

/// Build an obstacle with randomized outline, drift and spin
pub fn new_obstacle(
    id: u32,
    tier: Tier,
    pos: Vec2,
    level: u32,
    special: bool,
    rng: &mut impl RandomSource,
) -> Obstacle {
    let outline = random_outline(rng);
    let direction = rng.range(0.0, TAU);
    let speed = level_speed(level) * rng.range(0.5, 1.0);
    let spin = rng.range(-1.0, 1.0);
    Obstacle {
        id,
        pos,
        vel: heading_vector(direction) * speed,
        tier,
        outline,
        special,
        rotation: 0.0,
        spin,
    }
}

/// Pick a position at least `SPAWN_CLEARANCE` away from `avoid`.
///
/// Retries are bounded; if every candidate lands too close, the last one is
/// pushed out onto the clearance ring.
pub fn place_clear_of(arena: &Arena, avoid: Vec2, rng: &mut impl RandomSource) -> Vec2 {
    let mut candidate = avoid;
    for _ in 0..SPAWN_MAX_RETRIES {
        candidate = Vec2::new(rng.range(0.0, arena.width), rng.range(0.0, arena.height));
        if candidate.distance(avoid) >= SPAWN_CLEARANCE {
            return candidate;
        }
    }

    let mut dir = unit_or_zero(candidate - avoid);
    if dir == Vec2::ZERO {
        dir = Vec2::X;
    }
    log::debug!("Spawn retries exhausted, pushing obstacle to clearance ring");
    wrap_position(avoid + dir * SPAWN_CLEARANCE, arena)
}

/// Spawn a new wave of large obstacles for the current level
pub fn spawn_wave(state: &mut GameState, rng: &mut impl RandomSource) {
    let count = wave_size(state.level);
    let avoid = state.arena.center();
    log::info!("Level {}: spawning {} obstacles", state.level, count);

    for _ in 0..count {
        let pos = place_clear_of(&state.arena, avoid, rng);
        let special = rng.chance(SPECIAL_CHANCE);
        if special {
            log::debug!("Special obstacle spawned at ({:.0}, {:.0})", pos.x, pos.y);
        }
        let id = state.next_entity_id();
        let obstacle = new_obstacle(id, Tier::Large, pos, state.level, special, rng);
        state.obstacles.push(obstacle);
    }
}

/// Break an obstacle into two fragments of the next tier down.
/// Smallest-tier obstacles produce nothing.
pub fn fragment(
    state: &mut GameState,
    parent: &Obstacle,
    rng: &mut impl RandomSource,
) -> Vec<Obstacle> {
    let Some(tier) = parent.tier.smaller() else {
        return Vec::new();
    };
    (0..2)
        .map(|_| {
            let id = state.next_entity_id();
            new_obstacle(id, tier, parent.pos, state.level, false, rng)
        })
        .collect()
}
