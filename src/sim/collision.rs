//! Collision detection and resolution
//!
//! Resolution is two-phase: `scan_collisions` reads the state and returns a
//! list of effects, then `apply_effects` mutates. Nothing is removed while a
//! collection is being scanned.
//!
//! Tie-breaks: projectiles are scanned in ascending id order, each against
//! obstacles in ascending id order. The first unclaimed overlapping obstacle
//! wins; an obstacle can be claimed once per tick, so a second projectile on
//! the same obstacle survives until the next tick.

use super::rng::RandomSource;
use super::space::distance;
use super::spawn::fragment;
use super::state::{Craft, GameEvent, GameState, Obstacle, Projectile};
use crate::consts::MAX_LIVES;

/// A deferred consequence of a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Projectile destroyed an obstacle
    ProjectileHit { projectile_id: u32, obstacle_id: u32 },
    /// Vulnerable craft touched an obstacle
    CraftHit { obstacle_id: u32 },
}

/// Point-in-circle test against the obstacle's nominal radius
#[inline]
pub fn projectile_hits(projectile: &Projectile, obstacle: &Obstacle) -> bool {
    distance(projectile, obstacle) < obstacle.radius()
}

/// Craft center inside the obstacle's radius
#[inline]
pub fn craft_hits(craft: &Craft, obstacle: &Obstacle) -> bool {
    distance(craft, obstacle) < obstacle.radius()
}

/// Find every collision this tick without mutating anything
pub fn scan_collisions(state: &GameState) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut claimed: Vec<u32> = Vec::new();

    for projectile in &state.projectiles {
        let hit = state
            .obstacles
            .iter()
            .find(|o| !claimed.contains(&o.id) && projectile_hits(projectile, o));
        if let Some(obstacle) = hit {
            claimed.push(obstacle.id);
            effects.push(Effect::ProjectileHit {
                projectile_id: projectile.id,
                obstacle_id: obstacle.id,
            });
        }
    }

    if !state.craft.is_invincible() {
        let hit = state
            .obstacles
            .iter()
            .find(|o| !claimed.contains(&o.id) && craft_hits(&state.craft, o));
        if let Some(obstacle) = hit {
            effects.push(Effect::CraftHit {
                obstacle_id: obstacle.id,
            });
        }
    }

    effects
}

/// Apply scanned effects in order, emitting events as they land
pub fn apply_effects(state: &mut GameState, effects: &[Effect], rng: &mut impl RandomSource) {
    for effect in effects {
        match *effect {
            Effect::ProjectileHit {
                projectile_id,
                obstacle_id,
            } => {
                if let Some(idx) = state.projectiles.iter().position(|p| p.id == projectile_id) {
                    state.projectiles.remove(idx);
                }
                let Some(idx) = state.obstacles.iter().position(|o| o.id == obstacle_id) else {
                    continue;
                };
                let obstacle = state.obstacles.remove(idx);
                destroy_obstacle(state, obstacle, rng);
            }
            Effect::CraftHit { obstacle_id } => {
                log::debug!("Craft hit by obstacle {}", obstacle_id);
                lose_life(state);
            }
        }
    }
}

/// Score an obstacle, fragment it, and pay out any special bonus
fn destroy_obstacle(state: &mut GameState, obstacle: Obstacle, rng: &mut impl RandomSource) {
    state.score += obstacle.tier.score();

    let children = fragment(state, &obstacle, rng);
    log::debug!(
        "Obstacle {} ({:?}) destroyed, {} fragments",
        obstacle.id,
        obstacle.tier,
        children.len()
    );
    state.obstacles.extend(children);

    state.events.push(GameEvent::ObstacleDestroyed {
        tier: obstacle.tier,
        special: obstacle.special,
    });

    if obstacle.special {
        state.lives = (state.lives + 1).min(MAX_LIVES);
        state.events.push(GameEvent::BonusAwarded { lives: state.lives });
    }
}

/// Take a life and replace the craft with a fresh invincible one
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.respawn_craft();
    state.events.push(GameEvent::CraftDestroyed {
        lives_left: state.lives,
    });
}
