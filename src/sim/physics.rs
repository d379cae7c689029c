//! Per-entity integration
//!
//! Craft: turn, thrust, drag, speed clamp, integrate, wrap (in that order).
//! Projectiles and obstacles coast on a fixed velocity and wrap.

use super::space::{Arena, clamp_speed, heading_vector, wrap};
use super::state::{Craft, Obstacle, Projectile};
use crate::consts::*;
use crate::normalize_angle;

/// Control flags for one craft step
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
}

/// Whether a projectile survives its step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Alive,
    Expired,
}

/// Advance the craft by one step
pub fn step_craft(craft: &mut Craft, control: ControlInput, dt: f32, arena: &Arena) {
    if control.turn_left {
        craft.heading -= CRAFT_TURN_RATE * dt;
    }
    if control.turn_right {
        craft.heading += CRAFT_TURN_RATE * dt;
    }
    craft.heading = normalize_angle(craft.heading);

    if control.thrust {
        craft.vel += heading_vector(craft.heading) * CRAFT_THRUST * dt;
    }

    // Drag applies every tick, thrusting or not
    craft.vel *= CRAFT_DRAG;
    craft.vel = clamp_speed(craft.vel, CRAFT_MAX_SPEED);

    craft.pos += craft.vel * dt;
    wrap(craft, arena);
}

/// Advance a projectile; reports expiry once its lifetime runs out
pub fn step_projectile(projectile: &mut Projectile, dt: f32, arena: &Arena) -> StepOutcome {
    projectile.pos += projectile.vel * dt;
    wrap(projectile, arena);
    projectile.life_ticks = projectile.life_ticks.saturating_sub(1);
    if projectile.life_ticks == 0 {
        StepOutcome::Expired
    } else {
        StepOutcome::Alive
    }
}

/// Advance an obstacle along its drift
pub fn step_obstacle(obstacle: &mut Obstacle, dt: f32, arena: &Arena) {
    obstacle.pos += obstacle.vel * dt;
    obstacle.rotation = normalize_angle(obstacle.rotation + obstacle.spin * dt);
    wrap(obstacle, arena);
}
