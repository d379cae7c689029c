//! Shape generation for 2D primitives
//!
//! Outlines are emitted in local space (unrotated, centered on the entity).
//! The drawing surface applies `rotation` and translates to `pos`.

use glam::{Mat2, Vec2};
use std::f32::consts::TAU;

use crate::sim::state::{Craft, GamePhase, GameState, Obstacle, Projectile, Tier};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const GOLD: [f32; 4] = [1.0, 0.8, 0.2, 1.0];
const DIM: [f32; 4] = [1.0, 1.0, 1.0, 0.35];

/// Length of the projectile streak, in seconds of travel
const STREAK_SECONDS: f32 = 0.02;

/// What a draw command depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Craft,
    Projectile,
    Obstacle(Tier),
}

/// Stateless description of one entity for the drawing surface
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub pos: Vec2,
    pub rotation: Option<f32>,
    pub radius: Option<f32>,
    /// Closed polyline in local space
    pub outline: Vec<Vec2>,
    pub color: [f32; 4],
}

impl DrawCommand {
    /// Outline transformed into arena space
    pub fn world_points(&self) -> Vec<Vec2> {
        let rot = Mat2::from_angle(self.rotation.unwrap_or(0.0));
        self.outline.iter().map(|p| self.pos + rot * *p).collect()
    }
}

/// Triangular hull, nose pointing up at heading 0
pub fn craft_hull() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, -12.0),
        Vec2::new(8.0, 10.0),
        Vec2::new(-8.0, 10.0),
    ]
}

/// Irregular polygon from the obstacle's stored radius multipliers
pub fn obstacle_outline(radius: f32, multipliers: &[f32]) -> Vec<Vec2> {
    let count = multipliers.len() as f32;
    multipliers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let theta = i as f32 / count * TAU;
            Vec2::new(theta.cos(), theta.sin()) * radius * m
        })
        .collect()
}

/// Short line segment trailing along the projectile's velocity
pub fn projectile_streak(vel: Vec2) -> Vec<Vec2> {
    vec![Vec2::ZERO, vel * STREAK_SECONDS]
}

fn craft_command(craft: &Craft) -> DrawCommand {
    // Blink while invincible
    let color = if craft.is_invincible() && (craft.invincible_ticks / 10) % 2 == 0 {
        DIM
    } else {
        WHITE
    };
    DrawCommand {
        kind: DrawKind::Craft,
        pos: craft.pos,
        rotation: Some(craft.heading),
        radius: None,
        outline: craft_hull(),
        color,
    }
}

fn projectile_command(projectile: &Projectile) -> DrawCommand {
    DrawCommand {
        kind: DrawKind::Projectile,
        pos: projectile.pos,
        rotation: None,
        radius: None,
        outline: projectile_streak(projectile.vel),
        color: WHITE,
    }
}

fn obstacle_command(obstacle: &Obstacle) -> DrawCommand {
    DrawCommand {
        kind: DrawKind::Obstacle(obstacle.tier),
        pos: obstacle.pos,
        rotation: Some(obstacle.rotation),
        radius: Some(obstacle.radius()),
        outline: obstacle_outline(obstacle.radius(), &obstacle.outline),
        color: if obstacle.special { GOLD } else { WHITE },
    }
}

/// Draw descriptors for every live entity, obstacles first
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut commands =
        Vec::with_capacity(state.obstacles.len() + state.projectiles.len() + 1);
    commands.extend(state.obstacles.iter().map(obstacle_command));
    commands.extend(state.projectiles.iter().map(projectile_command));
    if state.phase == GamePhase::Playing {
        commands.push(craft_command(&state.craft));
    }
    commands
}
