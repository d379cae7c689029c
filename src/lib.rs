//! Rock Drift - An asteroid shooter on a toroidal plane
//!
//! Core modules:
//! - `sim`: Simulation core (physics, collisions, spawning, game state)
//! - `renderer`: Draw descriptors handed to an external drawing surface
//! - `platform`: Input translation into held-action flags
//! - `persistence`: High-score storage backends
//! - `session`: Orchestrator tying simulation, storage and events together

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest step the simulation will integrate in one tick
    pub const MAX_STEP_SECONDS: f32 = 0.1;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Craft handling
    pub const CRAFT_MAX_SPEED: f32 = 220.0;
    /// Turn rate in radians per second (180 degrees)
    pub const CRAFT_TURN_RATE: f32 = std::f32::consts::PI;
    pub const CRAFT_THRUST: f32 = 200.0;
    /// Multiplicative velocity drag applied every tick
    pub const CRAFT_DRAG: f32 = 0.92;
    /// Collision/draw radius of the craft hull
    pub const CRAFT_RADIUS: f32 = 12.0;
    /// Invincibility window after (re)spawn, in ticks (3 seconds)
    pub const INVINCIBILITY_TICKS: u32 = 180;
    /// Hyperspace cooldown, in ticks (2 seconds)
    pub const HYPERSPACE_COOLDOWN_TICKS: u32 = 120;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_LIFETIME: u32 = 60;
    pub const MAX_PROJECTILES: usize = 8;

    /// Obstacles
    pub const OBSTACLE_SPEED: f32 = 60.0;
    /// Speed multiplier gained per level past the first
    pub const LEVEL_SPEED_STEP: f32 = 0.1;
    /// Wave size is BASE_OBSTACLE_COUNT + level
    pub const BASE_OBSTACLE_COUNT: u32 = 4;
    pub const OUTLINE_VERTICES: usize = 10;
    pub const OUTLINE_JITTER_MIN: f32 = 0.75;
    pub const OUTLINE_JITTER_MAX: f32 = 1.25;
    /// Probability that a freshly spawned large obstacle is special
    pub const SPECIAL_CHANCE: f32 = 0.05;

    /// Spawn placement
    pub const SPAWN_CLEARANCE: f32 = 150.0;
    pub const SPAWN_MAX_RETRIES: u32 = 32;
    /// Arena extents must exceed this so the clearance ring fits inside
    pub const MIN_ARENA_EXTENT: f32 = 2.0 * SPAWN_CLEARANCE;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
}

/// Normalize a heading to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}
