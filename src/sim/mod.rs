//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Single-threaded, one synchronous step per call
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (by entity ID)
//! - No rendering, input or storage dependencies

pub mod collision;
pub mod physics;
pub mod rng;
pub mod space;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Effect, apply_effects, scan_collisions};
pub use physics::{ControlInput, StepOutcome, step_craft, step_obstacle, step_projectile};
pub use rng::{RandomSource, ScriptedRandom};
pub use space::{Arena, Body, clamp_speed, distance, wrap, wrap_position};
pub use spawn::{fragment, spawn_wave};
pub use state::{Craft, GameEvent, GamePhase, GameState, Obstacle, Projectile, Tier};
pub use tick::{TickInput, end_round, start_round, tick};
