//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives in `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::space::{Arena, Body};
use crate::consts::*;
use crate::highscores::HighScore;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start signal; obstacles keep drifting as attract mode
    Menu,
    /// Active round
    Playing,
}

/// Obstacle size tier. Fragmentation walks Large -> Medium -> Small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Large,
    Medium,
    Small,
}

impl Tier {
    /// Numeric tier (3 = largest)
    pub fn level(&self) -> u8 {
        match self {
            Tier::Large => 3,
            Tier::Medium => 2,
            Tier::Small => 1,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Tier::Large => 40.0,
            Tier::Medium => 22.0,
            Tier::Small => 12.0,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            Tier::Large => 20,
            Tier::Medium => 50,
            Tier::Small => 100,
        }
    }

    /// Tier of the fragments this tier breaks into, if any
    pub fn smaller(&self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians, [0, 2π), 0 = up
    pub heading: f32,
    /// Set when a shot was taken for the current press of fire
    pub fire_latched: bool,
    /// Ticks of invincibility remaining (0 = vulnerable)
    pub invincible_ticks: u32,
    /// Ticks until hyperspace is available again
    pub hyperspace_ticks: u32,
}

impl Craft {
    /// A fresh craft at rest, pointing up, with a full invincibility window
    pub fn spawn(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            fire_latched: false,
            invincible_ticks: INVINCIBILITY_TICKS,
            hyperspace_ticks: 0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Count per-tick timers down towards zero
    pub fn tick_timers(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.hyperspace_ticks = self.hyperspace_ticks.saturating_sub(1);
    }
}

/// A projectile fired by the craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at creation
    pub vel: Vec2,
    /// Ticks left before the projectile expires
    pub life_ticks: u32,
}

/// A drifting obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub tier: Tier,
    /// Per-vertex radius multipliers, generated once at creation
    pub outline: Vec<f32>,
    /// Rare bonus-bearing obstacle
    pub special: bool,
    /// Visual rotation (radians) and its rate
    pub rotation: f32,
    pub spin: f32,
}

impl Obstacle {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.tier.radius()
    }
}

macro_rules! impl_body {
    ($($ty:ty),*) => {
        $(impl Body for $ty {
            fn pos(&self) -> Vec2 {
                self.pos
            }
            fn pos_mut(&mut self) -> &mut Vec2 {
                &mut self.pos
            }
            fn vel(&self) -> Vec2 {
                self.vel
            }
        })*
    };
}

impl_body!(Craft, Projectile, Obstacle);

/// Discrete events for audio, credits and other observers.
/// Emitted in the order effects were applied within a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Fired,
    Hyperspace,
    ObstacleDestroyed { tier: Tier, special: bool },
    BonusAwarded { lives: u8 },
    CraftDestroyed { lives_left: u8 },
    WaveCleared { level: u32 },
    RoundEnded { score: u64, is_new_high: bool },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Arena bounds (fixed for the lifetime of the state)
    pub arena: Arena,
    /// Current phase
    pub phase: GamePhase,
    /// Score for the current (or last) round
    pub score: u64,
    /// Best score seen, persisted across rounds
    pub high_score: HighScore,
    /// Lives remaining
    pub lives: u8,
    /// Current wave/level (1-based)
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player craft
    pub craft: Craft,
    /// Live projectiles (ascending id order)
    pub projectiles: Vec<Projectile>,
    /// Live obstacles (ascending id order)
    pub obstacles: Vec<Obstacle>,
    /// Events produced by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state sitting in the menu
    pub fn new(arena: Arena, high_score: u64) -> Self {
        Self {
            arena,
            phase: GamePhase::Menu,
            score: 0,
            high_score: HighScore::new(high_score),
            lives: STARTING_LIVES,
            level: 1,
            time_ticks: 0,
            craft: Craft::spawn(arena.center()),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the craft with a fresh one at the arena center
    pub fn respawn_craft(&mut self) {
        self.craft = Craft::spawn(self.arena.center());
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
        self.obstacles.sort_by_key(|o| o.id);
    }
}
