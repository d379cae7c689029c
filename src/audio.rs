//! Sound cues
//!
//! Maps simulation events to sound effects. Native builds have no audio
//! backend, so cues are only logged; the mapping is what matters.

use crate::sim::{GameEvent, Tier};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile fired
    Fire,
    /// Craft jumped through hyperspace
    Hyperspace,
    /// Obstacle destroyed, by size
    ExplodeLarge,
    ExplodeMedium,
    ExplodeSmall,
    /// Bonus life collected
    Bonus,
    /// Craft lost
    CraftExplode,
    /// Wave cleared
    WaveClear,
    /// Round started
    Start,
    /// Round over
    GameOver,
    /// Round over with a new best score
    HighScore,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RoundStarted => Some(SoundEffect::Start),
            GameEvent::Fired => Some(SoundEffect::Fire),
            GameEvent::Hyperspace => Some(SoundEffect::Hyperspace),
            GameEvent::ObstacleDestroyed { tier, .. } => Some(match tier {
                Tier::Large => SoundEffect::ExplodeLarge,
                Tier::Medium => SoundEffect::ExplodeMedium,
                Tier::Small => SoundEffect::ExplodeSmall,
            }),
            GameEvent::BonusAwarded { .. } => Some(SoundEffect::Bonus),
            GameEvent::CraftDestroyed { .. } => Some(SoundEffect::CraftExplode),
            GameEvent::WaveCleared { .. } => Some(SoundEffect::WaveClear),
            GameEvent::RoundEnded { is_new_high, .. } => Some(if *is_new_high {
                SoundEffect::HighScore
            } else {
                SoundEffect::GameOver
            }),
        }
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Number of cues played so far
    pub fn played(&self) -> u64 {
        self.played
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("sfx {:?} at volume {:.2}", effect, volume);
    }

    /// Play the cues for a tick's events, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
