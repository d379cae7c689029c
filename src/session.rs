//! Game session: the orchestrator around the simulation
//!
//! Owns the state, the RNG and the high-score store. The store is read once
//! at construction and written only when a round ends. Storage failures are
//! logged and the session carries on with its in-memory high score.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::persistence::HighScoreStore;
use crate::platform::ActionMap;
use crate::renderer::{DrawCommand, draw_list};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};

pub struct Session<S: HighScoreStore> {
    state: GameState,
    rng: Pcg32,
    store: S,
    step_seconds: f32,
    /// False once the store has failed; later saves are skipped
    store_healthy: bool,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(settings: &Settings, mut store: S, seed: u64) -> Self {
        let (best, store_healthy) = match store.load() {
            Ok(best) => (best, true),
            Err(e) => {
                log::warn!("High score unavailable, keeping it in memory only: {}", e);
                (0, false)
            }
        };
        Self {
            state: GameState::new(settings.arena(), best),
            rng: Pcg32::seed_from_u64(seed),
            store,
            step_seconds: settings.step_seconds,
            store_healthy,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one simulation step with the currently held actions
    pub fn step(&mut self, actions: &ActionMap) -> Vec<GameEvent> {
        let input = actions.tick_input();
        tick(&mut self.state, &input, self.step_seconds, &mut self.rng);
        let events = self.state.drain_events();

        if events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundEnded { .. }))
        {
            self.round_ended();
        }
        events
    }

    /// Draw descriptors for the current state
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        draw_list(&self.state)
    }

    /// The state already recorded the score; only persistence remains
    fn round_ended(&mut self) {
        if !self.store_healthy {
            return;
        }
        if let Err(e) = self.store.save(self.state.high_score.best) {
            log::warn!("Failed to save high score, continuing in memory: {}", e);
            self.store_healthy = false;
        }
    }
}
