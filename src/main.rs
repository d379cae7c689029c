//! Rock Drift entry point
//!
//! Headless native runner: plays the configured number of steps with a simple
//! autopilot and logs what happens. A windowed front end would replace the
//! autopilot with real key events fed into the same `ActionMap`.

use std::path::PathBuf;

use rock_drift::audio::AudioManager;
use rock_drift::persistence::JsonFileStore;
use rock_drift::platform::{Action, ActionMap};
use rock_drift::sim::GameEvent;
use rock_drift::{Session, Settings};

/// Scripted pilot: spin, pulse fire, and restart when the round ends
fn autopilot(actions: &mut ActionMap, step: u32, in_menu: bool) {
    actions.clear();
    if in_menu {
        actions.set(Action::Start, true);
        return;
    }
    actions.set(Action::TurnRight, (step / 90) % 2 == 0);
    actions.set(Action::TurnLeft, (step / 90) % 2 == 1);
    actions.set(Action::Thrust, step % 120 < 15);
    actions.set(Action::Fire, step % 8 < 4);
    actions.set(Action::Hyperspace, step % 600 == 599);
}

fn main() {
    env_logger::init();
    log::info!("Rock Drift (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref());
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);

    let store = JsonFileStore::new(settings.high_score_path.clone());
    let mut session = Session::new(&settings, store, seed);
    let mut audio = AudioManager::new();
    let mut actions = ActionMap::new();
    let mut rounds = 0u32;

    for step in 0..settings.demo_ticks {
        let in_menu = session.state().phase == rock_drift::sim::GamePhase::Menu;
        autopilot(&mut actions, step, in_menu);

        let events = session.step(&actions);
        audio.handle_events(&events);
        for event in &events {
            match event {
                GameEvent::WaveCleared { level } => log::info!("Wave {} cleared", level),
                GameEvent::CraftDestroyed { lives_left } => {
                    log::info!("Craft destroyed, {} lives left", lives_left)
                }
                GameEvent::RoundEnded { score, is_new_high } => {
                    rounds += 1;
                    log::info!("Round {} ended: {} points (new high: {})", rounds, score, is_new_high);
                }
                _ => {}
            }
        }
    }

    let state = session.state();
    println!(
        "Played {} steps, {} rounds finished. Score {} at level {}, high score {}, {} entities on screen",
        settings.demo_ticks,
        rounds,
        state.score,
        state.level,
        session.high_score(),
        session.draw_list().len()
    );
}
