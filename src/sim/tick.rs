//! Simulation tick
//!
//! One call advances the game by one logical step. The step never fails and
//! never blocks; callers drain `GameState::events` afterwards.

use glam::Vec2;

use super::collision::{apply_effects, scan_collisions};
use super::physics::{ControlInput, StepOutcome, step_craft, step_obstacle, step_projectile};
use super::rng::RandomSource;
use super::space::{heading_vector, wrap_position};
use super::spawn::spawn_wave;
use super::state::{GameEvent, GamePhase, GameState, Projectile};
use crate::consts::*;

/// Held-action flags sampled once per tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Instant relocation (subject to cooldown)
    pub hyperspace: bool,
    /// Start a round from the menu (fire also works)
    pub start: bool,
}

impl TickInput {
    fn control(&self) -> ControlInput {
        ControlInput {
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            thrust: self.thrust,
        }
    }
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut impl RandomSource) {
    // Long frames are capped so per-step travel stays well under one arena extent
    let dt = dt.clamp(0.0, MAX_STEP_SECONDS);
    state.events.clear();
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Menu => {
            // Attract mode: leftover obstacles keep drifting
            for obstacle in &mut state.obstacles {
                step_obstacle(obstacle, dt, &state.arena);
            }
            // Fire only starts a round on a fresh press, not one held over from play
            if !input.fire {
                state.craft.fire_latched = false;
            }
            let fire_pressed = input.fire && !state.craft.fire_latched;
            if input.start || fire_pressed {
                start_round(state, input, rng);
            }
        }

        GamePhase::Playing => {
            state.craft.tick_timers();

            handle_fire(state, input.fire);

            if input.hyperspace && state.craft.hyperspace_ticks == 0 {
                state.craft.pos = Vec2::new(
                    rng.range(0.0, state.arena.width),
                    rng.range(0.0, state.arena.height),
                );
                state.craft.vel = Vec2::ZERO;
                state.craft.hyperspace_ticks = HYPERSPACE_COOLDOWN_TICKS;
                state.events.push(GameEvent::Hyperspace);
            }

            step_craft(&mut state.craft, input.control(), dt, &state.arena);

            let arena = state.arena;
            state
                .projectiles
                .retain_mut(|p| step_projectile(p, dt, &arena) == StepOutcome::Alive);
            for obstacle in &mut state.obstacles {
                step_obstacle(obstacle, dt, &arena);
            }

            let effects = scan_collisions(state);
            apply_effects(state, &effects, rng);

            if state.lives == 0 {
                end_round(state);
                state.craft.fire_latched = input.fire;
            } else if state.obstacles.is_empty() {
                state.events.push(GameEvent::WaveCleared { level: state.level });
                state.level += 1;
                state.respawn_craft();
                spawn_wave(state, rng);
            }
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Menu -> Playing: reset the round and spawn the first wave
pub fn start_round(state: &mut GameState, input: &TickInput, rng: &mut impl RandomSource) {
    log::info!("Round started (high score {})", state.high_score.best);
    state.score = 0;
    state.lives = STARTING_LIVES;
    state.level = 1;
    state.projectiles.clear();
    state.obstacles.clear();
    state.respawn_craft();
    // The press that started the round must not also fire
    state.craft.fire_latched = input.fire;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::RoundStarted);
    spawn_wave(state, rng);
}

/// Playing -> Menu: record the high score and stop the round
pub fn end_round(state: &mut GameState) {
    let is_new_high = state.high_score.record(state.score);
    log::info!(
        "Round over: score {} level {}{}",
        state.score,
        state.level,
        if is_new_high { " (new high score)" } else { "" }
    );
    state.projectiles.clear();
    state.phase = GamePhase::Menu;
    state.events.push(GameEvent::RoundEnded {
        score: state.score,
        is_new_high,
    });
}

/// One shot per press: the latch is only released with the fire action
fn handle_fire(state: &mut GameState, fire: bool) {
    if !fire {
        state.craft.fire_latched = false;
        return;
    }
    if state.craft.fire_latched {
        return;
    }
    state.craft.fire_latched = true;
    if state.projectiles.len() >= MAX_PROJECTILES {
        return;
    }

    let direction = heading_vector(state.craft.heading);
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: wrap_position(state.craft.pos + direction * CRAFT_RADIUS, &state.arena),
        vel: direction * PROJECTILE_SPEED,
        life_ticks: PROJECTILE_LIFETIME,
    });
    state.events.push(GameEvent::Fired);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::space::Arena;
    use crate::sim::spawn::{new_obstacle, wave_size};
    use crate::sim::state::{Obstacle, Tier};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn start(state: &mut GameState, rng: &mut Pcg32) {
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(state, &input, SIM_DT, rng);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    fn still_obstacle(state: &mut GameState, tier: Tier, pos: Vec2) -> Obstacle {
        let id = state.next_entity_id();
        let mut obstacle = new_obstacle(id, tier, pos, 1, false, &mut ScriptedRandom::constant(0.25));
        obstacle.vel = Vec2::ZERO;
        obstacle
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(1);

        tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);

        start(&mut state, &mut rng);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len() as u32, wave_size(1));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.events, vec![GameEvent::RoundStarted]);
    }

    #[test]
    fn test_fire_once_per_press() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(2);
        start(&mut state, &mut rng);

        // Keep one harmless obstacle far away so the wave never completes
        state.obstacles.clear();
        let far = still_obstacle(&mut state, Tier::Small, Vec2::new(50.0, 50.0));
        state.obstacles.push(far);

        let held = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &held, SIM_DT, &mut rng);
        }
        assert_eq!(state.projectiles.len(), 1);

        tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
        tick(&mut state, &held, SIM_DT, &mut rng);
        assert_eq!(state.projectiles.len(), 2);
        assert_eq!(state.events, vec![GameEvent::Fired]);
    }

    #[test]
    fn test_start_press_does_not_fire() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(3);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &fire, SIM_DT, &mut rng);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_cap_holds_shot() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(9);
        start(&mut state, &mut rng);

        state.obstacles.clear();
        let far = still_obstacle(&mut state, Tier::Small, Vec2::new(50.0, 50.0));
        state.obstacles.push(far);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..MAX_PROJECTILES {
            tick(&mut state, &fire, SIM_DT, &mut rng);
            assert_eq!(state.events, vec![GameEvent::Fired]);
            tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
        }
        assert_eq!(state.projectiles.len(), MAX_PROJECTILES);

        // A fresh press at the cap is swallowed, not queued
        tick(&mut state, &fire, SIM_DT, &mut rng);
        assert_eq!(state.projectiles.len(), MAX_PROJECTILES);
        assert!(!state.events.contains(&GameEvent::Fired));
        assert!(state.craft.fire_latched);
    }

    #[test]
    fn test_held_fire_does_not_restart_round() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(10);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);

        state.obstacles.clear();
        let center = state.arena.center();
        let rock = still_obstacle(&mut state, Tier::Large, center);
        state.obstacles.push(rock);
        state.lives = 1;
        state.craft.invincible_ticks = 0;

        tick(&mut state, &fire, SIM_DT, &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);

        for _ in 0..30 {
            tick(&mut state, &fire, SIM_DT, &mut rng);
            assert_eq!(state.phase, GamePhase::Menu);
        }

        tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
        assert_eq!(state.phase, GamePhase::Menu);
        tick(&mut state, &fire, SIM_DT, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_long_frames_stay_in_arena() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(11);
        start(&mut state, &mut rng);

        let fire = TickInput {
            fire: true,
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 4.0, &mut rng);
        assert_eq!(state.projectiles.len(), 1);

        for _ in 0..20 {
            let before: Vec<(u32, Vec2)> = state.projectiles.iter().map(|p| (p.id, p.pos)).collect();
            tick(&mut state, &TickInput::default(), 4.0, &mut rng);
            assert!(state.arena.contains(state.craft.pos));
            assert!(state.projectiles.iter().all(|p| state.arena.contains(p.pos)));
            assert!(state.obstacles.iter().all(|o| state.arena.contains(o.pos)));
            for p in &state.projectiles {
                if let Some((_, old)) = before.iter().find(|(id, _)| *id == p.id) {
                    // Shortest displacement across the seam
                    let d = (p.pos - *old).abs();
                    let step = Vec2::new(
                        d.x.min(state.arena.width - d.x),
                        d.y.min(state.arena.height - d.y),
                    );
                    assert!(step.length() <= PROJECTILE_SPEED * MAX_STEP_SECONDS + 1e-2);
                }
            }
        }
    }

    #[test]
    fn test_wave_completion_through_fragments() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(4);
        start(&mut state, &mut rng);

        state.obstacles.clear();
        let rock = still_obstacle(&mut state, Tier::Large, Vec2::new(100.0, 100.0));
        state.obstacles.push(rock);

        let mut ticks = 0;
        while state.level == 1 {
            // Drop a stationary projectile on top of every obstacle
            let targets: Vec<Vec2> = state.obstacles.iter().map(|o| o.pos).collect();
            for pos in targets {
                let id = state.next_entity_id();
                state.projectiles.push(Projectile {
                    id,
                    pos,
                    vel: Vec2::ZERO,
                    life_ticks: 10,
                });
            }
            tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
            ticks += 1;
            assert!(ticks < 10, "wave never completed");
        }

        assert_eq!(ticks, 3);
        assert_eq!(state.level, 2);
        assert_eq!(state.obstacles.len() as u32, wave_size(2));
        assert!(state.obstacles.iter().all(|o| o.tier == Tier::Large));
        assert_eq!(
            state.score,
            Tier::Large.score() + 2 * Tier::Medium.score() + 4 * Tier::Small.score()
        );
        assert!(state.events.contains(&GameEvent::WaveCleared { level: 1 }));
    }

    #[test]
    fn test_last_life_returns_to_menu_with_high_score() {
        let mut state = GameState::new(Arena::default(), 100);
        let mut rng = Pcg32::seed_from_u64(5);
        start(&mut state, &mut rng);

        state.obstacles.clear();
        let center = state.arena.center();
        let rock = still_obstacle(&mut state, Tier::Large, center);
        state.obstacles.push(rock);
        state.lives = 1;
        state.score = 500;
        state.craft.invincible_ticks = 0;

        tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.high_score.best, 500);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::RoundEnded {
                score: 500,
                is_new_high: true
            })
        );
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut state = GameState::new(Arena::default(), 1000);
        state.phase = GamePhase::Playing;
        state.score = 10;
        end_round(&mut state);
        assert_eq!(state.high_score.best, 1000);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_invincibility_window() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(6);
        start(&mut state, &mut rng);

        state.obstacles.clear();
        let center = state.arena.center();
        let rock = still_obstacle(&mut state, Tier::Large, center);
        state.obstacles.push(rock);
        state.craft.invincible_ticks = 0;

        tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
        assert_eq!(state.lives, 2);
        assert_eq!(state.craft.invincible_ticks, INVINCIBILITY_TICKS);

        // Still overlapping, but protected for the whole window
        for _ in 0..INVINCIBILITY_TICKS - 1 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
            assert_eq!(state.lives, 2);
        }

        // Window expires on this tick
        tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_score_never_decreases() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(7);
        start(&mut state, &mut rng);

        let mut last_score = 0;
        for i in 0..3000u32 {
            let input = TickInput {
                turn_right: i % 3 == 0,
                thrust: i % 7 == 0,
                fire: i % 2 == 0,
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT, &mut rng);
            if state.phase != GamePhase::Playing {
                break;
            }
            assert!(state.score >= last_score);
            last_score = state.score;

            assert!(state.arena.contains(state.craft.pos));
            assert!(state.projectiles.iter().all(|p| state.arena.contains(p.pos)));
            assert!(state.obstacles.iter().all(|o| state.arena.contains(o.pos)));
        }
    }

    #[test]
    fn test_hyperspace_cooldown() {
        let mut state = GameState::new(Arena::default(), 0);
        let mut rng = Pcg32::seed_from_u64(8);
        start(&mut state, &mut rng);

        let jump = TickInput {
            hyperspace: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT, &mut rng);
        assert!(state.events.contains(&GameEvent::Hyperspace));
        assert_eq!(state.craft.hyperspace_ticks, HYPERSPACE_COOLDOWN_TICKS);

        tick(&mut state, &jump, SIM_DT, &mut rng);
        assert!(!state.events.contains(&GameEvent::Hyperspace));
        assert_eq!(state.craft.hyperspace_ticks, HYPERSPACE_COOLDOWN_TICKS - 1);
    }
}
