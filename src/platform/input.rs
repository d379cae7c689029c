//! Logical actions and key translation

use std::collections::HashMap;

use crate::sim::TickInput;

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
    Hyperspace,
    Start,
}

impl Action {
    /// Map a DOM-style key code to an action
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::TurnLeft),
            "ArrowRight" | "KeyD" => Some(Action::TurnRight),
            "ArrowUp" | "KeyW" => Some(Action::Thrust),
            "Space" => Some(Action::Fire),
            "KeyH" | "ShiftLeft" | "ShiftRight" => Some(Action::Hyperspace),
            "Enter" => Some(Action::Start),
            _ => None,
        }
    }

    /// Parse a logical action name ("fire", "turn_left", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "turn_left" | "left" => Some(Action::TurnLeft),
            "turn_right" | "right" => Some(Action::TurnRight),
            "thrust" | "up" => Some(Action::Thrust),
            "fire" | "shoot" => Some(Action::Fire),
            "hyperspace" => Some(Action::Hyperspace),
            "start" => Some(Action::Start),
            _ => None,
        }
    }
}

/// Logical action -> currently held. Anything never set reads as released.
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    held: HashMap<Action, bool>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: Action, held: bool) {
        self.held.insert(action, held);
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.get(&action).copied().unwrap_or(false)
    }

    /// Apply a raw key event; unknown keys are ignored.
    /// Returns whether the key mapped to an action.
    pub fn key_event(&mut self, code: &str, pressed: bool) -> bool {
        match Action::from_key_code(code) {
            Some(action) => {
                self.set(action, pressed);
                true
            }
            None => {
                log::trace!("Ignoring unmapped key {}", code);
                false
            }
        }
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Snapshot the flags for one tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            turn_left: self.is_held(Action::TurnLeft),
            turn_right: self.is_held(Action::TurnRight),
            thrust: self.is_held(Action::Thrust),
            fire: self.is_held(Action::Fire),
            hyperspace: self.is_held(Action::Hyperspace),
            start: self.is_held(Action::Start),
        }
    }
}
