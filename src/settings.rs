//! Runtime settings
//!
//! Loaded once at startup from an optional JSON file. Missing fields take
//! their defaults; an unreadable file falls back to defaults entirely.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, MAX_STEP_SECONDS, MIN_ARENA_EXTENT, SIM_DT};
use crate::sim::Arena;

/// Why a settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file unreadable: {0}")]
    Read(#[from] io::Error),
    #[error("settings file is invalid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in world units
    pub arena_width: f32,
    /// Arena height in world units
    pub arena_height: f32,
    /// Seconds per simulation step
    pub step_seconds: f32,
    /// Where the high score is kept
    pub high_score_path: PathBuf,
    /// Steps the headless runner plays before exiting
    pub demo_ticks: u32,
    /// RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            step_seconds: SIM_DT,
            high_score_path: PathBuf::from("rock_drift_highscore.json"),
            demo_ticks: 60 * 60,
            seed: None,
        }
    }
}

impl Settings {
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Parse settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Could not load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace arena extents too small for spawn clearance with defaults,
    /// and keep the timestep in (0, MAX_STEP_SECONDS]
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.arena_width.is_finite() && self.arena_width > MIN_ARENA_EXTENT) {
            log::warn!("Arena width {} too small, using {}", self.arena_width, defaults.arena_width);
            self.arena_width = defaults.arena_width;
        }
        if !(self.arena_height.is_finite() && self.arena_height > MIN_ARENA_EXTENT) {
            log::warn!("Arena height {} too small, using {}", self.arena_height, defaults.arena_height);
            self.arena_height = defaults.arena_height;
        }
        if !(self.step_seconds > 0.0) {
            self.step_seconds = defaults.step_seconds;
        } else if self.step_seconds > MAX_STEP_SECONDS {
            log::warn!("Step of {}s capped at {}s", self.step_seconds, MAX_STEP_SECONDS);
            self.step_seconds = MAX_STEP_SECONDS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "arena_width": 1024.0 }"#).unwrap();
        assert_eq!(settings.arena_width, 1024.0);
        assert_eq!(settings.arena_height, ARENA_HEIGHT);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_bad_dimensions_are_replaced() {
        let settings: Settings =
            serde_json::from_str(r#"{ "arena_width": -5.0, "step_seconds": 0.0 }"#).unwrap();
        let settings = settings.sanitized();
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert_eq!(settings.step_seconds, SIM_DT);
    }

    #[test]
    fn test_out_of_range_values_are_bounded() {
        let settings: Settings = serde_json::from_str(
            r#"{ "arena_width": 100.0, "arena_height": 200.0, "step_seconds": 5.0 }"#,
        )
        .unwrap();
        let settings = settings.sanitized();
        assert_eq!(settings.arena(), Arena::default());
        assert_eq!(settings.step_seconds, MAX_STEP_SECONDS);

        let roomy: Settings =
            serde_json::from_str(r#"{ "arena_width": 1280.0, "arena_height": 720.0 }"#).unwrap();
        let roomy = roomy.sanitized();
        assert_eq!(roomy.arena_width, 1280.0);
        assert_eq!(roomy.arena_height, 720.0);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let path = std::env::temp_dir().join(format!("rock_drift_settings_{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let result = Settings::from_file(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Some(Path::new("/nonexistent/rock_drift.json")));
        assert_eq!(settings.arena(), Arena::default());
    }
}
