//! Game settings and preferences
//!
//! Stored as JSON. A missing or broken file is never fatal for the binary; it
//! falls back to defaults and logs why.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::ControlScheme;
use crate::sim::{Arena, MatchConfig, MatchMode};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Match ===
    pub mode: MatchMode,
    /// Display names for the human slots (blank means default)
    pub player_one_name: String,
    pub player_two_name: String,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Let shield-break and AI fire cooldowns keep elapsing during pause
    pub cooldowns_run_while_paused: bool,

    // === Controls ===
    pub controls: [ControlScheme; 2],

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: MatchMode::Duo,
            player_one_name: String::new(),
            player_two_name: String::new(),
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            cooldowns_run_while_paused: false,

            controls: [ControlScheme::player_one(), ControlScheme::player_two()],

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject arenas that cannot hold the spawn layout; clamp volumes
    pub fn validate(&mut self) -> Result<(), SettingsError> {
        let min_width = SPAWN_X[2] + COMBATANT_SIZE;
        if self.arena_width.is_nan() || self.arena_width < min_width {
            return Err(SettingsError::Invalid(format!(
                "arena_width {} is below the minimum of {}",
                self.arena_width, min_width
            )));
        }
        if self.arena_height.is_nan() || self.arena_height < COMBATANT_SIZE {
            return Err(SettingsError::Invalid(format!(
                "arena_height {} is below the minimum of {}",
                self.arena_height, COMBATANT_SIZE
            )));
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Match setup derived from these settings
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            cooldowns_run_while_paused: self.cooldowns_run_while_paused,
            ..MatchConfig::new(self.mode, &self.player_one_name, &self.player_two_name, self.arena())
        }
    }
}
