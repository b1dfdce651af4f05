//! Game settings and tuning
//!
//! Read from an optional JSON file; any field left out keeps its default.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// When touching a checkpoint advances the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Once per touch: the player must stop overlapping checkpoints before
    /// another advance can fire
    #[default]
    Edge,
    /// Every overlapped checkpoint advances, on every frame it is overlapped
    Level,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerMode::Edge => "edge",
            TriggerMode::Level => "level",
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// World/window width in pixels; level bitmaps are stretched to fit
    pub window_width: f32,
    /// World/window height in pixels
    pub window_height: f32,

    // === Physics (per frame) ===
    pub player_speed: f32,
    pub gravity: f32,
    pub jump_force: f32,

    // === Rules ===
    pub checkpoint_trigger: TriggerMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            player_speed: PLAYER_SPEED,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,

            checkpoint_trigger: TriggerMode::default(),
        }
    }
}

impl Settings {
    /// World size as a vector
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Reject values that would give degenerate world geometry or NaN physics
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                });
            }
        }
        for (field, value) in [
            ("player_speed", self.player_speed),
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a finite number",
                });
            }
        }
        Ok(())
    }

    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;

        log::info!(
            "Loaded settings from {} ({}x{}, checkpoints trigger on {})",
            path.display(),
            settings.window_width,
            settings.window_height,
            settings.checkpoint_trigger.as_str()
        );
        Ok(settings)
    }
}
