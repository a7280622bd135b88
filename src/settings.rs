//! Game settings and preferences
//!
//! Persisted as JSON next to the binary, separately from any match state
//! (matches are transient and never saved).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MOVE_SPEED;

/// Slider bounds for movement speed
pub const SPEED_MIN: f32 = 1.0;
pub const SPEED_MAX: f32 = 10.0;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Horizontal speed applied to both fighters (pixels/tick)
    pub movement_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            movement_speed: DEFAULT_MOVE_SPEED,
        }
    }
}

impl Settings {
    /// Settings file name
    const FILE_NAME: &'static str = "stick_duel_settings.json";

    /// Movement speed clamped to the slider range
    pub fn effective_speed(&self) -> f32 {
        self.movement_speed.clamp(SPEED_MIN, SPEED_MAX)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt settings file: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to the default location
    pub fn save(&self) {
        self.save_to(Path::new(Self::FILE_NAME));
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Failed to save settings: {}", e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}
