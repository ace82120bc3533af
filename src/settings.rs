//! Run configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_WORLD_SIZE;
use crate::sim::{Density, WorldConfig};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side of the square world
    pub world_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Run seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
    pub player_name: String,

    // === Population ===
    /// One food per this many units of world side
    pub food_area_unit: f32,
    /// One enemy per this many units of world side
    pub enemy_area_unit: f32,
    pub black_hole_count: usize,
    pub wormhole_pairs: usize,
    /// Leaderboard filler rows
    pub cosmetic_opponents: usize,

    // === Headless runner ===
    /// Stop after this many frames (runs until death when absent)
    pub max_frames: Option<u64>,
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_size: DEFAULT_WORLD_SIZE,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            seed: None,
            player_name: "Player".to_string(),

            food_area_unit: 40.0,
            enemy_area_unit: 400.0,
            black_hole_count: 2,
            wormhole_pairs: 1,
            cosmetic_opponents: 8,

            max_frames: None,
            target_fps: 60,
        }
    }
}

impl Settings {
    /// Read and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `path` if given and loadable, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |value: f32, field: &'static str| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        };
        positive(self.world_size, "world_size")?;
        positive(self.viewport_width, "viewport_width")?;
        positive(self.viewport_height, "viewport_height")?;
        positive(self.food_area_unit, "food_area_unit")?;
        positive(self.enemy_area_unit, "enemy_area_unit")?;
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid {
                field: "target_fps",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// World construction parameters
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            world_size: self.world_size,
            viewport: (self.viewport_width, self.viewport_height),
            density: Density {
                food_area_unit: self.food_area_unit,
                enemy_area_unit: self.enemy_area_unit,
            },
            black_holes: self.black_hole_count,
            wormhole_pairs: self.wormhole_pairs,
            player_name: self.player_name.clone(),
        }
    }

    /// Milliseconds per frame at the target rate
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }
}
