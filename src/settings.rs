//! Game settings and tuning
//!
//! Loaded from a JSON file named by `MIRROR_TURRET_SETTINGS`; any missing
//! field keeps its default.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable holding the settings file path
pub const SETTINGS_ENV: &str = "MIRROR_TURRET_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spawner seed; random when absent
    pub seed: Option<u64>,
    /// Seconds between block spawns
    pub spawn_interval_secs: f64,
    /// Initial fall speed (clamped to the allowed range)
    pub fall_speed: f32,

    // === Headless runner ===
    /// Frames per simulated second for the stepped clock
    pub frame_rate: f64,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Quit after this many frames
    pub max_frames: Option<u64>,
    /// Log a HUD line every N frames
    pub hud_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            fall_speed: FALL_SPEED,

            frame_rate: FRAME_RATE,
            autopilot: true,
            max_frames: Some(60 * 60 * 2),
            hud_every: 300,
        }
    }
}

/// Why a settings file was rejected
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read settings {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings JSON in {}: {source}", path.display())
            }
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a settings file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    /// Load from the path in `MIRROR_TURRET_SETTINGS`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let path = PathBuf::from(path);
        match Self::load_from(&path) {
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

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.spawn_interval_secs > 0.0) {
            return Err(SettingsError::Invalid {
                field: "spawn_interval_secs",
                reason: format!("must be positive, got {}", self.spawn_interval_secs),
            });
        }
        if !(self.frame_rate > 0.0) {
            return Err(SettingsError::Invalid {
                field: "frame_rate",
                reason: format!("must be positive, got {}", self.frame_rate),
            });
        }
        if !self.fall_speed.is_finite() {
            return Err(SettingsError::Invalid {
                field: "fall_speed",
                reason: "must be a finite number".to_string(),
            });
        }
        Ok(())
    }

    /// Fall speed clamped to the playable range
    pub fn effective_fall_speed(&self) -> f32 {
        self.fall_speed.clamp(FALL_SPEED_MIN, FALL_SPEED_MAX)
    }

    /// Configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
