//! Persisted drawing parameters
//!
//! JSON document (`config.json`) holding the circle radius, step count,
//! per-step delay and the two trigger keys. Loaded once at startup by the
//! listener; the settings window works on its own independently loaded copy
//! and writes back to disk, never to the live store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::constants::{defaults, validation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Circle radius in pixels
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Number of points sampled along the circle
    #[serde(default = "default_steps")]
    pub steps: u32,

    /// Pause between steps in seconds (0 = as fast as the device allows)
    #[serde(default = "default_draw_speed")]
    pub draw_speed: f64,

    /// Key that triggers a stroke
    #[serde(default = "default_start_key")]
    pub start_key: String,

    /// Key that terminates the listener
    #[serde(default = "default_exit_key")]
    pub exit_key: String,
}

fn default_radius() -> u32 {
    defaults::RADIUS
}

fn default_steps() -> u32 {
    defaults::STEPS
}

fn default_draw_speed() -> f64 {
    defaults::DRAW_SPEED
}

fn default_start_key() -> String {
    defaults::START_KEY.to_string()
}

fn default_exit_key() -> String {
    defaults::EXIT_KEY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            steps: default_steps(),
            draw_speed: default_draw_speed(),
            start_key: default_start_key(),
            exit_key: default_exit_key(),
        }
    }
}

impl Settings {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load settings from the config file.
    ///
    /// A missing file is created with defaults. An unparsable file falls
    /// back to defaults without overwriting it, so the user can fix it.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.validate_and_clamp();
                    settings
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    error!(path = %path.display(), "The file has been preserved - fix the JSON syntax to keep your settings.");
                    Settings::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "No config file found, creating with defaults");
                let settings = Settings::default();
                if let Err(e) = settings.save_to(path) {
                    error!(error = ?e, "Failed to write default config");
                }
                settings
            }
        }
    }

    /// Persist to the config file as pretty-printed JSON
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        fs::write(path, contents)
            .context(format!("Failed to write config file to {}", path.display()))?;
        Ok(())
    }

    /// Clamp values to safe ranges, warning about anything out of range
    fn validate_and_clamp(&mut self) {
        use validation::*;

        if self.radius < MIN_RADIUS {
            warn!(radius = self.radius, min = MIN_RADIUS, "radius below minimum, clamping");
            self.radius = MIN_RADIUS;
        } else if self.radius > MAX_RADIUS {
            warn!(radius = self.radius, max = MAX_RADIUS, "radius exceeds maximum, clamping");
            self.radius = MAX_RADIUS;
        }

        if self.steps < MIN_STEPS {
            warn!(steps = self.steps, min = MIN_STEPS, "steps below minimum, clamping");
            self.steps = MIN_STEPS;
        } else if self.steps > MAX_STEPS {
            warn!(steps = self.steps, max = MAX_STEPS, "steps exceeds maximum, clamping");
            self.steps = MAX_STEPS;
        }

        if !self.draw_speed.is_finite() || self.draw_speed < 0.0 {
            warn!(draw_speed = self.draw_speed, "draw_speed invalid, using 0");
            self.draw_speed = 0.0;
        } else if self.draw_speed > MAX_DRAW_SPEED {
            warn!(draw_speed = self.draw_speed, max = MAX_DRAW_SPEED, "draw_speed exceeds maximum, clamping");
            self.draw_speed = MAX_DRAW_SPEED;
        }
    }

    /// Per-step delay as a Duration (zero when draw_speed is 0)
    pub fn draw_delay(&self) -> Duration {
        Duration::from_secs_f64(self.draw_speed.max(0.0))
    }
}
