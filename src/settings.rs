//! Game settings
//!
//! Arena size, grid depth and launch tuning. Loaded from an optional JSON
//! file; anything missing or unreadable falls back to defaults.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Smallest arena the layout rules still produce a playable grid for
pub const MIN_ARENA_WIDTH: f32 = 200.0;
pub const MIN_ARENA_HEIGHT: f32 = 400.0;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in world units
    pub arena_width: f32,
    /// Arena height in world units
    pub arena_height: f32,
    /// Number of brick rows
    pub brick_rows: u32,
    /// Multiplier applied to the (3, 5) launch impulse
    pub launch_scale: f32,
    /// Where the file store keeps the score record
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            brick_rows: DEFAULT_BRICK_ROWS,
            launch_scale: DEFAULT_LAUNCH_SCALE,
            save_path: PathBuf::from("breakout_save.json"),
        }
    }
}

impl Settings {
    /// Initial ball velocity
    pub fn launch_velocity(&self) -> Vec2 {
        Vec2::new(LAUNCH_IMPULSE.0, LAUNCH_IMPULSE.1) * self.launch_scale
    }

    /// Most rows that fit between the top edge and the ball's start
    pub fn max_brick_rows(&self) -> u32 {
        let room = self.arena_height / 2.0 - BRICK_EDGE_MARGIN - BRICK_HEIGHT - BALL_RADIUS;
        ((room / BRICK_ROW_SPACING).floor() as u32).max(1)
    }

    /// Clamp values into a range that still yields a non-empty grid and a
    /// moving ball
    pub fn sanitized(mut self) -> Self {
        if !self.arena_width.is_finite() || self.arena_width < MIN_ARENA_WIDTH {
            log::warn!("arena_width {} too small, using {}", self.arena_width, MIN_ARENA_WIDTH);
            self.arena_width = MIN_ARENA_WIDTH;
        }
        if !self.arena_height.is_finite() || self.arena_height < MIN_ARENA_HEIGHT {
            log::warn!("arena_height {} too small, using {}", self.arena_height, MIN_ARENA_HEIGHT);
            self.arena_height = MIN_ARENA_HEIGHT;
        }
        let max_rows = self.max_brick_rows();
        if self.brick_rows == 0 || self.brick_rows > max_rows {
            let rows = self.brick_rows.clamp(1, max_rows);
            log::warn!("brick_rows {} out of range, using {}", self.brick_rows, rows);
            self.brick_rows = rows;
        }
        if !self.launch_scale.is_finite() || self.launch_scale <= 0.0 {
            log::warn!("launch_scale {} invalid, using default", self.launch_scale);
            self.launch_scale = DEFAULT_LAUNCH_SCALE;
        }
        self
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_launch_velocity() {
        assert_eq!(Settings::default().launch_velocity(), Vec2::new(180.0, 300.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "brick_rows": 2 }"#).unwrap();
        assert_eq!(settings.brick_rows, 2);
        assert_eq!(settings.arena_width, DEFAULT_ARENA_WIDTH);
        assert_eq!(settings.launch_scale, DEFAULT_LAUNCH_SCALE);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ brick_rows: ").is_err());
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = Settings {
            arena_width: 10.0,
            arena_height: f32::NAN,
            brick_rows: 0,
            launch_scale: -1.0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.arena_width, MIN_ARENA_WIDTH);
        assert_eq!(settings.arena_height, MIN_ARENA_HEIGHT);
        assert_eq!(settings.brick_rows, 1);
        assert_eq!(settings.launch_scale, DEFAULT_LAUNCH_SCALE);
    }

    #[test]
    fn test_too_many_rows_clamped() {
        let settings = Settings {
            arena_height: 400.0,
            brick_rows: 50,
            ..Settings::default()
        }
        .sanitized();
        // (200 - 30 - 20 - 10) / 30 -> 4
        assert_eq!(settings.brick_rows, 4);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/breakout/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
