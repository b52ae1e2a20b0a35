//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! is a valid configuration. Binaries layer CLI overrides on top and call
//! [`Config::validate`] before use.

use std::{
    f32::consts::PI,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{mapfile::LevelLimits, renderer::Palette};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("bad config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/*──────────────────────────── sections ─────────────────────────────*/

/// Internal frame-buffer size in pixels.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 384,
            height: 216,
        }
    }
}

/// Projection parameters.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub hfov_deg: f32,
    /// vertical scale factor, multiplied by the screen height
    pub vfov: f32,
    pub near: f32,
    pub far: f32,
    /// above the floor of the camera's sector
    pub eye_height: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            hfov_deg: 90.0,
            vfov: 0.5,
            near: 0.0001,
            far: 128.0,
            eye_height: 1.65,
        }
    }
}

impl ViewConfig {
    /// Horizontal field of view in radians.
    #[inline]
    pub fn hfov(&self) -> f32 {
        self.hfov_deg.to_radians()
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CapacityConfig {
    pub render_worklist: usize,
    pub locate_worklist: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            render_worklist: 64,
            locate_worklist: 64,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    /// world units per second
    pub move_speed: f32,
    /// radians per second
    pub turn_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            turn_speed: PI,
        }
    }
}

/*──────────────────────────── aggregate ────────────────────────────*/

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub view: ViewConfig,
    pub limits: LevelLimits,
    pub capacity: CapacityConfig,
    pub movement: MovementConfig,
    pub palette: Palette,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse without validating.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let ScreenConfig { width, height } = self.screen;
        if width == 0 || height == 0 {
            return invalid(format!("screen size {width}x{height} has a zero side"));
        }

        let v = &self.view;
        if !(v.hfov_deg > 0.0 && v.hfov_deg < 180.0) {
            return invalid(format!("hfov_deg {} not in (0, 180)", v.hfov_deg));
        }
        if !(v.vfov > 0.0) {
            return invalid(format!("vfov {} must be positive", v.vfov));
        }
        if !(v.near > 0.0 && v.near < v.far) {
            return invalid(format!("need 0 < near ({}) < far ({})", v.near, v.far));
        }
        if !v.eye_height.is_finite() {
            return invalid("eye_height must be finite".into());
        }

        if self.limits.max_sectors == 0 || self.limits.max_walls_per_sector < 3 {
            return invalid(format!(
                "limits too small: {} sectors, {} walls per sector",
                self.limits.max_sectors, self.limits.max_walls_per_sector
            ));
        }
        if self.capacity.render_worklist == 0 || self.capacity.locate_worklist == 0 {
            return invalid("worklist capacities must be at least 1".into());
        }

        let m = &self.movement;
        if !(m.move_speed >= 0.0 && m.turn_speed >= 0.0) {
            return invalid("movement speeds must be non-negative".into());
        }
        Ok(())
    }
}
