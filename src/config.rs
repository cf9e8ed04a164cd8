use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Host window settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial window width in physical pixels.
    pub width: u32,
    /// Initial window height in physical pixels.
    pub height: u32,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    /// 1280 × 720, windowed.
    fn default() -> Self {
        Self {
            title:      "tilewalk".into(),
            width:      1280,
            height:     720,
            fullscreen: false,
        }
    }
}

// ── CameraConfig ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Scale on startup.
    pub initial_scale: f32,
    /// Fractional scale change per wheel notch.
    pub zoom_step: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_scale: 2.0,
            zoom_step:     0.1,
            min_scale:     0.25,
            max_scale:     8.0,
        }
    }
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Everything tunable about the simulation. Missing JSON fields keep their
/// defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one cell in world pixels.
    pub tile_size: f32,
    /// Path-following speed in world pixels per second.
    pub walk_speed: f32,
    /// Whether keyboard steps may enter cells the map never wrote.
    pub allow_void_steps: bool,
    /// Pointer travel (screen pixels) below which a press/release is a click.
    pub click_slop: f32,
    /// Draw blocking items half-transparent.
    pub highlight_blocking: bool,
    pub camera: CameraConfig,
    pub window: WindowConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size:          crate::DEFAULT_TILE_SIZE,
            walk_speed:         128.0,
            allow_void_steps:   true,
            click_slop:         4.0,
            highlight_blocking: false,
            camera:             CameraConfig::default(),
            window:             WindowConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size > 0.0) {
            return Err(ConfigError::Invalid("tile_size must be positive"));
        }
        if !(self.walk_speed > 0.0) {
            return Err(ConfigError::Invalid("walk_speed must be positive"));
        }
        if !(self.click_slop >= 0.0) {
            return Err(ConfigError::Invalid("click_slop must not be negative"));
        }
        if !(self.camera.zoom_step > 0.0 && self.camera.zoom_step < 1.0) {
            return Err(ConfigError::Invalid("camera zoom_step must lie in (0, 1)"));
        }
        if !(self.camera.min_scale > 0.0) || self.camera.min_scale > self.camera.max_scale {
            return Err(ConfigError::Invalid("camera scale limits must satisfy 0 < min_scale <= max_scale"));
        }
        Ok(())
    }
}
