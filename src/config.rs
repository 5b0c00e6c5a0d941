//! Renderer configuration loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.
//! Every field has a default, so a config file only needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::rasterizer::{Color, GridPattern, SamplePolicy, HEIGHT, WIDTH};
use crate::world::{CameraConfig, ControlSteps};

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Where the ground texture comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextureSource {
    /// Procedural line grid
    Grid(GridPattern),
    /// Decoded from an image file at startup
    Image { path: PathBuf },
}

impl TextureSource {
    /// Grids tile forever, images end at their edges
    pub fn default_policy(&self) -> SamplePolicy {
        match self {
            TextureSource::Grid(_) => SamplePolicy::Wrap,
            TextureSource::Image { .. } => SamplePolicy::Clamp,
        }
    }
}

impl Default for TextureSource {
    fn default() -> Self {
        TextureSource::Grid(GridPattern::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Framebuffer size in pixels
    pub screen_width: usize,
    pub screen_height: usize,
    /// Window size multiplier
    pub window_scale: usize,
    pub texture: TextureSource,
    /// `None` picks the texture source's default policy
    pub sample_policy: Option<SamplePolicy>,
    /// Fill for the upper half of the screen
    pub sky_color: Color,
    pub camera: CameraConfig,
    pub controls: ControlSteps,
    pub show_overlay: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            screen_width: WIDTH,
            screen_height: HEIGHT,
            window_scale: 1,
            texture: TextureSource::default(),
            sample_policy: None,
            sky_color: Color::BLACK,
            camera: CameraConfig::default(),
            controls: ControlSteps::default(),
            show_overlay: true,
        }
    }
}

impl RendererConfig {
    pub fn sample_policy(&self) -> SamplePolicy {
        self.sample_policy.unwrap_or_else(|| self.texture.default_policy())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = u16::MAX as usize;
        if self.screen_width == 0 || self.screen_width > max {
            return Err(ConfigError::Invalid(format!(
                "screen_width must be in 1..={} (got {})",
                max, self.screen_width
            )));
        }
        if self.screen_height < 2 || self.screen_height > max {
            return Err(ConfigError::Invalid(format!(
                "screen_height must be in 2..={} (got {})",
                max, self.screen_height
            )));
        }
        // Sky and ground each take exactly half the screen
        if self.screen_height % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "screen_height must be even (got {})",
                self.screen_height
            )));
        }
        if self.window_scale == 0 {
            return Err(ConfigError::Invalid("window_scale must be at least 1".to_string()));
        }
        if let TextureSource::Grid(grid) = &self.texture {
            if grid.size == 0 || grid.spacing == 0 {
                return Err(ConfigError::Invalid(
                    "grid size and spacing must be non-zero".to_string(),
                ));
            }
        }
        self.camera.validate().map_err(ConfigError::Invalid)?;
        self.controls.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RendererConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<RendererConfig, ConfigError> {
    let config: RendererConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RendererConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
