//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, ConfigError, RendererConfig, TextureSource};
use crate::rasterizer::SamplePolicy;

#[derive(Parser, Debug, Clone)]
#[command(name = "mode7")]
#[command(about = "Mode7-style perspective ground plane renderer", long_about = None)]
pub struct Cli {
    /// RON config file (built-in defaults otherwise)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Image to use as the ground texture instead of the configured one
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Tile the texture past its edges
    #[arg(long, conflicts_with = "clamp")]
    pub wrap: bool,

    /// Show the background color past the texture edges
    #[arg(long)]
    pub clamp: bool,

    /// Write the effective config as RON to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,

    /// Render one frame without a window, save it as PNG and exit
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<RendererConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                load_config(path)?
            }
            None => RendererConfig::default(),
        };

        if let Some(path) = &self.texture {
            config.texture = TextureSource::Image { path: path.clone() };
        }
        if self.wrap {
            config.sample_policy = Some(SamplePolicy::Wrap);
        }
        if self.clamp {
            config.sample_policy = Some(SamplePolicy::Clamp);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["mode7"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config, RendererConfig::default());
    }

    #[test]
    fn test_texture_override_clamps() {
        let cli = Cli::parse_from(["mode7", "--texture", "map.png"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.texture, TextureSource::Image { path: PathBuf::from("map.png") });
        assert_eq!(config.sample_policy(), SamplePolicy::Clamp);
    }

    #[test]
    fn test_policy_flags() {
        let cli = Cli::parse_from(["mode7", "--texture", "map.png", "--wrap"]);
        assert_eq!(cli.resolve_config().unwrap().sample_policy(), SamplePolicy::Wrap);

        let cli = Cli::parse_from(["mode7", "--clamp"]);
        assert_eq!(cli.resolve_config().unwrap().sample_policy(), SamplePolicy::Clamp);

        assert!(Cli::try_parse_from(["mode7", "--wrap", "--clamp"]).is_err());
    }

    #[test]
    fn test_config_file_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.ron");
        std::fs::write(&path, "(screen_width: 320, screen_height: 200)").unwrap();

        let cli = Cli::parse_from([
            "mode7",
            "--config",
            path.to_str().unwrap(),
            "--clamp",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.screen_width, 320);
        assert_eq!(config.sample_policy(), SamplePolicy::Clamp);
    }
}
