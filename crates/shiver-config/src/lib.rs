//! Configuration for the shiver terminal app.
//!
//! The config lives in `config.toml` under the platform config directory
//! (e.g. `~/.config/shiver`), or wherever `SHIVER_CONFIG` points.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shiver_core::{BoneSpec, Dimension, FlexDirection, SkeletonOptions};
use thiserror::Error;
use tracing::info;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "SHIVER_CONFIG";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve the platform config directory")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interval between frames.
    pub tick_ms: u64,
    /// How long the demo pretends to load before showing content.
    pub simulated_load_ms: u64,
    /// Use the explicit bone layout instead of mirroring the content.
    pub use_layout: bool,
    /// Skeleton options.
    pub skeleton: SkeletonOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 33,
            simulated_load_ms: 2500,
            use_layout: true,
            skeleton: SkeletonOptions {
                layout: default_layout(),
                ..SkeletonOptions::default()
            },
        }
    }
}

/// A profile card: avatar and name side by side, then a few text lines.
pub fn default_layout() -> Vec<BoneSpec> {
    let name = vec![BoneSpec::sized(24.0, 2.0).with_radius(1.0), text_line(16.0)];
    let avatar = BoneSpec::sized(10.0, 5.0)
        .with_key("avatar")
        .with_radius(2.0);
    let title = BoneSpec::sized(0.0, 0.0)
        .with_gap(1.0)
        .with_children(FlexDirection::Column, name);
    let header = BoneSpec::sized(0.0, 0.0)
        .with_key("header")
        .with_gap(2.0)
        .with_children(FlexDirection::Row, vec![avatar, title])
        .with_margin(1.0);
    let divider = BoneSpec::new(Dimension::Fill, Dimension::Fixed(1.0))
        .with_key("divider")
        .with_radius(0.0);

    vec![
        header,
        divider,
        text_line(40.0).with_margin(1.0),
        text_line(36.0),
        text_line(28.0).with_margin(1.0),
    ]
}

/// A square-cornered bone one row high.
fn text_line(width: f32) -> BoneSpec {
    BoneSpec::sized(width, 1.0).with_radius(0.0)
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("dev", "shiver", "shiver")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Write to the default location, returning the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }
}
