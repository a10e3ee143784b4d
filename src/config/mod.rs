//! Configuration structures and loading logic.

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use typecase_core::FontOptions;

use crate::logging;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub atlas: AtlasConfig,
    pub log: LogConfig,
}

/// Font configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font file to load. The CLI requires one, here or via `--font`.
    pub path: Option<PathBuf>,
    /// Nominal size in pixels.
    pub size: u32,
    /// Multiplier on every glyph and space advance.
    pub letter_spacing: f32,
}

/// Atlas configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Explicit atlas edge in pixels, rounded up to a power of two.
    /// Unset derives the edge from the line height.
    pub size: Option<u32>,
}

/// Log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `off`, `error`, `warn`, `info`, `debug`, or `trace`.
    pub level: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        let options = FontOptions::default();
        Self {
            path: None,
            size: options.pixel_size,
            letter_spacing: options.letter_spacing,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

impl LogConfig {
    /// Parsed level; unknown names fall back to `Warn`.
    pub fn level_filter(&self) -> LevelFilter {
        logging::parse_level(&self.level)
    }
}

/// Return the platform-specific configuration directory for `typecase`.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("typecase");
        }
        PathBuf::from(".").join("typecase")
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("typecase");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("typecase");
        }
        PathBuf::from(".").join("typecase")
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Load config from the default path. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = config_path();
        match Self::try_load_from(&path) {
            Ok(cfg) => {
                log::info!("config: loaded from {}", path.display());
                cfg
            }
            Err(ConfigLoadError::Missing) => Self::default(),
            Err(ConfigLoadError::Invalid(e)) => {
                log::warn!("config: {e}");
                Self::default()
            }
        }
    }

    /// Try to load config from the default path, returning an error message
    /// on failure. Unlike `load()`, a missing file is an error too.
    pub fn try_load() -> Result<Self, String> {
        let path = config_path();
        Self::try_load_from(&path).map_err(|e| match e {
            ConfigLoadError::Missing => format!("failed to read {}: not found", path.display()),
            ConfigLoadError::Invalid(msg) => msg,
        })
    }

    fn try_load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigLoadError::Missing
            } else {
                ConfigLoadError::Invalid(format!("failed to read {}: {e}", path.display()))
            }
        })?;
        Self::parse(&data).map_err(|e| {
            ConfigLoadError::Invalid(format!("parse error in {}: {e}", path.display()))
        })
    }

    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// Map the config onto core font options.
    pub fn font_options(&self) -> FontOptions {
        FontOptions {
            pixel_size: self.font.size,
            letter_spacing: self.font.letter_spacing,
            atlas_size: self.atlas.size,
        }
    }
}

enum ConfigLoadError {
    Missing,
    Invalid(String),
}

#[cfg(test)]
mod tests;
