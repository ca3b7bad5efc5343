//! TOML Configuration File Support
//!
//! Board settings live in `$XDG_CONFIG_HOME/flapboard/config.toml`
//! (typically `~/.config/flapboard/config.toml`).
//!
//! # Configuration Priority
//!
//! Highest first:
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [board]
//! geometry = "flagship"   # or "note"
//! board_type = "black"    # or "white"
//! size = "md"             # "sm", "md" or "lg"
//!
//! [animation]
//! full_cycle_ms = 5000
//! ```
//!
//! # Environment Variables
//!
//! - `FLAPBOARD_GEOMETRY`
//! - `FLAPBOARD_BOARD_TYPE`
//! - `FLAPBOARD_SIZE`
//! - `FLAPBOARD_FULL_CYCLE_MS`

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineConfig;
use crate::grid::BoardGeometry;
use crate::tile::{BoardType, TileSize};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the effective configuration came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// At least one value from an environment variable
    Env,
    /// Loaded from the TOML file
    File,
    /// Defaults only
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Named board dimensions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryPreset {
    /// 6 × 22
    #[default]
    Flagship,
    /// 3 × 15
    Note,
}

impl GeometryPreset {
    pub fn geometry(self) -> BoardGeometry {
        match self {
            Self::Flagship => BoardGeometry::FLAGSHIP,
            Self::Note => BoardGeometry::NOTE,
        }
    }
}

impl std::str::FromStr for GeometryPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flagship" => Ok(Self::Flagship),
            "note" => Ok(Self::Note),
            other => Err(format!("unknown geometry '{other}' (expected flagship or note)")),
        }
    }
}

/// `[board]` section
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSection {
    pub geometry: GeometryPreset,
    pub board_type: BoardType,
    pub size: TileSize,
}

/// `[animation]` section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSection {
    /// Time for one full wheel rotation in milliseconds
    pub full_cycle_ms: u64,
}

impl Default for AnimationSection {
    fn default() -> Self {
        Self {
            full_cycle_ms: crate::clock::FULL_CYCLE.as_millis() as u64,
        }
    }
}

/// Effective board configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub board: BoardSection,
    pub animation: AnimationSection,

    #[serde(skip)]
    source: ConfigSource,

    #[serde(skip)]
    config_file_path: Option<PathBuf>,
}

impl BoardConfig {
    /// Load from the default path plus environment
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Load from an explicit file plus environment
    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        load_config_from_path(Some(path.into()))
    }

    /// Where the effective values came from
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// File the configuration was read from, if any
    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.full_cycle_ms == 0 {
            return Err(ConfigError::ValidationError(
                "animation.full_cycle_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply overrides from process environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut touched = false;

        if let Some(value) = lookup("FLAPBOARD_GEOMETRY") {
            self.board.geometry = value.parse().map_err(ConfigError::ValidationError)?;
            touched = true;
        }
        if let Some(value) = lookup("FLAPBOARD_BOARD_TYPE") {
            self.board.board_type = value.parse().map_err(ConfigError::ValidationError)?;
            touched = true;
        }
        if let Some(value) = lookup("FLAPBOARD_SIZE") {
            self.board.size = value.parse().map_err(ConfigError::ValidationError)?;
            touched = true;
        }
        if let Some(value) = lookup("FLAPBOARD_FULL_CYCLE_MS") {
            self.animation.full_cycle_ms = value.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "FLAPBOARD_FULL_CYCLE_MS must be a whole number of milliseconds, got '{value}'"
                ))
            })?;
            touched = true;
        }

        if touched {
            self.source = ConfigSource::Env;
        }
        Ok(())
    }

    /// Engine parameters for this configuration
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        self.validate()?;
        Ok(EngineConfig::new(self.board.geometry.geometry())
            .with_full_cycle(Duration::from_millis(self.animation.full_cycle_ms)))
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Default configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("flapboard").join("config.toml"))
}

/// Load configuration from the default path and the environment
pub fn load_config() -> Result<BoardConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the environment.
///
/// A missing file is not an error; defaults are used instead.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::default();

    if let Some(config_path) = path {
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            config = BoardConfig::from_toml_str(&content)?;
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
            config.config_file_path = Some(config_path);
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    config.apply_env()?;
    config.validate()?;

    tracing::debug!(source = %config.source, "Configuration resolved");
    Ok(config)
}
