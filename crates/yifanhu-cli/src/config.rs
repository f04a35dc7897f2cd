//! Configuration for the CLI
//!
//! This module defines the [`AppConfig`] read from TOML and handles finding
//! the configuration file in various locations (explicit path, local
//! directory, system directory).
//!
//! # Example
//!
//! ```toml
//! [layout]
//! K = 1.5
//! iterations = 300
//! update_mode = "gauss_seidel"
//! seed = 42
//!
//! [output]
//! dimensions = 3
//! precision = 4
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use yifanhu::LayoutOptions;

use crate::error::CliError;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration combining layout options and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Options passed to the layout engine.
    #[serde(default)]
    layout: LayoutOptions,

    /// Output file settings.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(layout: LayoutOptions, output: OutputConfig) -> Self {
        Self { layout, output }
    }

    /// Returns the layout options.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the seed used for random start positions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.layout = self.layout.with_seed(seed);
        self
    }

    /// Replaces the number of output dimensions.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.output.dimensions = dimensions;
        self
    }
}

/// Settings for the written positions file.
///
/// | field        | default | meaning                              |
/// |--------------|---------|--------------------------------------|
/// | `dimensions` | `2`     | number of coordinates per node (2, 3)|
/// | `precision`  | `6`     | decimal places per coordinate        |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    dimensions: usize,
    precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dimensions: 2,
            precision: 6,
        }
    }
}

impl OutputConfig {
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (yifanhu/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("yifanhu/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "yifanhu", "yifanhu") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}
