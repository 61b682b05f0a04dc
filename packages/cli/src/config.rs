//! Optional TOML configuration for the terminal client.
//!
//! ```toml
//! [screen]
//! search_animation_ms = 500
//! stale_responses = "discard_stale"
//!
//! [geocoder]
//! id = "local"
//! name = "Local Nominatim"
//! base_url = "http://localhost:8088/search"
//! user_agent = "RoadWatch/1.0"
//! ```
//!
//! Both tables are optional; anything omitted keeps its built-in default.

use std::path::{Path, PathBuf};

use roadwatch_geocoder::service_registry::{GeocodingService, default_service};
use roadwatch_screen::ScreenConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parsed client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Screen tunables.
    pub screen: ScreenConfig,
    /// Geocoding provider override.
    pub geocoder: Option<GeocodingService>,
}

impl CliConfig {
    /// The configured geocoding service, or the embedded Nominatim default.
    #[must_use]
    pub fn geocoding_service(&self) -> GeocodingService {
        self.geocoder.clone().unwrap_or_else(default_service)
    }
}

/// Parses a config from a TOML string.
///
/// # Errors
///
/// Returns [`ConfigError::Toml`] if the TOML is malformed.
pub fn parse(toml_str: &str) -> Result<CliConfig, ConfigError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Loads the config at `path`, or the defaults when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };

    log::debug!("Loading config from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents)
}
