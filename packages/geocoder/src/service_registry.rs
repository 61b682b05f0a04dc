//! Geocoding service configuration.
//!
//! The default provider is defined in `services/nominatim.toml` and embedded
//! at compile time. Callers may also parse an override from their own TOML.

use serde::Deserialize;

/// A geocoding service configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeocodingService {
    /// Unique identifier (e.g., `"nominatim"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search endpoint (e.g., `"https://nominatim.openstreetmap.org/search"`).
    pub base_url: String,
    /// Value sent in the `User-Agent` header. The public Nominatim instance
    /// rejects anonymous clients.
    pub user_agent: String,
    /// Response format requested from the provider.
    #[serde(default = "default_format")]
    pub format: String,
    /// Maximum number of results requested.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_format() -> String {
    "json".to_string()
}

const fn default_limit() -> u32 {
    1
}

const NOMINATIM_TOML: &str = include_str!("../services/nominatim.toml");

/// Parses a service definition from a TOML string.
///
/// # Errors
///
/// Returns a [`toml::de::Error`] if the TOML is malformed or missing
/// required fields.
pub fn parse_service(toml_str: &str) -> Result<GeocodingService, toml::de::Error> {
    toml::de::from_str(toml_str)
}

/// Returns the embedded default Nominatim service.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time guarantee
/// since the config is embedded).
#[must_use]
pub fn default_service() -> GeocodingService {
    parse_service(NOMINATIM_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded geocoding service: {e}"))
}
