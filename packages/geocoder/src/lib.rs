#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Destination geocoding for the roadwatch map.
//!
//! Resolves a free-text search (e.g. "Eiffel Tower") into a single
//! coordinate and display name. The only provider is the public
//! Nominatim / `OpenStreetMap` search API, configured through a TOML file
//! embedded from `services/` (see [`service_registry`]).
//!
//! Consumers depend on the [`Geocoder`] trait so the map screen can be
//! driven by a fake in tests.

pub mod nominatim;
pub mod service_registry;

use async_trait::async_trait;
use thiserror::Error;

/// The best match for a search query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Full display name returned by the provider.
    pub display_name: String,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed, or the body was not valid JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Unexpected HTTP status {status}")]
    Status {
        /// Status code returned by the provider.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// A service that turns free text into a place.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Looks up `query` and returns the first match, if any.
    ///
    /// `Ok(None)` means the provider answered with an empty result set.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request fails or the response cannot
    /// be parsed.
    async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>, GeocodeError>;
}
