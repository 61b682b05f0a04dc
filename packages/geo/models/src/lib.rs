#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic primitives shared across the roadwatch workspace.
//!
//! All coordinates are WGS84 degrees. A [`Region`] describes a map viewport
//! the same way the map widget does: a center point plus the span of
//! latitude/longitude visible on screen.

use serde::{Deserialize, Serialize};

/// A point on the map in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// A map viewport: center point plus visible span in each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Latitude of the viewport center.
    pub latitude: f64,
    /// Longitude of the viewport center.
    pub longitude: f64,
    /// Visible latitude span in degrees.
    pub latitude_delta: f64,
    /// Visible longitude span in degrees.
    pub longitude_delta: f64,
}

impl Region {
    /// Creates a region centered on `center` with the given spans.
    #[must_use]
    pub const fn around(center: Position, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta,
            longitude_delta,
        }
    }

    /// Returns the center of this region.
    #[must_use]
    pub const fn center(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

/// A place the user searched for.
///
/// At most one destination is active at a time; a new successful search
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Human-readable name returned by the geocoder.
    pub name: String,
}

impl Destination {
    /// Returns the destination's coordinate.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}
