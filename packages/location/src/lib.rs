#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Device location abstraction.
//!
//! The map screen needs exactly two things from the platform: a foreground
//! permission prompt and a single current-position fix. Platform bindings
//! implement [`LocationProvider`]; [`StaticLocationProvider`] serves the CLI
//! and tests.

use async_trait::async_trait;
use roadwatch_geo_models::Position;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Outcome of a foreground location permission request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PermissionStatus {
    /// The user allowed foreground location access.
    Granted,
    /// The user refused, or the platform does not allow asking.
    Denied,
}

impl PermissionStatus {
    /// Whether location may be read.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Errors from reading the device position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    /// Position was requested without permission.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The platform could not produce a fix.
    #[error("Location unavailable: {message}")]
    Unavailable {
        /// Platform-provided reason.
        message: String,
    },
}

/// Source of the device's position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Prompts for foreground location permission.
    async fn request_permission(&self) -> PermissionStatus;

    /// Reads one current position fix.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] if no fix can be obtained.
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// A provider with a fixed answer, for terminals and tests.
#[derive(Debug, Clone)]
pub struct StaticLocationProvider {
    permission: PermissionStatus,
    position: Option<Position>,
}

impl StaticLocationProvider {
    /// Permission granted, always at `position`.
    #[must_use]
    pub const fn granted(position: Position) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Some(position),
        }
    }

    /// Permission refused.
    #[must_use]
    pub const fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            position: None,
        }
    }

    /// Permission granted but no fix ever arrives.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: None,
        }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        log::debug!("Static location permission: {}", self.permission);
        self.permission
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        if !self.permission.is_granted() {
            return Err(LocationError::PermissionDenied);
        }
        self.position.ok_or_else(|| LocationError::Unavailable {
            message: "no fix configured".to_string(),
        })
    }
}
