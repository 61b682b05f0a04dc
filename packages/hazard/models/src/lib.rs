#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hazard report types.
//!
//! A hazard report is an ephemeral marker a user drops at their current
//! position. Reports live only as long as the map screen that created them;
//! nothing here is persisted.

use roadwatch_geo_models::Position;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The closed set of hazards a user can report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HazardKind {
    /// A collision or other road accident.
    Accident,
    /// Police presence.
    Police,
    /// Congestion.
    Traffic,
}

impl HazardKind {
    /// Returns the button label shown for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accident => "Accident",
            Self::Police => "Police",
            Self::Traffic => "Traffic",
        }
    }

    /// Returns the marker style used for reports of this kind.
    #[must_use]
    pub const fn marker_style(self) -> MarkerStyle {
        match self {
            Self::Accident => MarkerStyle::ACCIDENT,
            Self::Police => MarkerStyle::POLICE,
            Self::Traffic => MarkerStyle::TRAFFIC,
        }
    }

    /// Returns all variants of this enum, in report-button order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Accident, Self::Police, Self::Traffic]
    }
}

/// Icon and background colour for a hazard marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Icon name from the map's icon set.
    pub icon: &'static str,
    /// Background colour as a `#RRGGBB` hex string.
    pub color: &'static str,
}

impl MarkerStyle {
    /// Red warning triangle.
    pub const ACCIDENT: Self = Self {
        icon: "warning",
        color: "#FF4C4C",
    };
    /// Blue shield.
    pub const POLICE: Self = Self {
        icon: "shield",
        color: "#4C6CFF",
    };
    /// Orange car.
    pub const TRAFFIC: Self = Self {
        icon: "car",
        color: "#FF8C4C",
    };
    /// Used for any kind name outside [`HazardKind`].
    pub const GENERIC: Self = Self {
        icon: "alert-circle",
        color: "#FF8C4C",
    };

    /// Background colour as `(r, g, b)`, or `None` if [`Self::color`] is
    /// not a `#RRGGBB` string.
    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Identifier of a hazard report.
///
/// Derived from the creation time in milliseconds since the Unix epoch,
/// adjusted by [`ReportIdGenerator`] so that it is unique within a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(i64);

impl ReportId {
    /// Returns the underlying millisecond value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing, time-derived [`ReportId`]s.
///
/// If the clock has not advanced since the last id (or went backwards), the
/// next id is `last + 1`.
#[derive(Debug, Default)]
pub struct ReportIdGenerator {
    last: Option<i64>,
}

impl ReportIdGenerator {
    /// Creates a generator that has not issued any ids yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Issues an id based on the current wall clock.
    pub fn next_id(&mut self) -> ReportId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Issues an id for the given clock reading.
    pub fn next_at(&mut self, now_ms: i64) -> ReportId {
        let value = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(value);
        ReportId(value)
    }
}

/// A hazard dropped by the user. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardReport {
    /// Unique identifier within the screen.
    pub id: ReportId,
    /// What was reported.
    pub kind: HazardKind,
    /// Where the reporter was when the report was made.
    pub coordinate: Position,
}

impl HazardReport {
    /// Marker title shown on the map.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Report: {}", self.kind)
    }
}
