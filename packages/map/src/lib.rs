#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map renderer abstraction.
//!
//! Tile rendering, the live user-location dot and gesture handling belong to
//! the platform map widget. The screen only talks to it through
//! [`MapRenderer`]: show a placeholder or the map, replace the marker list,
//! and animate the viewport.

pub mod recording;

use std::time::Duration;

use roadwatch_geo_models::{Destination, Position, Region};
use roadwatch_hazard_models::{HazardReport, MarkerStyle};
use serde::Serialize;

/// Pin colour of the destination marker.
pub const DESTINATION_PIN_COLOR: &str = "blue";

/// Options applied when the map is first shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    /// Viewport shown before any user interaction.
    pub initial_region: Region,
    /// Draw the platform's live user-location marker.
    pub shows_user_location: bool,
    /// Show the platform's "center on me" button.
    pub shows_my_location_button: bool,
    /// Raster tile URL template (`{s}`, `{z}`, `{x}`, `{y}` placeholders).
    pub tile_url_template: String,
    /// `User-Agent` sent with tile requests.
    pub user_agent: String,
}

/// Visual content of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkerContent {
    /// The platform's default pin in the given colour.
    Pin {
        /// Pin colour name.
        color: &'static str,
    },
    /// A round badge with an icon.
    Badge {
        /// Icon and background colour.
        style: MarkerStyle,
    },
}

/// A single marker in the declarative overlay list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOverlay {
    /// Stable key so the widget can diff successive lists.
    pub key: String,
    /// Where the marker sits.
    pub position: Position,
    /// Callout title.
    pub title: String,
    /// What the marker looks like.
    pub content: MarkerContent,
}

impl MarkerOverlay {
    /// Marker for the searched destination.
    #[must_use]
    pub fn destination(destination: &Destination) -> Self {
        Self {
            key: "destination".to_string(),
            position: destination.position(),
            title: destination.name.clone(),
            content: MarkerContent::Pin {
                color: DESTINATION_PIN_COLOR,
            },
        }
    }

    /// Marker for a hazard report, styled by kind.
    #[must_use]
    pub fn hazard(report: &HazardReport) -> Self {
        Self {
            key: report.id.to_string(),
            position: report.coordinate,
            title: report.title(),
            content: MarkerContent::Badge {
                style: report.kind.marker_style(),
            },
        }
    }
}

/// The platform map widget, as seen by the screen.
///
/// Calls are fire-and-forget UI commands; none of them can fail from the
/// screen's point of view.
pub trait MapRenderer: Send {
    /// Replaces the map with a text placeholder.
    fn show_placeholder(&mut self, message: &str);

    /// Shows the map with the given initial options.
    fn show_map(&mut self, options: &MapOptions);

    /// Replaces the marker overlay list.
    fn set_markers(&mut self, markers: &[MarkerOverlay]);

    /// Animates the viewport to `region` over `duration`.
    fn animate_to_region(&mut self, region: Region, duration: Duration);
}
