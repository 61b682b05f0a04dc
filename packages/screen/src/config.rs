//! Screen configuration.
//!
//! Every field has a default, so a user TOML only needs the keys it wants
//! to change.

use std::time::Duration;

use roadwatch_geo_models::{Position, Region};
use roadwatch_map::MapOptions;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// What to do when geocoding responses arrive out of order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum StaleResponsePolicy {
    /// Every response is applied as it arrives; the last to arrive wins.
    #[default]
    LastArrivalWins,
    /// A response is dropped if a newer search has already been answered.
    DiscardStale,
}

/// Tunables for the map & reporting screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Queries shorter than this many characters are not submitted.
    pub min_query_len: usize,
    /// Latitude span of the first viewport.
    pub initial_latitude_delta: f64,
    /// Longitude span of the first viewport.
    pub initial_longitude_delta: f64,
    /// Span (both axes) used when flying to a search result.
    pub search_zoom_delta: f64,
    /// Duration of the fly-to animation.
    pub search_animation_ms: u64,
    /// Draw the live user-location marker.
    pub shows_user_location: bool,
    /// Show the "center on me" button.
    pub shows_my_location_button: bool,
    /// Raster tile source.
    pub tile_url_template: String,
    /// `User-Agent` for tile requests.
    pub tile_user_agent: String,
    /// Placeholder text once location access has failed.
    pub permission_denied_message: String,
    /// Placeholder text while waiting for the first fix.
    pub loading_message: String,
    /// Out-of-order response handling.
    pub stale_responses: StaleResponsePolicy,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            initial_latitude_delta: 0.0922,
            initial_longitude_delta: 0.0421,
            search_zoom_delta: 0.01,
            search_animation_ms: 1000,
            shows_user_location: true,
            shows_my_location_button: true,
            tile_url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_user_agent: "RoadWatch/1.0".to_string(),
            permission_denied_message: "Location permission denied".to_string(),
            loading_message: "Loading map...".to_string(),
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

impl ScreenConfig {
    /// Whether `query` is long enough to be sent to the geocoder.
    #[must_use]
    pub fn accepts_query(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_len
    }

    /// Map options for the first viewport, centered on `position`.
    #[must_use]
    pub fn map_options(&self, position: Position) -> MapOptions {
        MapOptions {
            initial_region: Region::around(
                position,
                self.initial_latitude_delta,
                self.initial_longitude_delta,
            ),
            shows_user_location: self.shows_user_location,
            shows_my_location_button: self.shows_my_location_button,
            tile_url_template: self.tile_url_template.clone(),
            user_agent: self.tile_user_agent.clone(),
        }
    }

    /// Viewport to fly to after a successful search.
    #[must_use]
    pub const fn search_region(&self, target: Position) -> Region {
        Region::around(target, self.search_zoom_delta, self.search_zoom_delta)
    }

    /// Duration of the fly-to animation.
    #[must_use]
    pub const fn search_animation(&self) -> Duration {
        Duration::from_millis(self.search_animation_ms)
    }
}
