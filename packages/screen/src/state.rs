//! Pure state of the map & reporting screen.
//!
//! Nothing in here performs I/O. The event loop in [`crate::screen`] feeds
//! collaborator results into these transitions and forwards the resulting
//! render commands.

use roadwatch_geo_models::{Destination, Position};
use roadwatch_geocoder::GeocodedPlace;
use roadwatch_hazard_models::{HazardKind, HazardReport, ReportId, ReportIdGenerator};
use roadwatch_map::MarkerOverlay;
use serde::Serialize;

/// Mutable state owned by one mounted screen.
///
/// Reports are append-only; the whole state is dropped on unmount.
#[derive(Debug, Default)]
pub struct ScreenState {
    position: Option<Position>,
    error_message: Option<String>,
    destination: Option<Destination>,
    reports: Vec<HazardReport>,
    search_text: String,
    ids: ReportIdGenerator,
}

impl ScreenState {
    /// Fresh state: no fix, no destination, no reports.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known device position.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// User-visible location error, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Current destination.
    #[must_use]
    pub const fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    /// Reports in creation order.
    #[must_use]
    pub fn reports(&self) -> &[HazardReport] {
        &self.reports
    }

    /// Current contents of the search field.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Replaces the search field contents (one keystroke).
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Records a position fix.
    pub const fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    /// Records a user-visible location error.
    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Creates a report at the current position using the wall clock for
    /// its id. Returns `None` without changing anything if the position is
    /// unknown.
    pub fn report_hazard(&mut self, kind: HazardKind) -> Option<&HazardReport> {
        let position = self.position?;
        let id = self.ids.next_id();
        Some(self.push_report(kind, position, id))
    }

    /// Same as [`Self::report_hazard`] with an explicit clock reading.
    pub fn report_hazard_at(&mut self, kind: HazardKind, now_ms: i64) -> Option<&HazardReport> {
        let position = self.position?;
        let id = self.ids.next_at(now_ms);
        Some(self.push_report(kind, position, id))
    }

    fn push_report(
        &mut self,
        kind: HazardKind,
        coordinate: Position,
        id: ReportId,
    ) -> &HazardReport {
        let index = self.reports.len();
        self.reports.push(HazardReport {
            id,
            kind,
            coordinate,
        });
        &self.reports[index]
    }

    /// Replaces the destination with a geocoding result.
    pub fn apply_geocoded(&mut self, place: GeocodedPlace) -> &Destination {
        self.destination.insert(Destination {
            latitude: place.latitude,
            longitude: place.longitude,
            name: place.display_name,
        })
    }

    /// Placeholder text to show instead of the map, or `None` once a fix is
    /// known.
    #[must_use]
    pub fn placeholder<'a>(&'a self, loading_message: &'a str) -> Option<&'a str> {
        if self.position.is_some() {
            return None;
        }
        Some(self.error_message.as_deref().unwrap_or(loading_message))
    }

    /// The full overlay list: destination first (if any), then every report
    /// in creation order.
    #[must_use]
    pub fn markers(&self) -> Vec<MarkerOverlay> {
        self.destination
            .iter()
            .map(MarkerOverlay::destination)
            .chain(self.reports.iter().map(MarkerOverlay::hazard))
            .collect()
    }

    /// Owned copy of the observable state.
    #[must_use]
    pub fn snapshot(&self, pending_searches: usize) -> ScreenSnapshot {
        ScreenSnapshot {
            pending_searches,
            position: self.position,
            error_message: self.error_message.clone(),
            destination: self.destination.clone(),
            reports: self.reports.clone(),
            search_text: self.search_text.clone(),
        }
    }
}

/// Point-in-time copy of a screen's observable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSnapshot {
    /// Last known device position.
    pub position: Option<Position>,
    /// User-visible location error.
    pub error_message: Option<String>,
    /// Current destination.
    pub destination: Option<Destination>,
    /// Reports in creation order.
    pub reports: Vec<HazardReport>,
    /// Search field contents.
    pub search_text: String,
    /// Geocoding requests still awaiting a response.
    pub pending_searches: usize,
}
