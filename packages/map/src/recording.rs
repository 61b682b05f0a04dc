//! A [`MapRenderer`] that records every command it receives.
//!
//! Used to drive the screen headlessly and assert on what the widget would
//! have been told to do.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use roadwatch_geo_models::Region;

use crate::{MapOptions, MapRenderer, MarkerOverlay};

/// One command sent to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    /// See [`MapRenderer::show_placeholder`].
    ShowPlaceholder(String),
    /// See [`MapRenderer::show_map`].
    ShowMap(MapOptions),
    /// See [`MapRenderer::set_markers`].
    SetMarkers(Vec<MarkerOverlay>),
    /// See [`MapRenderer::animate_to_region`].
    AnimateToRegion {
        /// Target viewport.
        region: Region,
        /// Animation length.
        duration: Duration,
    },
}

/// Shared view of the commands a [`RecordingRenderer`] has received.
#[derive(Debug, Clone, Default)]
pub struct MapCommandLog {
    commands: Arc<Mutex<Vec<MapCommand>>>,
}

impl MapCommandLog {
    fn lock(&self) -> MutexGuard<'_, Vec<MapCommand>> {
        // A poisoned log still holds every command pushed before the panic.
        self.commands
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// All commands in arrival order.
    #[must_use]
    pub fn commands(&self) -> Vec<MapCommand> {
        self.lock().clone()
    }

    /// Only the viewport animations, in arrival order.
    #[must_use]
    pub fn animations(&self) -> Vec<(Region, Duration)> {
        self.lock()
            .iter()
            .filter_map(|cmd| match cmd {
                MapCommand::AnimateToRegion { region, duration } => Some((*region, *duration)),
                _ => None,
            })
            .collect()
    }

    /// The most recent marker list, if any was sent.
    #[must_use]
    pub fn latest_markers(&self) -> Option<Vec<MarkerOverlay>> {
        self.lock().iter().rev().find_map(|cmd| match cmd {
            MapCommand::SetMarkers(markers) => Some(markers.clone()),
            _ => None,
        })
    }

    /// The most recent placeholder text, if any was shown.
    #[must_use]
    pub fn latest_placeholder(&self) -> Option<String> {
        self.lock().iter().rev().find_map(|cmd| match cmd {
            MapCommand::ShowPlaceholder(message) => Some(message.clone()),
            _ => None,
        })
    }
}

/// Renderer that appends to a [`MapCommandLog`].
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    log: MapCommandLog,
}

impl RecordingRenderer {
    /// Creates a renderer and the log it writes to.
    #[must_use]
    pub fn new() -> (Self, MapCommandLog) {
        let log = MapCommandLog::default();
        (Self { log: log.clone() }, log)
    }

    fn push(&self, command: MapCommand) {
        self.log.lock().push(command);
    }
}

impl MapRenderer for RecordingRenderer {
    fn show_placeholder(&mut self, message: &str) {
        self.push(MapCommand::ShowPlaceholder(message.to_string()));
    }

    fn show_map(&mut self, options: &MapOptions) {
        self.push(MapCommand::ShowMap(options.clone()));
    }

    fn set_markers(&mut self, markers: &[MarkerOverlay]) {
        self.push(MapCommand::SetMarkers(markers.to_vec()));
    }

    fn animate_to_region(&mut self, region: Region, duration: Duration) {
        log::trace!("Recording animation to {region:?} over {duration:?}");
        self.push(MapCommand::AnimateToRegion { region, duration });
    }
}
