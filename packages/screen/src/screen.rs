//! The mounted screen: a single task that owns [`ScreenState`] and reacts to
//! user actions and collaborator results one at a time.
//!
//! Slow work (permission prompt, position fix, geocoding) runs in spawned
//! tasks that report back over a channel, so every state mutation happens on
//! the screen task. Nothing is ever cancelled: a response that arrives after
//! unmount is dropped.

use std::sync::Arc;

use roadwatch_geo_models::Position;
use roadwatch_geocoder::{GeocodeError, GeocodedPlace, Geocoder};
use roadwatch_hazard_models::HazardKind;
use roadwatch_location::{LocationError, LocationProvider, PermissionStatus};
use roadwatch_map::MapRenderer;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::config::ScreenConfig;
use crate::search::{SearchToken, SearchTracker};
use crate::state::{ScreenSnapshot, ScreenState};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// The search field changed.
    SetSearchText(String),
    /// The search field was submitted.
    SubmitSearch,
    /// A report button was pressed.
    ReportHazard(HazardKind),
}

/// Errors returned by [`ScreenHandle`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScreenError {
    /// The screen task has stopped.
    #[error("Map screen is not mounted")]
    Unmounted,
}

enum Request {
    Action(UserAction),
    Snapshot(oneshot::Sender<ScreenSnapshot>),
}

enum Next {
    Request(Request),
    Completion(Completion),
}

enum Completion {
    Permission(PermissionStatus),
    Position(Result<Position, LocationError>),
    Search {
        token: SearchToken,
        query: String,
        result: Result<Option<GeocodedPlace>, GeocodeError>,
    },
}

/// Cloneable sender side of a mounted screen.
///
/// The screen unmounts once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct ScreenHandle {
    requests: mpsc::UnboundedSender<Request>,
}

impl ScreenHandle {
    fn send(&self, request: Request) -> Result<(), ScreenError> {
        self.requests
            .send(request)
            .map_err(|_| ScreenError::Unmounted)
    }

    /// Sends a user action.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Unmounted`] if the screen has stopped.
    pub fn dispatch(&self, action: UserAction) -> Result<(), ScreenError> {
        self.send(Request::Action(action))
    }

    /// Replaces the search field contents.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Unmounted`] if the screen has stopped.
    pub fn set_search_text(&self, text: impl Into<String>) -> Result<(), ScreenError> {
        self.dispatch(UserAction::SetSearchText(text.into()))
    }

    /// Submits the current search field contents.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Unmounted`] if the screen has stopped.
    pub fn submit_search(&self) -> Result<(), ScreenError> {
        self.dispatch(UserAction::SubmitSearch)
    }

    /// Types `query` into the search field and submits it.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Unmounted`] if the screen has stopped.
    pub fn search(&self, query: impl Into<String>) -> Result<(), ScreenError> {
        self.set_search_text(query)?;
        self.submit_search()
    }

    /// Presses the report button for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Unmounted`] if the screen has stopped.
    pub fn report_hazard(&self, kind: HazardKind) -> Result<(), ScreenError> {
        self.dispatch(UserAction::ReportHazard(kind))
    }

    /// Returns a copy of the screen state after every previously sent
    /// action has been applied.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Unmounted`] if the screen has stopped.
    pub async fn snapshot(&self) -> Result<ScreenSnapshot, ScreenError> {
        let (tx, rx) = oneshot::channel();
        self.send(Request::Snapshot(tx))?;
        rx.await.map_err(|_| ScreenError::Unmounted)
    }
}

/// The map & reporting screen.
pub struct MapScreen<R: MapRenderer> {
    config: ScreenConfig,
    state: ScreenState,
    searches: SearchTracker,
    geocoder: Arc<dyn Geocoder>,
    renderer: R,
    requests: mpsc::UnboundedReceiver<Request>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<R: MapRenderer> MapScreen<R> {
    /// Creates an unmounted screen and the handle used to drive it.
    #[must_use]
    pub fn new(
        config: ScreenConfig,
        geocoder: Arc<dyn Geocoder>,
        renderer: R,
    ) -> (Self, ScreenHandle) {
        let (requests_tx, requests) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let searches = SearchTracker::new(config.stale_responses);

        let screen = Self {
            config,
            state: ScreenState::new(),
            searches,
            geocoder,
            renderer,
            requests,
            completions_tx,
            completions_rx,
        };

        let handle = ScreenHandle {
            requests: requests_tx,
        };
        (screen, handle)
    }

    /// Mounts the screen and processes events until every [`ScreenHandle`]
    /// is dropped. All state is discarded on return.
    pub async fn run(mut self, location: Arc<dyn LocationProvider>) {
        self.mount(location);

        loop {
            let next = tokio::select! {
                request = self.requests.recv() => match request {
                    Some(request) => Next::Request(request),
                    None => break,
                },
                Some(completion) = self.completions_rx.recv() => Next::Completion(completion),
            };

            match next {
                Next::Request(Request::Action(action)) => self.apply_action(action),
                Next::Request(Request::Snapshot(reply)) => {
                    let snapshot = self.state.snapshot(self.searches.in_flight());
                    if reply.send(snapshot).is_err() {
                        log::debug!("Snapshot requester went away");
                    }
                }
                Next::Completion(completion) => self.apply_completion(completion),
            }
        }

        log::debug!(
            "Map screen unmounted; discarding {} report(s) and {} pending search(es)",
            self.state.reports().len(),
            self.searches.in_flight()
        );
    }

    /// Shows the placeholder and starts the permission + position fetch.
    fn mount(&mut self, location: Arc<dyn LocationProvider>) {
        self.render_placeholder();

        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let status = location.request_permission().await;
            let granted = status.is_granted();
            if completions.send(Completion::Permission(status)).is_err() || !granted {
                return;
            }

            let fix = location.current_position().await;
            if completions.send(Completion::Position(fix)).is_err() {
                log::debug!("Screen unmounted before the position fix arrived");
            }
        });
    }

    fn apply_action(&mut self, action: UserAction) {
        match action {
            UserAction::SetSearchText(text) => self.state.set_search_text(text),
            UserAction::SubmitSearch => self.submit_search(),
            UserAction::ReportHazard(kind) => self.report_hazard(kind),
        }
    }

    fn submit_search(&mut self) {
        let query = self.state.search_text().to_string();
        if !self.config.accepts_query(&query) {
            log::debug!(
                "Ignoring search {query:?}: shorter than {} characters",
                self.config.min_query_len
            );
            return;
        }

        let token = self.searches.issue();
        log::debug!("Geocoding {query:?} as request {token}");

        let geocoder = Arc::clone(&self.geocoder);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = geocoder.search(&query).await;
            if completions
                .send(Completion::Search {
                    token,
                    query,
                    result,
                })
                .is_err()
            {
                log::debug!("Screen unmounted before search {token} completed");
            }
        });
    }

    fn report_hazard(&mut self, kind: HazardKind) {
        let Some(report) = self.state.report_hazard(kind) else {
            log::debug!("Ignoring {kind} report: position unknown");
            return;
        };
        log::info!(
            "Reported {} at {} (id {})",
            report.kind,
            report.coordinate,
            report.id
        );
        self.render_markers();
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Permission(PermissionStatus::Granted) => {
                log::info!("Location permission granted");
            }
            Completion::Permission(PermissionStatus::Denied) => {
                log::warn!("Location permission denied");
                self.fail_location();
            }
            Completion::Position(Ok(position)) => {
                log::info!("Position fix at {position}");
                self.state.set_position(position);
                self.renderer.show_map(&self.config.map_options(position));
                self.render_markers();
            }
            Completion::Position(Err(e)) => {
                log::warn!("Failed to get current position: {e}");
                self.fail_location();
            }
            Completion::Search {
                token,
                query,
                result,
            } => self.apply_search(token, &query, result),
        }
    }

    fn apply_search(
        &mut self,
        token: SearchToken,
        query: &str,
        result: Result<Option<GeocodedPlace>, GeocodeError>,
    ) {
        if !self.searches.settle(token) {
            log::debug!("Discarding stale response {token} for {query:?}");
            return;
        }

        match result {
            Ok(Some(place)) => {
                let destination = self.state.apply_geocoded(place);
                log::info!("Destination set to {:?}", destination.name);
                let region = self.config.search_region(destination.position());
                self.render_markers();
                self.renderer
                    .animate_to_region(region, self.config.search_animation());
            }
            Ok(None) => log::debug!("No geocoding result for {query:?}"),
            Err(e) => log::error!("Geocoding {query:?} failed: {e}"),
        }
    }

    /// Location is unusable for the rest of this mount; there is no retry.
    fn fail_location(&mut self) {
        self.state
            .set_error_message(self.config.permission_denied_message.clone());
        self.render_placeholder();
    }

    fn render_placeholder(&mut self) {
        if let Some(message) = self.state.placeholder(&self.config.loading_message) {
            self.renderer.show_placeholder(message);
        }
    }

    fn render_markers(&mut self) {
        self.renderer.set_markers(&self.state.markers());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use roadwatch_location::StaticLocationProvider;
    use roadwatch_map::recording::{MapCommand, MapCommandLog, RecordingRenderer};
    use roadwatch_map::{MarkerContent, MarkerOverlay};

    use super::*;
    use crate::config::StaleResponsePolicy;

    fn place(lat: f64, lon: f64, name: &str) -> GeocodedPlace {
        GeocodedPlace {
            latitude: lat,
            longitude: lon,
            display_name: name.to_string(),
        }
    }

    enum Script {
        Respond(Option<GeocodedPlace>),
        Fail,
        Gated(oneshot::Receiver<Option<GeocodedPlace>>),
    }

    /// Answers each query from a script; unknown queries yield no result.
    #[derive(Default)]
    struct ScriptedGeocoder {
        scripts: Mutex<BTreeMap<String, Script>>,
        calls: AtomicUsize,
    }

    impl ScriptedGeocoder {
        fn respond(&self, query: &str, result: Option<GeocodedPlace>) {
            self.scripts
                .lock()
                .unwrap()
                .insert(query.to_string(), Script::Respond(result));
        }

        fn fail(&self, query: &str) {
            self.scripts
                .lock()
                .unwrap()
                .insert(query.to_string(), Script::Fail);
        }

        fn gate(&self, query: &str) -> oneshot::Sender<Option<GeocodedPlace>> {
            let (tx, rx) = oneshot::channel();
            self.scripts
                .lock()
                .unwrap()
                .insert(query.to_string(), Script::Gated(rx));
            tx
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for ScriptedGeocoder {
        async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let script = self.scripts.lock().unwrap().remove(query);
            match script {
                None => Ok(None),
                Some(Script::Respond(result)) => Ok(result),
                Some(Script::Fail) => Err(GeocodeError::Parse {
                    message: "Nominatim response is not an array".to_string(),
                }),
                Some(Script::Gated(rx)) => Ok(rx.await.unwrap_or(None)),
            }
        }
    }

    /// Grants permission, then waits for the test to release a fix.
    struct GatedLocation {
        fix: tokio::sync::Mutex<Option<oneshot::Receiver<Position>>>,
    }

    #[async_trait]
    impl LocationProvider for GatedLocation {
        async fn request_permission(&self) -> PermissionStatus {
            PermissionStatus::Granted
        }

        async fn current_position(&self) -> Result<Position, LocationError> {
            let rx = self.fix.lock().await.take();
            match rx {
                Some(rx) => rx.await.map_err(|_| LocationError::Unavailable {
                    message: "gate dropped".to_string(),
                }),
                None => Err(LocationError::Unavailable {
                    message: "fix already taken".to_string(),
                }),
            }
        }
    }

    struct Harness {
        handle: ScreenHandle,
        geocoder: Arc<ScriptedGeocoder>,
        map: MapCommandLog,
        task: tokio::task::JoinHandle<()>,
    }

    fn mount_with(config: ScreenConfig, location: Arc<dyn LocationProvider>) -> Harness {
        let geocoder = Arc::new(ScriptedGeocoder::default());
        let (renderer, map) = RecordingRenderer::new();
        let (screen, handle) = MapScreen::new(config, geocoder.clone(), renderer);
        let task = tokio::spawn(screen.run(location));
        Harness {
            handle,
            geocoder,
            map,
            task,
        }
    }

    fn mount_at(position: Position) -> Harness {
        mount_with(
            ScreenConfig::default(),
            Arc::new(StaticLocationProvider::granted(position)),
        )
    }

    async fn wait_until(
        handle: &ScreenHandle,
        condition: impl Fn(&ScreenSnapshot) -> bool,
    ) -> ScreenSnapshot {
        for _ in 0..400 {
            let snapshot = handle.snapshot().await.unwrap();
            if condition(&snapshot) {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("screen never reached the expected state");
    }

    const PARIS: Position = Position::new(48.8566, 2.3522);

    #[tokio::test]
    async fn report_waits_for_first_fix() {
        let (fix_tx, fix_rx) = oneshot::channel();
        let location = Arc::new(GatedLocation {
            fix: tokio::sync::Mutex::new(Some(fix_rx)),
        });
        let h = mount_with(ScreenConfig::default(), location);

        h.handle.report_hazard(HazardKind::Accident).unwrap();
        let snapshot = h.handle.snapshot().await.unwrap();
        assert!(snapshot.position.is_none());
        assert!(snapshot.reports.is_empty());
        assert_eq!(h.map.latest_placeholder().as_deref(), Some("Loading map..."));

        fix_tx.send(PARIS).unwrap();
        wait_until(&h.handle, |s| s.position.is_some()).await;

        h.handle.report_hazard(HazardKind::Police).unwrap();
        let snapshot = h.handle.snapshot().await.unwrap();
        assert_eq!(snapshot.reports.len(), 1);
        assert_eq!(snapshot.reports[0].kind, HazardKind::Police);
        assert_eq!(snapshot.reports[0].coordinate, PARIS);
    }

    #[tokio::test]
    async fn fix_shows_map_centered_on_position() {
        let h = mount_at(PARIS);
        wait_until(&h.handle, |s| s.position == Some(PARIS)).await;

        let options = h
            .map
            .commands()
            .into_iter()
            .find_map(|cmd| match cmd {
                MapCommand::ShowMap(options) => Some(options),
                _ => None,
            })
            .expect("map should be shown");
        assert_eq!(options.initial_region.center(), PARIS);
        assert!(options.shows_user_location);
    }

    #[tokio::test]
    async fn repeated_reports_append_with_distinct_ids() {
        let h = mount_at(PARIS);
        wait_until(&h.handle, |s| s.position.is_some()).await;

        for kind in [
            HazardKind::Accident,
            HazardKind::Traffic,
            HazardKind::Accident,
            HazardKind::Police,
            HazardKind::Traffic,
        ] {
            h.handle.report_hazard(kind).unwrap();
        }

        let snapshot = h.handle.snapshot().await.unwrap();
        assert_eq!(snapshot.reports.len(), 5);
        let mut ids: Vec<_> = snapshot.reports.iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(snapshot.reports.iter().all(|r| r.coordinate == PARIS));

        let markers = h.map.latest_markers().unwrap();
        assert_eq!(markers.len(), 5);
        assert_eq!(markers[3].title, "Report: police");
    }

    #[tokio::test]
    async fn permission_denied_shows_fixed_message() {
        let h = mount_with(
            ScreenConfig::default(),
            Arc::new(StaticLocationProvider::denied()),
        );
        let snapshot = wait_until(&h.handle, |s| s.error_message.is_some()).await;

        assert_eq!(
            snapshot.error_message.as_deref(),
            Some("Location permission denied")
        );
        assert!(snapshot.position.is_none());
        assert_eq!(
            h.map.latest_placeholder().as_deref(),
            Some("Location permission denied")
        );

        h.handle.report_hazard(HazardKind::Traffic).unwrap();
        assert!(h.handle.snapshot().await.unwrap().reports.is_empty());
    }

    #[tokio::test]
    async fn failed_fix_uses_same_message_as_denial() {
        let h = mount_with(
            ScreenConfig::default(),
            Arc::new(StaticLocationProvider::unavailable()),
        );
        let snapshot = wait_until(&h.handle, |s| s.error_message.is_some()).await;
        assert_eq!(
            snapshot.error_message.as_deref(),
            Some("Location permission denied")
        );
        assert!(snapshot.position.is_none());
    }

    #[tokio::test]
    async fn search_sets_destination_and_animates_once() {
        let h = mount_at(PARIS);
        h.geocoder.respond(
            "Eiffel Tower",
            Some(place(48.8584, 2.2945, "Eiffel Tower, Paris")),
        );

        h.handle.search("Eiffel Tower").unwrap();
        let snapshot = wait_until(&h.handle, |s| s.destination.is_some()).await;

        let destination = snapshot.destination.unwrap();
        assert!((destination.latitude - 48.8584).abs() < f64::EPSILON);
        assert!((destination.longitude - 2.2945).abs() < f64::EPSILON);
        assert_eq!(destination.name, "Eiffel Tower, Paris");

        let animations = h.map.animations();
        assert_eq!(animations.len(), 1);
        let (region, duration) = animations[0];
        assert_eq!(region.center(), Position::new(48.8584, 2.2945));
        assert!((region.latitude_delta - 0.01).abs() < f64::EPSILON);
        assert_eq!(duration, Duration::from_millis(1000));

        let markers = h.map.latest_markers().unwrap();
        assert_eq!(markers, vec![MarkerOverlay::destination(&destination)]);
        assert_eq!(markers[0].content, MarkerContent::Pin { color: "blue" });
    }

    #[tokio::test]
    async fn short_query_is_never_sent() {
        let h = mount_at(PARIS);

        for query in ["", "E", "Ei"] {
            h.handle.search(query).unwrap();
        }
        let snapshot = h.handle.snapshot().await.unwrap();

        assert_eq!(h.geocoder.calls(), 0);
        assert_eq!(snapshot.pending_searches, 0);
        assert!(snapshot.destination.is_none());
        assert_eq!(snapshot.search_text, "Ei");
    }

    #[tokio::test]
    async fn empty_result_keeps_previous_destination() {
        let h = mount_at(PARIS);
        h.geocoder.respond(
            "Eiffel Tower",
            Some(place(48.8584, 2.2945, "Eiffel Tower, Paris")),
        );
        h.handle.search("Eiffel Tower").unwrap();
        let before = wait_until(&h.handle, |s| s.destination.is_some()).await;

        h.geocoder.respond("Atlantis", None);
        h.handle.search("Atlantis").unwrap();
        let after = wait_until(&h.handle, |s| {
            s.search_text == "Atlantis" && s.pending_searches == 0
        })
        .await;

        assert_eq!(h.geocoder.calls(), 2);
        assert_eq!(after.destination, before.destination);
        assert_eq!(h.map.animations().len(), 1);
    }

    #[tokio::test]
    async fn geocoding_failure_is_swallowed() {
        let h = mount_at(PARIS);
        h.geocoder.fail("Eiffel Tower");

        h.handle.search("Eiffel Tower").unwrap();
        let snapshot = wait_until(&h.handle, |s| {
            s.search_text == "Eiffel Tower" && s.pending_searches == 0
        })
        .await;

        assert_eq!(h.geocoder.calls(), 1);
        assert!(snapshot.destination.is_none());
        assert!(snapshot.error_message.is_none());
        assert!(h.map.animations().is_empty());
    }

    #[tokio::test]
    async fn failed_and_short_searches_keep_existing_destination() {
        let h = mount_at(PARIS);
        h.geocoder.respond(
            "Eiffel Tower",
            Some(place(48.8584, 2.2945, "Eiffel Tower, Paris")),
        );
        h.handle.search("Eiffel Tower").unwrap();
        let before = wait_until(&h.handle, |s| s.destination.is_some()).await;

        h.geocoder.fail("Louvre Museum");
        h.handle.search("Louvre Museum").unwrap();
        let after_failure = wait_until(&h.handle, |s| {
            s.search_text == "Louvre Museum" && s.pending_searches == 0
        })
        .await;
        assert_eq!(after_failure.destination, before.destination);
        assert!(after_failure.error_message.is_none());

        h.handle.search("Lo").unwrap();
        let after_short = h.handle.snapshot().await.unwrap();

        assert_eq!(after_short.search_text, "Lo");
        assert_eq!(after_short.destination, before.destination);
        assert_eq!(
            after_short.destination.map(|d| d.name).as_deref(),
            Some("Eiffel Tower, Paris")
        );
        assert_eq!(h.geocoder.calls(), 2);
        assert_eq!(h.map.animations().len(), 1);
    }

    #[tokio::test]
    async fn last_response_to_arrive_wins() {
        let h = mount_at(PARIS);
        let first = h.geocoder.gate("Alpha street");
        let second = h.geocoder.gate("Bravo street");
        let p1 = place(1.0, 1.0, "Alpha street");
        let p2 = place(2.0, 2.0, "Bravo street");

        h.handle.search("Alpha street").unwrap();
        h.handle.search("Bravo street").unwrap();
        wait_until(&h.handle, |s| s.pending_searches == 2).await;

        second.send(Some(p2)).unwrap();
        wait_until(&h.handle, |s| {
            s.destination.as_ref().is_some_and(|d| d.name == "Bravo street")
        })
        .await;

        first.send(Some(p1)).unwrap();
        let snapshot = wait_until(&h.handle, |s| s.pending_searches == 0).await;

        let destination = snapshot.destination.unwrap();
        assert_eq!(destination.name, "Alpha street");
        assert_eq!(destination.position(), Position::new(1.0, 1.0));
        assert_eq!(h.map.animations().len(), 2);
    }

    #[tokio::test]
    async fn discard_stale_keeps_newest_request() {
        let config = ScreenConfig {
            stale_responses: StaleResponsePolicy::DiscardStale,
            ..ScreenConfig::default()
        };
        let h = mount_with(config, Arc::new(StaticLocationProvider::granted(PARIS)));
        let first = h.geocoder.gate("Alpha street");
        let second = h.geocoder.gate("Bravo street");

        h.handle.search("Alpha street").unwrap();
        h.handle.search("Bravo street").unwrap();
        wait_until(&h.handle, |s| s.pending_searches == 2).await;

        second.send(Some(place(2.0, 2.0, "Bravo street"))).unwrap();
        wait_until(&h.handle, |s| s.destination.is_some()).await;
        first.send(Some(place(1.0, 1.0, "Alpha street"))).unwrap();
        let snapshot = wait_until(&h.handle, |s| s.pending_searches == 0).await;

        assert_eq!(snapshot.destination.unwrap().name, "Bravo street");
        assert_eq!(h.map.animations().len(), 1);
    }

    #[tokio::test]
    async fn dropping_every_handle_unmounts() {
        let h = mount_at(PARIS);
        let gate = h.geocoder.gate("Eiffel Tower");
        h.handle.search("Eiffel Tower").unwrap();
        wait_until(&h.handle, |s| s.pending_searches == 1).await;

        let extra = h.handle.clone();
        drop(h.handle);
        assert!(extra.snapshot().await.is_ok());
        drop(extra);

        tokio::time::timeout(Duration::from_secs(2), h.task)
            .await
            .expect("screen should stop")
            .unwrap();

        // The in-flight request still completes; its response goes nowhere.
        let _ = gate.send(None);
    }
}
