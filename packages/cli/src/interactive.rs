//! Interactive map session.
//!
//! Mounts a [`MapScreen`] rendered to the terminal and drives it from a
//! `dialoguer` menu until the user quits.

use std::sync::Arc;
use std::time::Duration;

use dialoguer::{Input, Select};
use roadwatch_cli_utils::{MultiProgress, Spinner};
use roadwatch_geocoder::Geocoder;
use roadwatch_hazard_models::HazardKind;
use roadwatch_location::LocationProvider;
use roadwatch_screen::{MapScreen, ScreenConfig, ScreenHandle, ScreenSnapshot};

use crate::terminal::{TerminalRenderer, format_marker};

/// How often the session polls the screen while waiting on a search.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Top-level actions in the session menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    Search,
    Report(HazardKind),
    Show,
    Quit,
}

impl SessionAction {
    /// Menu entries in display order, with one report button per
    /// [`HazardKind`].
    fn menu() -> Vec<Self> {
        std::iter::once(Self::Search)
            .chain(HazardKind::all().iter().copied().map(Self::Report))
            .chain([Self::Show, Self::Quit])
            .collect()
    }

    #[must_use]
    fn label(&self) -> String {
        match self {
            Self::Search => "Search for a destination".to_string(),
            Self::Report(kind) => format!("Report: {}", kind.label()),
            Self::Show => "Show map state".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }
}

/// Runs an interactive session until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or the screen stops unexpectedly.
pub async fn run(
    multi: &MultiProgress,
    config: ScreenConfig,
    geocoder: Arc<dyn Geocoder>,
    location: Arc<dyn LocationProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("RoadWatch");
    println!();

    let renderer = TerminalRenderer::new(multi.clone());
    let (screen, handle) = MapScreen::new(config, geocoder, renderer);
    let task = tokio::spawn(screen.run(location));

    let actions = SessionAction::menu();
    let labels: Vec<String> = actions.iter().map(SessionAction::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[idx] {
            SessionAction::Search => handle_search(multi, &handle).await?,
            SessionAction::Report(kind) => handle.report_hazard(kind)?,
            SessionAction::Show => print_snapshot(&handle.snapshot().await?),
            SessionAction::Quit => break,
        }
    }

    // Dropping the last handle unmounts the screen.
    drop(handle);
    task.await?;
    Ok(())
}

/// Prompts for a query, submits it and waits for every pending search to
/// settle.
async fn handle_search(
    multi: &MultiProgress,
    handle: &ScreenHandle,
) -> Result<(), Box<dyn std::error::Error>> {
    let query: String = Input::new()
        .with_prompt("Destination")
        .allow_empty(true)
        .interact_text()?;

    handle.search(query.trim())?;

    let spinner = Spinner::start(multi, &format!("Searching for {query:?}..."));
    let snapshot = loop {
        let snapshot = handle.snapshot().await?;
        if snapshot.pending_searches == 0 {
            break snapshot;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    };
    let summary = snapshot.destination.as_ref().map_or_else(
        || "No destination set".to_string(),
        |destination| format!("Destination: {}", destination.name),
    );
    spinner.finish(&summary);
    Ok(())
}

fn print_snapshot(snapshot: &ScreenSnapshot) {
    match (&snapshot.position, &snapshot.error_message) {
        (Some(position), _) => println!("Position: {position}"),
        (None, Some(message)) => println!("Position unknown: {message}"),
        (None, None) => println!("Position unknown: waiting for fix"),
    }

    match &snapshot.destination {
        Some(destination) => println!(
            "Destination: {} @ {}",
            destination.name,
            destination.position()
        ),
        None => println!("Destination: none"),
    }

    println!("Reports: {}", snapshot.reports.len());
    for report in &snapshot.reports {
        println!(
            "  {}",
            format_marker(&roadwatch_map::MarkerOverlay::hazard(report))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_has_one_report_entry_per_hazard_kind() {
        let reports: Vec<HazardKind> = SessionAction::menu()
            .into_iter()
            .filter_map(|action| match action {
                SessionAction::Report(kind) => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(reports, HazardKind::all());
    }

    #[test]
    fn menu_starts_with_search_and_ends_with_quit() {
        let menu = SessionAction::menu();
        assert_eq!(menu.first(), Some(&SessionAction::Search));
        assert_eq!(menu.last(), Some(&SessionAction::Quit));
        assert_eq!(
            SessionAction::Report(HazardKind::Police).label(),
            "Report: Police"
        );
    }
}
