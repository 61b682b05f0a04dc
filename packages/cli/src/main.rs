#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal client for the roadwatch map.
//!
//! ```text
//! roadwatch geocode "Eiffel Tower"
//! roadwatch run --lat 48.8566 --lon 2.3522
//! roadwatch run --lat 48.8566 --lon 2.3522 --deny-location
//! ```
//!
//! Uses `indicatif-log-bridge` (via [`roadwatch_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and spinners never fight for the terminal.

mod config;
mod interactive;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use roadwatch_cli_utils::Spinner;
use roadwatch_geo_models::{Destination, Position};
use roadwatch_geocoder::{GeocodedPlace, Geocoder};
use roadwatch_geocoder::nominatim::NominatimGeocoder;
use roadwatch_location::{LocationProvider, StaticLocationProvider};
use roadwatch_screen::StaleResponsePolicy;
use thiserror::Error;

#[derive(Parser)]
#[command(
    name = "roadwatch",
    about = "Live map, destination search and hazard reports in the terminal"
)]
struct Cli {
    /// TOML file with optional `[screen]` and `[geocoder]` tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a destination and print it as JSON
    Geocode {
        /// Free-text place name or address
        query: String,
    },
    /// Open an interactive map session
    Run {
        /// Latitude reported by the simulated device
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude reported by the simulated device
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Simulate the user refusing location access
        #[arg(long)]
        deny_location: bool,
        /// Override how out-of-order search responses are handled
        #[arg(long, value_parser = parse_policy)]
        stale_responses: Option<StaleResponsePolicy>,
    },
}

/// The geocoder answered with an empty result set.
#[derive(Debug, Error)]
#[error("No match for {query:?}")]
struct NoMatch {
    query: String,
}

fn to_destination(query: &str, place: Option<GeocodedPlace>) -> Result<Destination, NoMatch> {
    let place = place.ok_or_else(|| NoMatch {
        query: query.to_string(),
    })?;
    Ok(Destination {
        latitude: place.latitude,
        longitude: place.longitude,
        name: place.display_name,
    })
}

fn parse_policy(value: &str) -> Result<StaleResponsePolicy, String> {
    value.parse().map_err(|_| {
        format!("unknown policy {value:?} (expected last_arrival_wins or discard_stale)")
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = roadwatch_cli_utils::init_logger();

    let config = config::load(cli.config.as_deref())?;
    let service = config.geocoding_service();
    let geocoder = NominatimGeocoder::new(&service)?;
    log::debug!("Using geocoding service {} ({})", service.id, geocoder.base_url());

    match cli.command {
        Commands::Geocode { query } => {
            let spinner = Spinner::start(&multi, &format!("Geocoding {query:?}..."));
            let place = geocoder.search(&query).await?;
            drop(spinner);

            let destination = to_destination(&query, place)?;
            println!("{}", serde_json::to_string_pretty(&destination)?);
        }
        Commands::Run {
            lat,
            lon,
            deny_location,
            stale_responses,
        } => {
            let mut screen_config = config.screen;
            if let Some(policy) = stale_responses {
                screen_config.stale_responses = policy;
            }

            let location: Arc<dyn LocationProvider> = if deny_location {
                Arc::new(StaticLocationProvider::denied())
            } else {
                Arc::new(StaticLocationProvider::granted(Position::new(lat, lon)))
            };

            interactive::run(&multi, screen_config, Arc::new(geocoder), location).await?;
        }
    }

    Ok(())
}
