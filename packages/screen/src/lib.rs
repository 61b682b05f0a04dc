#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The roadwatch map & reporting screen.
//!
//! Shows the user's position, resolves a searched destination through a
//! [`roadwatch_geocoder::Geocoder`], and lets the user drop hazard markers
//! at their current location. State lives only as long as the mounted
//! [`MapScreen`]; nothing is persisted.
//!
//! ```text
//! mount ── permission ──┬─ denied ──> placeholder(error), no retry
//!                       └─ granted ─> one position fix ─> map shown
//! ```
//!
//! Search responses are applied in arrival order by default; see
//! [`StaleResponsePolicy`] for the alternative.

pub mod config;
pub mod screen;
pub mod search;
pub mod state;

pub use config::{ScreenConfig, StaleResponsePolicy};
pub use screen::{MapScreen, ScreenError, ScreenHandle, UserAction};
pub use state::{ScreenSnapshot, ScreenState};
