//! Nominatim / `OpenStreetMap` geocoder client.
//!
//! Nominatim's public instance allows **1 request per second** and requires
//! an identifying `User-Agent`. Searches are user-triggered, so no client-side
//! throttling is applied here.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use async_trait::async_trait;

use crate::service_registry::GeocodingService;
use crate::{GeocodeError, GeocodedPlace, Geocoder};

/// [`Geocoder`] backed by a Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    format: String,
    limit: String,
}

impl NominatimGeocoder {
    /// Builds a client for the given service definition.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn new(service: &GeocodingService) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(service.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: service.base_url.clone(),
            format: service.format.clone(),
            limit: service.limit.to_string(),
        })
    }

    /// Returns the search endpoint this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
        geocode_freeform(
            &self.client,
            &self.base_url,
            query,
            &self.format,
            &self.limit,
        )
        .await
    }
}

/// Geocodes a free-form query using Nominatim.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn geocode_freeform(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
    format: &str,
    limit: &str,
) -> Result<Option<GeocodedPlace>, GeocodeError> {
    log::debug!("Nominatim search q={query:?}");

    let resp = client
        .get(base_url)
        .query(&[("q", query), ("format", format), ("limit", limit)])
        .send()
        .await?;

    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }
    if !status.is_success() {
        return Err(GeocodeError::Status {
            status: status.as_u16(),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses a Nominatim JSON response, keeping only the first result.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedPlace>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = parse_coordinate(first, "lat")?;
    let lon = parse_coordinate(first, "lon")?;

    let display_name = first["display_name"]
        .as_str()
        .map(String::from)
        .unwrap_or_default();

    Ok(Some(GeocodedPlace {
        latitude: lat,
        longitude: lon,
        display_name,
    }))
}

/// Nominatim encodes coordinates as decimal strings.
fn parse_coordinate(result: &serde_json::Value, field: &str) -> Result<f64, GeocodeError> {
    result[field]
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::Parse {
            message: format!("Missing or invalid {field} in Nominatim response"),
        })
}
