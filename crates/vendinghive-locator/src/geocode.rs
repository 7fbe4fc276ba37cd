//! Nominatim geocoding client: ZIP validation/resolution, reverse lookup,
//! and the proximity text search used by the fallback path.
//!
//! Every public method makes exactly one outbound GET with no retry. The
//! ZIP and fallback surfaces unify all failure modes (timeout, non-2xx,
//! malformed payload, empty result) into `false` / `None` — callers of a
//! best-effort discovery feature cannot distinguish them.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::LocatorConfig;
use crate::error::LocatorError;
use crate::types::Coordinate;

/// Fixed address placeholder when reverse geocoding fails.
pub const ADDRESS_UNAVAILABLE: &str = "Address not available";

/// Client for the Nominatim search and reverse endpoints.
///
/// The base URL comes from [`LocatorConfig`], so tests point it at a
/// wiremock server.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
}

/// One match from the proximity text search.
#[derive(Debug, Clone)]
pub struct GeocodeHit {
    /// Short display name: the first comma-separated segment of
    /// `display_name`.
    pub name: String,
    /// The full `display_name` string from the geocoder.
    pub display_name: String,
    pub coordinate: Coordinate,
}

/// Raw Nominatim search result. `lat`/`lon` arrive as strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResult {
    #[serde(default)]
    display_name: Option<String>,
}

impl GeocodeClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LocatorError::InvalidBaseUrl`] if the
    /// configured geocoder base URL does not parse.
    pub fn new(config: &LocatorConfig) -> Result<Self, LocatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so Url::join appends the
        // endpoint path instead of replacing the last segment.
        let normalised = format!("{}/", config.geocoder_base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| LocatorError::InvalidBaseUrl {
            url: config.geocoder_base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Returns `true` iff the geocoder knows at least one match for the
    /// ZIP code. Any failure is treated as "not valid" (fails closed).
    pub async fn validate_zip(&self, zip: &str) -> bool {
        match self.zip_search(zip).await {
            Ok(results) => !results.is_empty(),
            Err(err) => {
                tracing::warn!(zip, error = %err, "ZIP validation lookup failed; treating as invalid");
                false
            }
        }
    }

    /// Resolves a ZIP code to its first match's coordinates, or `None` on
    /// any failure or empty result.
    pub async fn zip_coordinates(&self, zip: &str) -> Option<Coordinate> {
        let results = match self.zip_search(zip).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(zip, error = %err, "ZIP coordinate lookup failed");
                return None;
            }
        };
        results.first().and_then(parse_coordinate)
    }

    /// Reverse-geocodes a coordinate to a display address, falling back to
    /// [`ADDRESS_UNAVAILABLE`] on any failure.
    pub async fn reverse_lookup(&self, coord: Coordinate) -> String {
        let mut url = self.endpoint("reverse");
        url.query_pairs_mut()
            .append_pair("lat", &coord.lat.to_string())
            .append_pair("lon", &coord.lon.to_string())
            .append_pair("format", "json");

        match self.get_json::<ReverseResult>(url, "reverse lookup").await {
            Ok(result) => result
                .display_name
                .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
            Err(err) => {
                tracing::debug!(error = %err, "reverse lookup failed");
                ADDRESS_UNAVAILABLE.to_string()
            }
        }
    }

    /// Free-text search for a venue type near a coordinate. Returns the
    /// first match, or `None` on any failure or empty result.
    pub async fn search_near(&self, term: &str, coord: Coordinate) -> Option<GeocodeHit> {
        let mut url = self.endpoint("search");
        url.query_pairs_mut()
            .append_pair("q", term)
            .append_pair("format", "json")
            .append_pair("lat", &coord.lat.to_string())
            .append_pair("lon", &coord.lon.to_string())
            .append_pair("radius", "5000")
            .append_pair("limit", "1");

        let results = match self
            .get_json::<Vec<SearchResult>>(url, &format!("search_near({term})"))
            .await
        {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(term, error = %err, "proximity search failed");
                return None;
            }
        };

        let result = results.first()?;
        let coordinate = parse_coordinate(result)?;
        let name = result
            .display_name
            .split(',')
            .next()
            .unwrap_or(&result.display_name)
            .trim()
            .to_string();
        Some(GeocodeHit {
            name,
            display_name: result.display_name.clone(),
            coordinate,
        })
    }

    async fn zip_search(&self, zip: &str) -> Result<Vec<SearchResult>, LocatorError> {
        let mut url = self.endpoint("search");
        url.query_pairs_mut()
            .append_pair("q", &format!("{zip}, USA"))
            .append_pair("format", "json")
            .append_pair("countrycodes", "us")
            .append_pair("limit", "1");
        self.get_json(url, &format!("zip_search({zip})")).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, LocatorError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LocatorError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        // base_url is normalised with a trailing slash; joining a bare
        // segment cannot fail.
        self.base_url.join(path).expect("valid endpoint path")
    }
}

fn parse_coordinate(result: &SearchResult) -> Option<Coordinate> {
    let lat = result.lat.parse::<f64>().ok()?;
    let lon = result.lon.parse::<f64>().ok()?;
    Some(Coordinate { lat, lon })
}
