//! Overpass API client for spatial feature queries.
//!
//! Two query shapes: a node+way feature query with `out center;` (venue
//! discovery) and a union count query over raw selector fragments (traffic
//! scoring). Queries are Overpass QL posted to `/api/interpreter`.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::LocatorConfig;
use crate::error::LocatorError;
use crate::taxonomy::TagFilter;
use crate::types::Coordinate;

/// Embedded query timeout for feature queries, seconds.
const FEATURE_QUERY_TIMEOUT_SECS: u32 = 25;
/// Embedded query timeout for count queries, seconds.
const COUNT_QUERY_TIMEOUT_SECS: u32 = 15;

#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    interpreter_url: Url,
}

/// A point or way feature returned by Overpass.
///
/// Node features carry `lat`/`lon` directly; way features queried with
/// `out center;` carry a `center` sub-object instead.
#[derive(Debug, Clone, Deserialize)]
pub struct OsmElement {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<ElementCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ElementCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OsmElement>,
}

impl OsmElement {
    /// Representative coordinate: the element's own point location if
    /// present, else the centroid Overpass computed for area features.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate { lat, lon }),
            _ => self.center.map(|c| Coordinate {
                lat: c.lat,
                lon: c.lon,
            }),
        }
    }

    /// The feature's human-readable name, if tagged.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str).filter(|n| !n.is_empty())
    }
}

impl OverpassClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LocatorError::InvalidBaseUrl`] if the
    /// configured Overpass base URL does not parse.
    pub fn new(config: &LocatorConfig) -> Result<Self, LocatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        let normalised = format!(
            "{}/api/interpreter",
            config.overpass_base_url.trim_end_matches('/')
        );
        let interpreter_url =
            Url::parse(&normalised).map_err(|e| LocatorError::InvalidBaseUrl {
                url: config.overpass_base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            interpreter_url,
        })
    }

    /// Queries point and area features carrying `filter` within `radius_m`
    /// metres of `coord`, in Overpass discovery order.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::Http`] on network failure.
    /// - [`LocatorError::UnexpectedStatus`] on a non-2xx response.
    /// - [`LocatorError::Deserialize`] if the body is not a valid Overpass
    ///   JSON envelope.
    pub async fn features_around(
        &self,
        filter: &TagFilter,
        radius_m: u32,
        coord: Coordinate,
    ) -> Result<Vec<OsmElement>, LocatorError> {
        let query = feature_query(filter, radius_m, coord);
        let response = self
            .run_query(&query, &format!("{}={}", filter.key, filter.value))
            .await?;
        Ok(response.elements)
    }

    /// Counts features matching any of the raw `selectors` within
    /// `radius_m` metres of `coord`.
    ///
    /// Selectors are bare QL fragments such as `node["shop"]`; the
    /// around-clause is appended here.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::features_around`].
    pub async fn count_around(
        &self,
        selectors: &[&str],
        radius_m: u32,
        coord: Coordinate,
    ) -> Result<usize, LocatorError> {
        let query = count_query(selectors, radius_m, coord);
        let response = self.run_query(&query, "count query").await?;
        Ok(response.elements.len())
    }

    async fn run_query(
        &self,
        query: &str,
        context: &str,
    ) -> Result<OverpassResponse, LocatorError> {
        let response = self
            .client
            .post(self.interpreter_url.clone())
            .body(query.to_owned())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.interpreter_url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LocatorError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn feature_query(filter: &TagFilter, radius_m: u32, coord: Coordinate) -> String {
    format!(
        "[out:json][timeout:{timeout}];\n(\n  node[\"{key}\"=\"{value}\"](around:{radius_m},{lat},{lon});\n  way[\"{key}\"=\"{value}\"](around:{radius_m},{lat},{lon});\n);\nout center meta;",
        timeout = FEATURE_QUERY_TIMEOUT_SECS,
        key = filter.key,
        value = filter.value,
        lat = coord.lat,
        lon = coord.lon,
    )
}

fn count_query(selectors: &[&str], radius_m: u32, coord: Coordinate) -> String {
    let mut query = format!("[out:json][timeout:{COUNT_QUERY_TIMEOUT_SECS}];\n(\n");
    for selector in selectors {
        let _ = writeln!(
            query,
            "  {selector}(around:{radius_m},{lat},{lon});",
            lat = coord.lat,
            lon = coord.lon,
        );
    }
    query.push_str(");\nout;");
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COORD: Coordinate = Coordinate {
        lat: 34.09,
        lon: -118.41,
    };

    #[test]
    fn feature_query_includes_node_and_way_selectors() {
        let filter = TagFilter {
            key: "amenity",
            value: "cinema",
        };
        let query = feature_query(&filter, 8045, TEST_COORD);
        assert!(query.contains("node[\"amenity\"=\"cinema\"](around:8045,34.09,-118.41);"));
        assert!(query.contains("way[\"amenity\"=\"cinema\"](around:8045,34.09,-118.41);"));
        assert!(query.contains("[out:json][timeout:25];"));
        assert!(query.ends_with("out center meta;"));
    }

    #[test]
    fn count_query_unions_all_selectors() {
        let selectors = [r#"node["public_transport"]"#, r#"node["railway"="station"]"#];
        let query = count_query(&selectors, 500, TEST_COORD);
        assert!(query.contains(r#"node["public_transport"](around:500,34.09,-118.41);"#));
        assert!(query.contains(r#"node["railway"="station"](around:500,34.09,-118.41);"#));
        assert!(query.contains("[out:json][timeout:15];"));
    }

    #[test]
    fn element_coordinate_prefers_own_point_location() {
        let element = OsmElement {
            lat: Some(1.0),
            lon: Some(2.0),
            center: Some(ElementCenter { lat: 9.0, lon: 9.0 }),
            tags: HashMap::new(),
        };
        let coord = element.coordinate().unwrap();
        assert!((coord.lat - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn element_coordinate_falls_back_to_center() {
        let element = OsmElement {
            lat: None,
            lon: None,
            center: Some(ElementCenter { lat: 9.0, lon: 8.0 }),
            tags: HashMap::new(),
        };
        let coord = element.coordinate().unwrap();
        assert!((coord.lon - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn element_without_location_has_no_coordinate() {
        let element = OsmElement {
            lat: None,
            lon: None,
            center: None,
            tags: HashMap::new(),
        };
        assert!(element.coordinate().is_none());
    }

    #[test]
    fn element_name_ignores_empty_tag() {
        let mut tags = HashMap::new();
        tags.insert("name".to_string(), String::new());
        let element = OsmElement {
            lat: Some(0.0),
            lon: Some(0.0),
            center: None,
            tags,
        };
        assert!(element.name().is_none());
    }
}
