//! Venue discovery: the taxonomy-driven primary search and its fallback
//! chain.
//!
//! [`PlaceFinder::find_places`] never returns an empty list and never
//! surfaces an error. Per-query failures are logged and skipped; a fully
//! empty primary pass runs a text-search fallback; a fully failed fallback
//! returns a single synthetic placeholder record.

use std::time::Duration;

use crate::config::LocatorConfig;
use crate::error::LocatorError;
use crate::extract;
use crate::geocode::GeocodeClient;
use crate::overpass::OverpassClient;
use crate::taxonomy;
use crate::traffic::TrafficScorer;
use crate::types::{Coordinate, MachineType, TrafficLevel, Venue};

/// Hard cap on the number of venues returned per search.
pub const MAX_RESULTS: usize = 10;

/// Raw elements considered per tag-filter query, applied before dedup.
/// Keeps one dense tag (e.g. `amenity=restaurant` downtown) from flooding
/// the result set.
const PER_FILTER_CAP: usize = 2;

const METERS_PER_MILE: u32 = 1609;

/// Text-search terms for the fallback path, tried in order.
const FALLBACK_TERMS: [&str; 5] = ["restaurant", "cafe", "gym", "office", "school"];
const FALLBACK_MAX_RESULTS: usize = 5;

pub struct PlaceFinder {
    geocoder: GeocodeClient,
    overpass: OverpassClient,
    traffic: TrafficScorer,
    inter_query_delay_ms: u64,
}

impl PlaceFinder {
    /// Builds the finder and its underlying clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] or [`LocatorError::InvalidBaseUrl`]
    /// if a client cannot be constructed.
    pub fn new(config: &LocatorConfig) -> Result<Self, LocatorError> {
        let geocoder = GeocodeClient::new(config)?;
        let overpass = OverpassClient::new(config)?;
        let traffic = TrafficScorer::new(overpass.clone());
        Ok(Self {
            geocoder,
            overpass,
            traffic,
            inter_query_delay_ms: config.inter_query_delay_ms,
        })
    }

    /// Finds up to [`MAX_RESULTS`] candidate venues for a machine type
    /// around `coord`, in taxonomy order then discovery order.
    ///
    /// Always returns at least one venue. When the taxonomy queries yield
    /// nothing the text-search fallback runs; its records carry a
    /// foot-traffic level, which the primary records do not.
    pub async fn find_places(
        &self,
        coord: Coordinate,
        machine_type: &str,
        radius_miles: u32,
    ) -> Vec<Venue> {
        let venues = self.taxonomy_search(coord, machine_type, radius_miles).await;
        if venues.is_empty() {
            tracing::warn!(
                machine_type,
                "taxonomy search produced no venues; falling back to text search"
            );
            self.fallback_search(coord).await
        } else {
            venues
        }
    }

    async fn taxonomy_search(
        &self,
        coord: Coordinate,
        machine_type: &str,
        radius_miles: u32,
    ) -> Vec<Venue> {
        let radius_m = radius_miles.saturating_mul(METERS_PER_MILE);
        let filters = taxonomy::tag_filters(MachineType::from_name(machine_type));
        let mut venues: Vec<Venue> = Vec::new();

        for (i, filter) in filters.iter().enumerate() {
            if i > 0 {
                self.pause().await;
            }

            let elements = match self.overpass.features_around(filter, radius_m, coord).await {
                Ok(elements) => elements,
                Err(err) => {
                    tracing::warn!(
                        key = filter.key,
                        value = filter.value,
                        error = %err,
                        "tag query failed; skipping filter"
                    );
                    continue;
                }
            };

            // The per-filter cap counts raw elements, so unnamed or
            // coordinate-less features still consume a slot.
            for element in elements.iter().take(PER_FILTER_CAP) {
                let Some(place_coord) = element.coordinate() else {
                    continue;
                };
                let Some(name) = element.name() else {
                    continue;
                };
                if venues.iter().any(|v| v.name == name) {
                    continue;
                }

                let address = self.geocoder.reverse_lookup(place_coord).await;
                venues.push(Venue {
                    name: name.to_string(),
                    category: taxonomy::category_label(&element.tags).to_string(),
                    address,
                    lat: place_coord.lat,
                    lon: place_coord.lon,
                    phone: extract::phone(&element.tags),
                    email: extract::email(&element.tags),
                    business_hours: extract::business_hours(&element.tags),
                    foot_traffic: None,
                });
            }
        }

        venues.truncate(MAX_RESULTS);
        venues
    }

    /// Text-search fallback: up to one venue per fixed term, each scored
    /// for foot traffic, bottoming out at a synthetic placeholder.
    async fn fallback_search(&self, coord: Coordinate) -> Vec<Venue> {
        let mut venues: Vec<Venue> = Vec::new();

        for (i, term) in FALLBACK_TERMS.iter().enumerate() {
            if venues.len() >= FALLBACK_MAX_RESULTS {
                break;
            }
            if i > 0 {
                self.pause().await;
            }

            let Some(hit) = self.geocoder.search_near(term, coord).await else {
                continue;
            };
            let level = self.traffic.estimate(hit.coordinate, term).await;
            venues.push(Venue {
                name: hit.name,
                category: capitalize(term),
                address: hit.display_name,
                lat: hit.coordinate.lat,
                lon: hit.coordinate.lon,
                phone: String::new(),
                email: String::new(),
                business_hours: extract::DEFAULT_BUSINESS_HOURS.to_string(),
                foot_traffic: Some(level),
            });
        }

        if venues.is_empty() {
            tracing::warn!("fallback search produced no venues; returning placeholder record");
            vec![placeholder_venue(coord)]
        } else {
            venues
        }
    }

    async fn pause(&self) {
        if self.inter_query_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.inter_query_delay_ms)).await;
        }
    }
}

/// Last-resort record guaranteeing the non-empty-result contract.
fn placeholder_venue(coord: Coordinate) -> Venue {
    Venue {
        name: "Local Business District".to_string(),
        category: "Business Area".to_string(),
        address: format!("Near {:.4}, {:.4}", coord.lat, coord.lon),
        lat: coord.lat,
        lon: coord.lon,
        phone: String::new(),
        email: String::new(),
        business_hours: extract::DEFAULT_BUSINESS_HOURS.to_string(),
        foot_traffic: Some(TrafficLevel::Low),
    }
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
