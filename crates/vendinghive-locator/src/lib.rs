//! Location discovery pipeline for VendingHive.
//!
//! Resolves a US ZIP code to coordinates, queries OpenStreetMap data
//! (Nominatim + Overpass) for venues matching a machine-type tag taxonomy,
//! and scores candidate spots by estimated foot traffic.
//!
//! The discovery surface is deliberately fail-soft: [`PlaceFinder::find_places`]
//! always returns at least one venue, degrading through a text-search fallback
//! down to a synthetic placeholder record when every upstream call fails.

pub mod config;
pub mod error;
pub mod extract;
pub mod geocode;
pub mod overpass;
pub mod places;
pub mod taxonomy;
pub mod traffic;
pub mod types;

pub use config::LocatorConfig;
pub use error::LocatorError;
pub use geocode::GeocodeClient;
pub use overpass::OverpassClient;
pub use places::PlaceFinder;
pub use traffic::TrafficScorer;
pub use types::{Coordinate, MachineType, TrafficLevel, Venue};
