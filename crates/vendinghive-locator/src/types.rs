//! Domain types for the location discovery pipeline.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair as returned by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Ordinal foot-traffic estimate for a candidate venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrafficLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrafficLevel::Low => write!(f, "Low"),
            TrafficLevel::Moderate => write!(f, "Moderate"),
            TrafficLevel::High => write!(f, "High"),
        }
    }
}

/// A candidate vending-machine placement venue.
///
/// `phone` and `email` are empty strings when the source data has no
/// contact tags. `foot_traffic` is only populated by the text-search
/// fallback path; the primary taxonomy path leaves it `None`, matching
/// the asymmetric output schema of the original service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub category: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub phone: String,
    pub email: String,
    pub business_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foot_traffic: Option<TrafficLevel>,
}

/// The vending/amusement equipment categories the UI exposes.
///
/// Unrecognised names map to [`MachineType::Other`], which carries the
/// default tag taxonomy rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineType {
    SnackAndDrink,
    ClawMachine,
    CottonCandy,
    HotDog,
    FreshFoodMarket,
    Other,
}

impl MachineType {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Snack & Drink Machines" => MachineType::SnackAndDrink,
            "Claw Machine" => MachineType::ClawMachine,
            "Cotton Candy Machines" => MachineType::CottonCandy,
            "Hot Dog Vending" => MachineType::HotDog,
            "Fresh Food Market Machines" => MachineType::FreshFoodMarket,
            _ => MachineType::Other,
        }
    }
}
