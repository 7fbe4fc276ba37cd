//! Machine-type tag taxonomy and category labeling rules.
//!
//! Both are declarative tables: the taxonomy maps each machine type to the
//! OSM tag filters that qualify a venue for it, and the label rules turn a
//! raw tag set into one human-readable category string.

use std::collections::HashMap;

use crate::types::MachineType;

/// One OSM tag filter: features carrying `key=value` qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagFilter {
    pub key: &'static str,
    pub value: &'static str,
}

const fn tag(key: &'static str, value: &'static str) -> TagFilter {
    TagFilter { key, value }
}

const SNACK_AND_DRINK: &[TagFilter] = &[
    tag("amenity", "school"),
    tag("amenity", "university"),
    tag("amenity", "hospital"),
    tag("amenity", "office"),
    tag("leisure", "fitness_centre"),
    tag("building", "office"),
];

const CLAW_MACHINE: &[TagFilter] = &[
    tag("amenity", "cinema"),
    tag("amenity", "restaurant"),
    tag("amenity", "fast_food"),
    tag("amenity", "cafe"),
    tag("leisure", "bowling_alley"),
    tag("leisure", "amusement_arcade"),
    tag("shop", "mall"),
];

const COTTON_CANDY: &[TagFilter] = &[
    tag("amenity", "cinema"),
    tag("amenity", "theatre"),
    tag("leisure", "amusement_arcade"),
    tag("leisure", "park"),
    tag("shop", "mall"),
];

const HOT_DOG: &[TagFilter] = &[
    tag("amenity", "university"),
    tag("amenity", "school"),
    tag("amenity", "hospital"),
    tag("leisure", "stadium"),
    tag("leisure", "sports_centre"),
    tag("building", "office"),
];

const FRESH_FOOD_MARKET: &[TagFilter] = &[
    tag("amenity", "hospital"),
    tag("amenity", "university"),
    tag("amenity", "office"),
    tag("building", "office"),
    tag("leisure", "fitness_centre"),
];

/// Taxonomy for machine types without a dedicated table.
const DEFAULT_TAXONOMY: &[TagFilter] = &[
    tag("amenity", "school"),
    tag("amenity", "restaurant"),
    tag("amenity", "cafe"),
    tag("leisure", "fitness_centre"),
    tag("shop", "mall"),
];

/// The tag filters qualifying venues for a machine type, in query order.
///
/// Every machine type maps to a non-empty filter list; unknown types get
/// [`DEFAULT_TAXONOMY`] via [`MachineType::Other`].
#[must_use]
pub fn tag_filters(machine_type: MachineType) -> &'static [TagFilter] {
    match machine_type {
        MachineType::SnackAndDrink => SNACK_AND_DRINK,
        MachineType::ClawMachine => CLAW_MACHINE,
        MachineType::CottonCandy => COTTON_CANDY,
        MachineType::HotDog => HOT_DOG,
        MachineType::FreshFoodMarket => FRESH_FOOD_MARKET,
        MachineType::Other => DEFAULT_TAXONOMY,
    }
}

/// Human-readable category for a feature's tag set. First matching rule
/// wins; anything unmatched is a generic "Business Location".
#[must_use]
pub fn category_label(tags: &HashMap<String, String>) -> &'static str {
    let amenity = tags.get("amenity").map(String::as_str);
    let leisure = tags.get("leisure").map(String::as_str);
    let shop = tags.get("shop").map(String::as_str);

    if amenity == Some("cafe") {
        "Cafe"
    } else if amenity == Some("restaurant") {
        "Restaurant"
    } else if amenity == Some("fast_food") {
        "Fast Food"
    } else if leisure == Some("fitness_centre") {
        "Gym/Fitness Center"
    } else if amenity == Some("school") || amenity == Some("university") {
        "Educational Institution"
    } else if tags.contains_key("office") {
        "Office Building"
    } else if amenity == Some("hospital") {
        "Healthcare Facility"
    } else if shop == Some("mall") {
        "Shopping Mall"
    } else if amenity == Some("cinema") {
        "Cinema"
    } else if leisure == Some("bowling_alley") {
        "Entertainment Venue"
    } else {
        "Business Location"
    }
}
