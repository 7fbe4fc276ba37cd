//! Heuristic foot-traffic scoring.
//!
//! Combines three Overpass count queries (transit, residential density,
//! commercial density) with a static category keyword score into a single
//! ordinal level. Every sub-score fails soft: a failed query contributes 0
//! rather than aborting the estimate, so the floor result is always
//! [`TrafficLevel::Low`].

use crate::overpass::OverpassClient;
use crate::types::{Coordinate, TrafficLevel};

const TRANSIT_RADIUS_M: u32 = 500;
const RESIDENTIAL_RADIUS_M: u32 = 800;
const COMMERCIAL_RADIUS_M: u32 = 300;

const TRANSIT_SELECTORS: [&str; 3] = [
    r#"node["public_transport"]"#,
    r#"node["railway"="station"]"#,
    r#"node["amenity"="bus_station"]"#,
];

const RESIDENTIAL_SELECTORS: [&str; 2] = [
    r#"way["building"="residential"]"#,
    r#"way["building"="apartments"]"#,
];

const COMMERCIAL_SELECTORS: [&str; 2] = [
    r#"node["shop"]"#,
    r#"node["amenity"~"^(restaurant|cafe|fast_food|bar)$"]"#,
];

const HIGH_TRAFFIC_KEYWORDS: [&str; 5] = ["mall", "shopping", "restaurant", "fast_food", "cinema"];
const MEDIUM_TRAFFIC_KEYWORDS: [&str; 4] = ["gym", "hospital", "school", "office"];

#[derive(Debug, Clone)]
pub struct TrafficScorer {
    overpass: OverpassClient,
}

impl TrafficScorer {
    #[must_use]
    pub fn new(overpass: OverpassClient) -> Self {
        Self { overpass }
    }

    /// Estimates the foot-traffic level around `coord` for a venue of the
    /// given category. Never fails; degraded data lowers the estimate.
    pub async fn estimate(&self, coord: Coordinate, category: &str) -> TrafficLevel {
        let score = self.transit_score(coord).await
            + self.residential_score(coord).await
            + self.commercial_score(coord).await
            + category_score(category);
        level_for_score(score)
    }

    /// Transit proximity: feature count within 500 m, capped at 3.
    async fn transit_score(&self, coord: Coordinate) -> u32 {
        match self
            .overpass
            .count_around(&TRANSIT_SELECTORS, TRANSIT_RADIUS_M, coord)
            .await
        {
            Ok(count) => u32::try_from(count).unwrap_or(u32::MAX).min(3),
            Err(err) => {
                tracing::debug!(error = %err, "transit proximity query failed");
                0
            }
        }
    }

    /// Residential density: building count within 800 m, bucketed.
    async fn residential_score(&self, coord: Coordinate) -> u32 {
        match self
            .overpass
            .count_around(&RESIDENTIAL_SELECTORS, RESIDENTIAL_RADIUS_M, coord)
            .await
        {
            Ok(count) if count > 20 => 2,
            Ok(count) if count > 10 => 1,
            Ok(_) => 0,
            Err(err) => {
                tracing::debug!(error = %err, "residential density query failed");
                0
            }
        }
    }

    /// Commercial activity: shop/eatery count within 300 m, bucketed.
    async fn commercial_score(&self, coord: Coordinate) -> u32 {
        match self
            .overpass
            .count_around(&COMMERCIAL_SELECTORS, COMMERCIAL_RADIUS_M, coord)
            .await
        {
            Ok(count) if count > 15 => 3,
            Ok(count) if count > 8 => 2,
            Ok(count) if count > 3 => 1,
            Ok(_) => 0,
            Err(err) => {
                tracing::debug!(error = %err, "commercial activity query failed");
                0
            }
        }
    }
}

/// Static category sub-score: 2 for high-traffic venue keywords, 1 for
/// medium, 0 otherwise. Matching is case-insensitive substring containment.
#[must_use]
pub fn category_score(category: &str) -> u32 {
    let lowered = category.to_lowercase();
    if HIGH_TRAFFIC_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        2
    } else if MEDIUM_TRAFFIC_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        1
    } else {
        0
    }
}

/// Maps a total score to its level: >= 7 High, >= 4 Moderate, else Low.
#[must_use]
pub fn level_for_score(score: u32) -> TrafficLevel {
    if score >= 7 {
        TrafficLevel::High
    } else if score >= 4 {
        TrafficLevel::Moderate
    } else {
        TrafficLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_thresholds_partition_exactly_at_4_and_7() {
        assert_eq!(level_for_score(0), TrafficLevel::Low);
        assert_eq!(level_for_score(3), TrafficLevel::Low);
        assert_eq!(level_for_score(4), TrafficLevel::Moderate);
        assert_eq!(level_for_score(6), TrafficLevel::Moderate);
        assert_eq!(level_for_score(7), TrafficLevel::High);
        assert_eq!(level_for_score(10), TrafficLevel::High);
    }

    #[test]
    fn level_is_monotonic_in_score() {
        let mut previous = level_for_score(0);
        for score in 1..12 {
            let level = level_for_score(score);
            assert!(level >= previous, "score {score} lowered the level");
            previous = level;
        }
    }

    #[test]
    fn category_score_matches_keyword_sets() {
        assert_eq!(category_score("Shopping Mall"), 2);
        assert_eq!(category_score("Fast Food"), 0); // "Fast Food" lacks the underscore
        assert_eq!(category_score("fast_food outlet"), 2);
        assert_eq!(category_score("Restaurant"), 2);
        assert_eq!(category_score("Gym/Fitness Center"), 1);
        assert_eq!(category_score("Healthcare Facility"), 0);
        assert_eq!(category_score("hospital wing"), 1);
        assert_eq!(category_score("Business Location"), 0);
    }

    #[test]
    fn category_score_is_case_insensitive() {
        assert_eq!(category_score("CINEMA"), 2);
        assert_eq!(category_score("School"), 1);
    }
}
