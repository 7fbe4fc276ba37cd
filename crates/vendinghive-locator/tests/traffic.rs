//! Integration tests for `TrafficScorer::estimate` with mocked Overpass
//! count queries. Each signal query is keyed on a distinctive substring of
//! its QL body.

use serde_json::json;
use wiremock::matchers::{any, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vendinghive_locator::{Coordinate, LocatorConfig, OverpassClient, TrafficLevel, TrafficScorer};

const COORD: Coordinate = Coordinate {
    lat: 34.0901,
    lon: -118.4065,
};

fn test_scorer(server: &MockServer) -> TrafficScorer {
    let config = LocatorConfig {
        request_timeout_secs: 5,
        overpass_base_url: server.uri(),
        ..LocatorConfig::default()
    };
    TrafficScorer::new(OverpassClient::new(&config).expect("failed to build OverpassClient"))
}

/// A response body with `n` anonymous point elements.
fn count_body(n: usize) -> serde_json::Value {
    let elements: Vec<serde_json::Value> = (0..n)
        .map(|i| json!({ "type": "node", "id": i, "lat": 34.09, "lon": -118.40 }))
        .collect();
    json!({ "elements": elements })
}

async fn mount_counts(server: &MockServer, transit: usize, residential: usize, commercial: usize) {
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("public_transport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(count_body(transit)))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("apartments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(count_body(residential)))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains(r#"node["shop"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(count_body(commercial)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn dense_area_with_high_traffic_category_scores_high() {
    let server = MockServer::start().await;
    // transit 5→3, residential 25→2, commercial 20→3, "mall"→2: total 10.
    mount_counts(&server, 5, 25, 20).await;

    let level = test_scorer(&server).estimate(COORD, "mall").await;
    assert_eq!(level, TrafficLevel::High);
}

#[tokio::test]
async fn mid_density_area_scores_moderate() {
    let server = MockServer::start().await;
    // transit 3→3, residential 0→0, commercial 0→0, "gym"→1: total 4.
    mount_counts(&server, 3, 0, 0).await;

    let level = test_scorer(&server).estimate(COORD, "gym").await;
    assert_eq!(level, TrafficLevel::Moderate);
}

#[tokio::test]
async fn quiet_area_scores_low() {
    let server = MockServer::start().await;
    mount_counts(&server, 0, 2, 1).await;

    let level = test_scorer(&server).estimate(COORD, "warehouse").await;
    assert_eq!(level, TrafficLevel::Low);
}

#[tokio::test]
async fn transit_sub_score_is_capped_at_three() {
    let server = MockServer::start().await;
    // 100 transit nodes still only contribute 3; with everything else zero
    // and no category keyword the total stays below the Moderate cutoff.
    mount_counts(&server, 100, 0, 0).await;

    let level = test_scorer(&server).estimate(COORD, "warehouse").await;
    assert_eq!(level, TrafficLevel::Low);
}

#[tokio::test]
async fn failed_queries_contribute_zero_and_floor_at_low() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // Even a high-traffic category alone (2) cannot reach Moderate.
    let level = test_scorer(&server).estimate(COORD, "shopping mall").await;
    assert_eq!(level, TrafficLevel::Low);
}

#[tokio::test]
async fn increasing_commercial_count_never_lowers_the_level() {
    let server = MockServer::start().await;
    mount_counts(&server, 2, 15, 4).await;
    let sparse = test_scorer(&server).estimate(COORD, "office").await;
    server.reset().await;

    mount_counts(&server, 2, 15, 16).await;
    let dense = test_scorer(&server).estimate(COORD, "office").await;

    assert!(dense >= sparse, "monotonicity violated: {sparse:?} -> {dense:?}");
    // transit 2, residential 15→1, commercial 4→1, office→1: total 5.
    assert_eq!(sparse, TrafficLevel::Moderate);
    // commercial 16→3 lifts the total to 7.
    assert_eq!(dense, TrafficLevel::High);
}
