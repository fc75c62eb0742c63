//! Wizard tests against a mock canteen search endpoint.

use std::time::Duration;

use mensa_core::{CanteenId, ZoneConfig};
use mensa_menu::MensaClient;
use mensa_setup::{FlowError, SetupFlow, ZoneRegistry};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn zones() -> ZoneRegistry {
    ZoneRegistry::new(vec![
        ZoneConfig {
            entity_id: "zone.home".to_string(),
            name: "Home".to_string(),
            latitude: Some(51.34),
            longitude: Some(12.37),
        },
        ZoneConfig {
            entity_id: "zone.nowhere".to_string(),
            name: "Nowhere".to_string(),
            latitude: None,
            longitude: None,
        },
    ])
}

fn flow(uri: &str) -> SetupFlow {
    let client = MensaClient::new(uri, Duration::from_millis(500)).unwrap();
    SetupFlow::new(client, zones())
}

#[tokio::test]
async fn test_submit_zone_lists_canteens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens"))
        .and(query_param("near[lat]", "51.34"))
        .and(query_param("near[lng]", "12.37"))
        .and(query_param("near[dist]", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 63, "name": "Mensa am Park", "city": "Leipzig", "address": "Universitätsstraße 5", "coordinates": [51.3326, 12.3807]},
            {"id": 64, "name": "Mensa Academica", "city": "Leipzig", "address": "Philipp-Rosenthal-Straße 55", "coordinates": null}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let choice = flow(&mock_server.uri())
        .submit_zone("zone.home", 5)
        .await
        .unwrap();

    assert_eq!(choice.zone(), "zone.home");
    assert_eq!(choice.radius_km(), 5);
    assert_eq!(
        choice.options(),
        vec![
            (CanteenId::from(63), "Mensa am Park (Leipzig)".to_string()),
            (CanteenId::from(64), "Mensa Academica (Leipzig)".to_string()),
        ]
    );

    let entry = choice
        .select(&CanteenId::from(64), &[CanteenId::from(63)])
        .unwrap();
    assert_eq!(entry.title, "Mensa Academica");
    assert_eq!(entry.zone, "zone.home");
}

#[tokio::test]
async fn test_submit_zone_validation_order() {
    let mock_server = MockServer::start().await;

    // None of these may reach the server
    Mock::given(method("GET"))
        .and(path("/canteens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let flow = flow(&mock_server.uri());

    let err = flow.submit_zone("zone.unknown", 0).await.unwrap_err();
    assert_eq!(err, FlowError::InvalidRadius(0));

    let err = flow.submit_zone("zone.home", 101).await.unwrap_err();
    assert_eq!(err.key(), "invalid_radius");

    let err = flow.submit_zone("zone.unknown", 10).await.unwrap_err();
    assert_eq!(err, FlowError::ZoneNotFound("zone.unknown".to_string()));

    let err = flow.submit_zone("zone.nowhere", 10).await.unwrap_err();
    assert_eq!(err.key(), "zone_has_no_location");
}

#[tokio::test]
async fn test_submit_zone_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let err = flow(&mock_server.uri())
        .submit_zone("zone.home", 100)
        .await
        .unwrap_err();
    assert_eq!(err, FlowError::NoCanteensFound);
}

#[tokio::test]
async fn test_submit_zone_search_failure_reads_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = flow(&mock_server.uri())
        .submit_zone("zone.home", 1)
        .await
        .unwrap_err();
    assert_eq!(err.key(), "no_canteens_found");
}
