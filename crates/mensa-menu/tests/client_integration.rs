//! Integration tests for MensaClient using wiremock.

use std::time::Duration;

use chrono::NaiveDate;
use mensa_menu::{CanteenId, DayMenu, FetchError, MensaClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn client(server: &MockServer) -> MensaClient {
    MensaClient::new(&server.uri(), Duration::from_millis(500)).unwrap()
}

#[tokio::test]
async fn test_fetch_day_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens/1/days/2026-10-19/meals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "name": "Spaghetti Bolognese",
                "category": "Hauptgericht",
                "prices": {"students": 2.5, "employees": 4.1, "pupils": null, "others": 5.0},
                "notes": ["Rind"]
            },
            {"id": 2, "name": "Gemüsecurry", "category": "Vegan", "prices": {}, "notes": []}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let menu = client(&mock_server)
        .fetch_day(&CanteenId::from(1), day())
        .await
        .unwrap();

    let meals = menu.meals();
    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0].name, "Spaghetti Bolognese");
    assert_eq!(meals[0].category(), Some("Hauptgericht"));
    assert_eq!(meals[0].extra["prices"]["students"], serde_json::json!(2.5));
    assert_eq!(meals[1].name, "Gemüsecurry");
}

#[tokio::test]
async fn test_fetch_day_empty_list_is_open() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens/1/days/2026-10-19/meals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let menu = client(&mock_server)
        .fetch_day(&CanteenId::from(1), day())
        .await
        .unwrap();

    assert_eq!(menu, DayMenu::Open(vec![]));
    assert!(menu.is_closed());
}

#[tokio::test]
async fn test_fetch_day_not_found_is_closed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens/1/days/2026-10-19/meals"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let menu = client(&mock_server)
        .fetch_day(&CanteenId::from(1), day())
        .await
        .unwrap();

    assert_eq!(menu, DayMenu::Closed);
}

#[tokio::test]
async fn test_fetch_day_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens/1/days/2026-10-19/meals"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // No retries
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_day(&CanteenId::from(1), day())
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Http { status: 503 });
}

#[tokio::test]
async fn test_fetch_day_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens/1/days/2026-10-19/meals"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_day(&CanteenId::from(1), day())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_day_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens/1/days/2026-10-19/meals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_day(&CanteenId::from(1), day())
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Timeout);
}

#[tokio::test]
async fn test_fetch_day_unreachable() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = MensaClient::new(&uri, Duration::from_millis(500)).unwrap();
    let err = client
        .fetch_day(&CanteenId::from(1), day())
        .await
        .unwrap_err();

    assert!(err.is_transport(), "expected transport error, got {:?}", err);
}

#[tokio::test]
async fn test_canteens_near() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens"))
        .and(query_param("near[lat]", "52.52"))
        .and(query_param("near[lng]", "13.4"))
        .and(query_param("near[dist]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Mensa Nord", "city": "Berlin", "address": "Hannoversche Str. 7", "coordinates": [52.5297, 13.3807]},
            {"id": 2, "name": "Mensa Süd", "city": "Berlin", "address": "Unter den Linden 6", "coordinates": null}
        ])))
        .mount(&mock_server)
        .await;

    let canteens = client(&mock_server)
        .canteens_near(52.52, 13.4, 10)
        .await
        .unwrap();

    assert_eq!(canteens.len(), 2);
    assert_eq!(canteens[0].id, CanteenId::from(1));
    assert_eq!(canteens[0].label(), "Mensa Nord (Berlin)");
    assert!(canteens[1].coordinates.is_none());
}

#[tokio::test]
async fn test_canteens_near_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .canteens_near(52.52, 13.4, 10)
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Http { status: 500 });
}

#[tokio::test]
async fn test_fetch_day_text_id_stays_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/canteens/mensa%2Fnord/days/2026-10-19/meals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Linsensuppe", "category": "Suppe", "prices": {}, "notes": []}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let menu = client(&mock_server)
        .fetch_day(&CanteenId::new("mensa/nord"), day())
        .await
        .unwrap();

    assert_eq!(menu.meals()[0].name, "Linsensuppe");
}
