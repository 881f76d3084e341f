// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot, with
// upstream weather/geocoding stubbed by a local mock server.
//
// Covered:
// - GET /health
// - GET /locations (happy path, blank query, no results)
// - GET /forecast (happy path, malformed identifier)
// - GET /recommendations (ranking contract, error statuses)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::Request,
    Router,
};
use http::StatusCode;
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use activity_advisor::api::{create_router, AppState};
use activity_advisor::forecast::OpenMeteoForecast;
use activity_advisor::geocode::OpenMeteoGeocoder;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests
const TIMEOUT: Duration = Duration::from_secs(2);

/// Build the same Router the binary uses, pointed at the mock upstream.
fn test_router(upstream: &MockServer) -> Router {
    let state = AppState {
        forecast: Arc::new(OpenMeteoForecast::new(upstream.uri(), 7, TIMEOUT).unwrap()),
        locations: Arc::new(OpenMeteoGeocoder::new(upstream.uri(), TIMEOUT).unwrap()),
    };
    create_router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, v)
}

fn mount_forecast(tmax: f64, precip: f64, wind: f64) -> Mock {
    let n = 7;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily": {
                "time": (1..=n).map(|d| format!("2025-07-{d:02}")).collect::<Vec<_>>(),
                "temperature_2m_max": vec![tmax; n],
                "temperature_2m_min": vec![tmax - 7.0; n],
                "precipitation_sum": vec![precip; n],
                "wind_speed_10m_max": vec![wind; n]
            }
        })))
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let server = MockServer::start().await;
    let app = test_router(&server);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn api_locations_returns_ranked_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "name": "Lisboa", "country": "Portugal", "latitude": 38.72, "longitude": -9.14 }
            ]
        })))
        .mount(&server)
        .await;

    let (status, v) = get_json(test_router(&server), "/locations?query=Lisboa").await;
    assert_eq!(status, StatusCode::OK);
    let arr = v.as_array().expect("locations response must be an array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], json!("Lisboa"));
    assert!(arr[0]["latitude"].is_number() && arr[0]["longitude"].is_number());
}

#[tokio::test]
async fn api_locations_blank_query_is_400() {
    let server = MockServer::start().await;
    let (status, v) = get_json(test_router(&server), "/locations?query=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(v["error"].is_string(), "error body must carry a message");
}

#[tokio::test]
async fn api_locations_no_results_is_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (status, _) = get_json(test_router(&server), "/locations?query=Nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_forecast_returns_window_for_valid_identifier() {
    let server = MockServer::start().await;
    mount_forecast(21.0, 0.3, 14.0).mount(&server).await;

    let (status, v) = get_json(test_router(&server), "/forecast?location=52.52,13.405").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["location"]["latitude"], json!(52.52));
    let days = v["days"].as_array().expect("days must be an array");
    assert_eq!(days.len(), 7);
    assert!(days[0]["date"].is_string());
    assert!(days[0]["temperature_max"].is_number());
    assert!(days[0]["precipitation"].is_number());
    assert!(days[0]["wind_speed_max"].is_number());
}

#[tokio::test]
async fn api_forecast_malformed_identifier_is_400() {
    let server = MockServer::start().await;
    for uri in [
        "/forecast?location=Berlin",
        "/forecast?location=91.0,10.0",
        "/forecast?location=10.0",
    ] {
        let (status, v) = get_json(test_router(&server), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} should be rejected");
        assert!(v["error"].is_string());
    }
}

#[tokio::test]
async fn api_recommendations_ranks_and_recommends() {
    let server = MockServer::start().await;
    // Cold and wet: a textbook skiing week.
    mount_forecast(2.0, 5.0, 15.0).mount(&server).await;

    let (status, v) = get_json(
        test_router(&server),
        "/recommendations?location=46.95,7.45",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(v["recommended"], json!("SKIING"));
    let scores = v["scores"].as_array().expect("scores must be an array");
    assert_eq!(scores.len(), 4);
    assert_eq!(scores[0]["activity"], json!("SKIING"));
    assert_eq!(scores[0]["score"], json!(60));
    // Contract checks for UI consumers.
    for s in scores {
        assert!(s.get("activity").is_some(), "missing 'activity'");
        assert!(s.get("score").is_some(), "missing 'score'");
        assert!(
            s["reason"].as_str().is_some_and(|r| !r.is_empty()),
            "reason must be a non-empty string"
        );
    }
    assert!(v["summary"]["temperature_max"].is_number());
}

#[tokio::test]
async fn api_recommendations_upstream_failure_is_502() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, v) = get_json(
        test_router(&server),
        "/recommendations?location=52.52,13.405",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(v["error"].is_string());
}
