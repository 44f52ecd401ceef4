use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_catalog_lists_models_in_display_order() {
    let app = echo_app();

    let (status, body) = get(&app, "/api/leads/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["car_models"],
        json!([
            "Maruti Suzuki",
            "Toyota Corolla",
            "Honda City",
            "Hyundai Creta",
            "Mahindra Thar",
            "Tata Safari",
            "Ford Figo",
            "Chevrolet Beat"
        ])
    );
}

#[tokio::test]
async fn test_health_reports_live_strategy() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["strategy"], "live");
    assert_eq!(body["calls_in_flight"], 0);
}

#[tokio::test]
async fn test_health_reports_echo_strategy() {
    let app = echo_app();

    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["strategy"], "echo");
}

#[tokio::test]
async fn test_docs_are_served() {
    let app = echo_app();

    let (status, _) = get(&app, "/docs").await;
    assert_eq!(status, StatusCode::OK);
}
