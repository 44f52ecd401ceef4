use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::dispatch::DUPLICATE_CALL_MESSAGE;
use std::time::Duration;

use crate::common::*;

/// Wait until the fake calling API has seen `count` requests.
async fn wait_for_calls(fake: &FakeCallingApi, count: usize) {
    for _ in 0..200 {
        if fake.received().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("Calling API never received {count} request(s)");
}

#[tokio::test]
async fn test_second_call_to_same_number_is_refused_while_first_runs() {
    let fake = FakeCallingApi::start_with_delay(
        200,
        r#"{"execution_id":"slow"}"#,
        Duration::from_millis(500),
    )
    .await;
    let app = live_app(&fake.endpoint);

    let first = {
        let app = app.clone();
        tokio::spawn(async move { post_json(&app, "/api/leads/call", &valid_lead()).await })
    };
    wait_for_calls(&fake, 1).await;

    // Same number, written differently
    let mut again = valid_lead();
    again["phone_number"] = json!("06301979823");
    let (status, body) = post_json(&app, "/api/leads/call", &again).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");
    assert_eq!(body["message"], DUPLICATE_CALL_MESSAGE);

    let (first_status, first_body) = first.await.expect("first call task");
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(first_body["status"], "initiated");
    assert_eq!(fake.received().len(), 1, "Only the first call reaches the API");
}

#[tokio::test]
async fn test_number_is_released_after_the_call_settles() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let (status, _) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(fake.received().len(), 2);
}

#[tokio::test]
async fn test_failed_call_also_releases_the_number() {
    let app = live_app("http://127.0.0.1:1/v1/calls");

    let (_, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(body["status"], "failed");
    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK, "Retry must not be treated as a duplicate");
    assert_eq!(body["status"], "failed");
}
