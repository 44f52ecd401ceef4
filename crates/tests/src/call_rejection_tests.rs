use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use shared_types::REJECTED_FALLBACK_MESSAGE;

use crate::common::*;

#[tokio::test]
async fn test_rejection_carries_upstream_message() {
    let fake = FakeCallingApi::start(400, r#"{"message":"Agent is offline"}"#).await;
    let app = live_app(&fake.endpoint);

    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK, "Upstream rejections are reported in the body");
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["status_code"], 400);
    assert_eq!(body["message"], "Agent is offline");
}

#[tokio::test]
async fn test_rejection_without_message_uses_fallback() {
    let fake = FakeCallingApi::start(503, r#"{"error":"unavailable"}"#).await;
    let app = live_app(&fake.endpoint);

    let (_, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["status_code"], 503);
    assert_eq!(body["message"], REJECTED_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_non_json_reply_is_invalid_response() {
    let fake = FakeCallingApi::start(200, "<html>gateway</html>").await;
    let app = live_app(&fake.endpoint);

    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "invalid_response");
}

#[tokio::test]
async fn test_non_json_error_reply_is_invalid_response() {
    let fake = FakeCallingApi::start(500, "Internal Server Error").await;
    let app = live_app(&fake.endpoint);

    let (_, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(body["status"], "invalid_response");
}

#[tokio::test]
async fn test_unreachable_calling_api_is_failed() {
    let app = live_app("http://127.0.0.1:1/v1/calls");

    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
}
