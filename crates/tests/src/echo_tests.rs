use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::caller::CallStrategy;

use crate::common::*;

#[tokio::test]
async fn test_echo_returns_payload_without_calling_out() {
    let app = echo_app();

    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["status"], "echoed");
    assert_eq!(
        body["payload"],
        json!({
            "agent_id": "",
            "recipient_phone_number": "+916301979823",
            "from_phone_number": "",
            "user_data": {
                "contact_name": "Mr. Raghav Kumar",
                "models_interested": "Honda City, Tata Safari",
                "notes": "Discuss pricing options next week"
            }
        })
    );
}

#[tokio::test]
async fn test_echo_never_reveals_the_agent_id() {
    let fake = FakeCallingApi::accepting().await;
    let strategy = CallStrategy::select(Some(caller_settings(&fake.endpoint, false)), true);
    let app = app_with(strategy, relaxed_limiter());

    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["agent_id"], "");
    assert!(
        !body.to_string().contains(TEST_AGENT_ID),
        "Agent id leaked to the client: {body}"
    );
}

#[tokio::test]
async fn test_echo_still_validates() {
    let app = echo_app();

    let (status, body) = post_json(&app, "/api/leads/call", &json!({ "contact_name": "A" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "ValidationError");
}

#[tokio::test]
async fn test_echo_flag_overrides_live_settings() {
    let fake = FakeCallingApi::accepting().await;
    let strategy = CallStrategy::select(Some(caller_settings(&fake.endpoint, false)), true);
    let app = app_with(strategy, relaxed_limiter());

    let (_, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(body["status"], "echoed");
    assert!(fake.received().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_fall_back_to_echo() {
    let app = app_with(CallStrategy::select(None, false), relaxed_limiter());

    let (_, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(body["status"], "echoed");
    assert_eq!(body["payload"]["agent_id"], "");
}
