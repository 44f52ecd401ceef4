use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::caller::{CallStrategy, LiveCaller};

use crate::common::*;

#[tokio::test]
async fn test_initiate_call_posts_payload_to_calling_api() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK, "Expected 200, got body: {body}");
    assert_eq!(body["status"], "initiated");
    assert_eq!(body["execution_id"], "exec-42");
    assert_eq!(body["call_status"], "queued");

    let received = fake.received();
    assert_eq!(received.len(), 1, "Calling API should see exactly one request");
    assert_eq!(
        received[0].body,
        json!({
            "agent_id": TEST_AGENT_ID,
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
async fn test_initiate_call_sends_bearer_token() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let (status, _) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);

    let received = fake.received();
    assert_eq!(
        received[0].authorization.as_deref(),
        Some(format!("Bearer {TEST_API_KEY}").as_str())
    );
}

#[tokio::test]
async fn test_national_number_gets_default_country_code() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let mut lead = valid_lead();
    lead["phone_number"] = json!("063019 79823");

    let (status, _) = post_json(&app, "/api/leads/call", &lead).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fake.received()[0].body["recipient_phone_number"],
        "+916301979823"
    );
}

#[tokio::test]
async fn test_models_keep_selection_order() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let mut lead = valid_lead();
    lead["car_models"] = json!(["Tata Safari", "Maruti Suzuki", "Honda City"]);

    let (status, _) = post_json(&app, "/api/leads/call", &lead).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fake.received()[0].body["user_data"]["models_interested"],
        "Tata Safari, Maruti Suzuki, Honda City"
    );
}

#[tokio::test]
async fn test_preferred_time_forwarded_when_enabled() {
    let fake = FakeCallingApi::accepting().await;
    let app = app_with(
        CallStrategy::Live(LiveCaller::new(caller_settings(&fake.endpoint, true))),
        relaxed_limiter(),
    );

    let (status, _) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fake.received()[0].body["user_data"]["preferred_time"],
        "2026-06-15T09:30:00+00:00"
    );
}

#[tokio::test]
async fn test_preferred_time_omitted_by_default() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let (status, _) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);
    let user_data = &fake.received()[0].body["user_data"];
    assert!(
        user_data.get("preferred_time").is_none(),
        "preferred_time should not be sent: {user_data}"
    );
}

#[tokio::test]
async fn test_empty_success_body_still_initiates() {
    let fake = FakeCallingApi::start(201, "{}").await;
    let app = live_app(&fake.endpoint);

    let (status, body) = post_json(&app, "/api/leads/call", &valid_lead()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "initiated" }));
}
