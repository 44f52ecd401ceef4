use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    CAR_MODELS_MESSAGE, CONTACT_NAME_MESSAGE, PHONE_NUMBER_MESSAGE, PREFERRED_TIME_MESSAGE,
};

use crate::common::*;

#[tokio::test]
async fn test_empty_form_reports_every_required_field() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let (status, body) = post_json(&app, "/api/leads/call", &json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
    assert_eq!(body["kind"], "ValidationError");

    let fields = &body["field_errors"];
    assert_eq!(fields["contact_name"], CONTACT_NAME_MESSAGE);
    assert_eq!(fields["phone_number"], PHONE_NUMBER_MESSAGE);
    assert_eq!(fields["preferred_time"], PREFERRED_TIME_MESSAGE);
    assert!(fields.get("notes").is_none(), "Notes are optional");
    assert!(fields.get("car_models").is_none(), "No models is a valid selection");

    assert!(fake.received().is_empty(), "Invalid leads must not be called");
}

#[tokio::test]
async fn test_blank_contact_name_rejected() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let mut lead = valid_lead();
    lead["contact_name"] = json!("   ");

    let (status, body) = post_json(&app, "/api/leads/call", &lead).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["contact_name"], CONTACT_NAME_MESSAGE);
    assert!(fake.received().is_empty());
}

#[tokio::test]
async fn test_malformed_phone_number_rejected() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    for bad in ["12345", "+91 abc 79823", "phone"] {
        let mut lead = valid_lead();
        lead["phone_number"] = json!(bad);

        let (status, body) = post_json(&app, "/api/leads/call", &lead).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{bad} should be refused");
        assert_eq!(body["field_errors"]["phone_number"], PHONE_NUMBER_MESSAGE);
    }
    assert!(fake.received().is_empty());
}

#[tokio::test]
async fn test_unknown_or_repeated_car_model_rejected() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    for models in [json!(["Tesla Model 3"]), json!(["Honda City", "Honda City"])] {
        let mut lead = valid_lead();
        lead["car_models"] = models.clone();

        let (status, body) = post_json(&app, "/api/leads/call", &lead).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{models} should be refused");
        assert_eq!(body["field_errors"]["car_models"], CAR_MODELS_MESSAGE);
    }
    assert!(fake.received().is_empty());
}

#[tokio::test]
async fn test_unparseable_preferred_time_only_flags_that_field() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let mut lead = valid_lead();
    lead["preferred_time"] = json!("next tuesday-ish");

    let (status, body) = post_json(&app, "/api/leads/call", &lead).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields = body["field_errors"].as_object().expect("field_errors object");
    assert_eq!(fields.len(), 1, "Only preferred_time should fail: {fields:?}");
    assert_eq!(fields["preferred_time"], PREFERRED_TIME_MESSAGE);
}

#[tokio::test]
async fn test_picker_style_time_is_accepted() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let mut lead = valid_lead();
    lead["preferred_time"] = json!("2026-06-15T15:00");

    let (status, body) = post_json(&app, "/api/leads/call", &lead).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(fake.received().len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let fake = FakeCallingApi::accepting().await;
    let app = live_app(&fake.endpoint);

    let (status, body) = post_json(&app, "/api/leads/call", &json!(["not", "a", "form"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
    assert!(fake.received().is_empty());
}
