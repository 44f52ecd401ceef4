use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use shared_types::{catalog_labels, AppError, CallOutcome, CatalogResponse, LeadCallForm};
use std::sync::Arc;

use crate::dispatch::CallDispatcher;

/// Shared state for the REST routes.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<CallDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Arc<CallDispatcher>) -> Self {
        Self { dispatcher }
    }
}

// ---------------------------------------------------------------------------
// POST /api/leads/call
// ---------------------------------------------------------------------------

/// Validate a lead and place a single outbound call.
///
/// Rejections from the calling API are reported in the body with
/// `status = "rejected"`; only local problems use an error status.
#[utoipa::path(
    post,
    path = "/api/leads/call",
    request_body = LeadCallForm,
    responses(
        (status = 200, description = "Call attempt made", body = CallOutcome),
        (status = 400, description = "Body is not a JSON lead form", body = AppError),
        (status = 409, description = "A call to this number is already running", body = AppError),
        (status = 422, description = "Form failed validation", body = AppError),
        (status = 429, description = "Too many requests from this client", body = AppError)
    ),
    tag = "leads"
)]
pub async fn initiate_call(
    State(state): State<AppState>,
    body: Result<Json<LeadCallForm>, JsonRejection>,
) -> Result<Json<CallOutcome>, AppError> {
    let Json(form) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let outcome = state.dispatcher.dispatch(&form).await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// GET /api/leads/catalog
// ---------------------------------------------------------------------------

/// List the car models a lead may be interested in.
#[utoipa::path(
    get,
    path = "/api/leads/catalog",
    responses(
        (status = 200, description = "Selectable car models", body = CatalogResponse)
    ),
    tag = "leads"
)]
pub async fn catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        car_models: catalog_labels(),
    })
}
