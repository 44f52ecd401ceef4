use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use shared_types::{
    AppError, AppErrorKind, CallOutcome, CallPayload, CallUserData, CarModel, CatalogResponse,
    LeadCallForm,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::dispatch::CallDispatcher;
use crate::health::{self, HealthResponse};
use crate::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::rest::{self, AppState};

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::initiate_call,
        rest::catalog,
        health::health_check,
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        CallOutcome,
        CallPayload,
        CallUserData,
        CarModel,
        CatalogResponse,
        LeadCallForm,
        HealthResponse,
    )),
    tags(
        (name = "leads", description = "Lead capture and outbound calls"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Leadline API",
        description = "Capture sales leads and hand them to an AI calling agent",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// REST routes, health check and API docs. Only the call route is rate
/// limited.
pub fn api_router(dispatcher: Arc<CallDispatcher>, limiter: RateLimitState) -> Router {
    let state = AppState::new(dispatcher);

    let call_route = Router::new()
        .route("/api/leads/call", post(rest::initiate_call))
        .route_layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ));

    Router::new()
        .merge(call_route)
        .route("/api/leads/catalog", get(rest::catalog))
        .route("/health", get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
