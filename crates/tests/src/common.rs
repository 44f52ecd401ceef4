use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use server::caller::{CallStrategy, CallerSettings, EchoCaller, LiveCaller};
use server::dispatch::CallDispatcher;
use server::openapi::api_router;
use server::rate_limit::RateLimitState;
use shared_types::CallProfile;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_AGENT_ID: &str = "agent-under-test";

/// A request the fake calling API received.
#[derive(Debug, Clone)]
pub struct ReceivedCall {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    reply: String,
    delay: Duration,
    received: Arc<Mutex<Vec<ReceivedCall>>>,
}

/// Stand-in for the external calling API, bound to an ephemeral port.
pub struct FakeCallingApi {
    pub endpoint: String,
    received: Arc<Mutex<Vec<ReceivedCall>>>,
}

impl FakeCallingApi {
    /// Answer every call with `status` and the raw `reply` body.
    pub async fn start(status: u16, reply: &str) -> Self {
        Self::start_with_delay(status, reply, Duration::ZERO).await
    }

    /// Like [`FakeCallingApi::start`], holding each response for `delay`.
    pub async fn start_with_delay(status: u16, reply: &str, delay: Duration) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status: StatusCode::from_u16(status).expect("valid status code"),
            reply: reply.to_string(),
            delay,
            received: received.clone(),
        };

        let app = Router::new()
            .route("/v1/calls", post(fake_call))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake calling API");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake calling API crashed");
        });

        Self {
            endpoint: format!("http://{addr}/v1/calls"),
            received,
        }
    }

    /// Accepting reply in the shape the real API uses.
    pub async fn accepting() -> Self {
        Self::start(
            200,
            &json!({ "execution_id": "exec-42", "status": "queued" }).to_string(),
        )
        .await
    }

    pub fn received(&self) -> Vec<ReceivedCall> {
        self.received.lock().expect("received lock").clone()
    }
}

async fn fake_call(
    State(state): State<FakeState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
    state
        .received
        .lock()
        .expect("received lock")
        .push(ReceivedCall { authorization, body });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.reply)
}

// ---------------------------------------------------------------------------
// Router builders
// ---------------------------------------------------------------------------

pub fn caller_settings(endpoint: &str, include_preferred_time: bool) -> CallerSettings {
    CallerSettings {
        endpoint: endpoint.to_string(),
        api_key: TEST_API_KEY.to_string(),
        profile: CallProfile {
            agent_id: TEST_AGENT_ID.to_string(),
            from_phone_number: String::new(),
            include_preferred_time,
        },
    }
}

/// Generous limiter so only the rate limit tests ever hit it.
pub fn relaxed_limiter() -> RateLimitState {
    RateLimitState::new(1000, Duration::from_secs(60))
}

pub fn app_with(strategy: CallStrategy, limiter: RateLimitState) -> Router {
    api_router(Arc::new(CallDispatcher::new(strategy)), limiter)
}

/// Router placing live calls against `endpoint`.
pub fn live_app(endpoint: &str) -> Router {
    app_with(
        CallStrategy::Live(LiveCaller::new(caller_settings(endpoint, false))),
        relaxed_limiter(),
    )
}

/// Router that echoes submissions instead of calling out.
pub fn echo_app() -> Router {
    let profile = caller_settings("http://127.0.0.1:1/unused", false).profile;
    app_with(
        CallStrategy::Echo(EchoCaller::new(profile)),
        relaxed_limiter(),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// A complete, valid lead form.
pub fn valid_lead() -> Value {
    json!({
        "contact_name": "Mr. Raghav Kumar",
        "phone_number": "+91 63019 79823",
        "car_models": ["Honda City", "Tata Safari"],
        "notes": "Discuss pricing options next week",
        "preferred_time": "2026-06-15T09:30:00Z"
    })
}

/// POST JSON to a route.
pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// POST JSON to a route as the client at `forwarded_for`.
pub async fn post_json_from(
    app: &Router,
    uri: &str,
    body: &Value,
    forwarded_for: &str,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", forwarded_for)
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// GET a route.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, body)
}
