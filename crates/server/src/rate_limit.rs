use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared_types::{AppError, RateLimitConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

pub const RATE_LIMITED_MESSAGE: &str = "Too many call requests. Please try again later.";

/// Sliding window rate limit state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<RateLimitInner>>,
}

struct RateLimitInner {
    /// Map from client key -> list of request timestamps.
    requests: HashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimitState {
    /// Create rate limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimitInner {
                requests: HashMap::new(),
                max_requests,
                window,
            })),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(
            config.max_requests,
            Duration::from_secs(config.window_seconds),
        )
    }

    /// Record a request from `key`. Returns false once the window is full.
    pub fn check(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let window = inner.window;
        let max = inner.max_requests;

        // Drop keys whose timestamps have all aged out.
        inner
            .requests
            .retain(|_, stamps| stamps.last().is_some_and(|t| now.duration_since(*t) < window));

        let timestamps = inner.requests.entry(key.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() as u32 >= max {
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Count one request from the client behind `headers`.
    pub fn admit(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let key = client_key(headers);
        if self.check(&key) {
            return Ok(());
        }
        tracing::warn!(client = %key, "Call rate limit exceeded");
        Err(AppError::rate_limited(RATE_LIMITED_MESSAGE))
    }
}

static LIMITER: OnceLock<RateLimitState> = OnceLock::new();

/// Process-wide limiter shared by the REST route and the `initiate_call`
/// server function, so both draw on one budget per client.
pub fn limiter() -> RateLimitState {
    LIMITER
        .get_or_init(|| RateLimitState::from_config(&crate::config::app_config().rate_limit))
        .clone()
}

/// Client key: first `X-Forwarded-For` address, else a shared bucket.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("anonymous")
        .to_string()
}

/// Axum middleware that enforces the per-client call limit.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(e) = state.admit(request.headers()) {
        return e.into_response();
    }

    next.run(request).await
}
