use axum::http::HeaderMap;
use shared_types::{AppError, CallMode, CallOutcome, LeadCallForm};
use std::sync::{Arc, OnceLock};

use crate::caller::{CallStrategy, SubmissionStrategy};
use crate::inflight::InFlightCalls;
use crate::rate_limit::RateLimitState;

/// Message returned while a call to the same number is still running.
pub const DUPLICATE_CALL_MESSAGE: &str = "A call to this number is already being placed";

/// Validates lead forms and hands them to the active submission strategy.
#[derive(Debug)]
pub struct CallDispatcher {
    strategy: CallStrategy,
    in_flight: InFlightCalls,
}

impl CallDispatcher {
    pub fn new(strategy: CallStrategy) -> Self {
        Self {
            strategy,
            in_flight: InFlightCalls::new(),
        }
    }

    /// Build from `config.toml` and the environment.
    pub fn from_config() -> Self {
        let config = crate::config::app_config();
        let settings = crate::config::caller_settings_from_env(&config.caller);
        let strategy = CallStrategy::select(settings, config.features.echo_submissions);
        tracing::info!(strategy = strategy.name(), "Call dispatcher ready");
        Self::new(strategy)
    }

    pub fn mode(&self) -> CallMode {
        self.strategy.mode()
    }

    pub fn in_flight(&self) -> &InFlightCalls {
        &self.in_flight
    }

    /// Charge the caller's rate limit, then [`dispatch`](Self::dispatch).
    ///
    /// Entry points without the REST middleware in front of them go
    /// through here.
    pub async fn dispatch_limited(
        &self,
        limiter: &RateLimitState,
        headers: &HeaderMap,
        form: &LeadCallForm,
    ) -> Result<CallOutcome, AppError> {
        limiter.admit(headers)?;
        self.dispatch(form).await
    }

    /// Validate `form` and make a single call attempt.
    ///
    /// Invalid input never reaches the calling API. Upstream results,
    /// including rejections, come back as `Ok(CallOutcome)`.
    #[tracing::instrument(skip_all, fields(attempt_id = %uuid::Uuid::new_v4(), strategy = self.strategy.name()))]
    pub async fn dispatch(&self, form: &LeadCallForm) -> Result<CallOutcome, AppError> {
        let request = form.validate_form().inspect_err(|e| {
            tracing::info!(fields = ?e.field_errors.keys().collect::<Vec<_>>(), "Lead form rejected");
        })?;

        let Some(_guard) = self.in_flight.claim(request.phone_number.as_str()) else {
            tracing::warn!(recipient = %request.phone_number, "Duplicate call attempt refused");
            return Err(AppError::conflict(DUPLICATE_CALL_MESSAGE));
        };

        let outcome = self.strategy.submit(&request).await;
        tracing::info!(success = outcome.is_success(), "Call attempt settled");
        Ok(outcome)
    }
}

static DISPATCHER: OnceLock<Arc<CallDispatcher>> = OnceLock::new();

/// Process-wide dispatcher used by server functions, built on first use.
pub fn dispatcher() -> Arc<CallDispatcher> {
    DISPATCHER
        .get_or_init(|| Arc::new(CallDispatcher::from_config()))
        .clone()
}
