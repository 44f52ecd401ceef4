use dioxus::prelude::*;
use shared_types::{CallMode, CallOutcome, FeatureFlags, LeadCallForm};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

/// Get the current feature flags. No auth required, flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Whether this server places real calls or echoes submissions.
#[server]
pub async fn get_call_mode() -> Result<CallMode, ServerFnError> {
    Ok(crate::dispatch::dispatcher().mode())
}

/// Submit a lead and make one call attempt.
///
/// Shares the REST route's per-client rate limit. The form is validated
/// again here; a validation failure comes back as a serialized `AppError`
/// carrying per-field messages.
#[cfg_attr(feature = "server", tracing::instrument(skip(form)))]
#[server]
pub async fn initiate_call(form: LeadCallForm) -> Result<CallOutcome, ServerFnError> {
    let headers = dioxus::fullstack::FullstackContext::current()
        .map(|ctx| {
            let parts = ctx.parts_mut();
            parts.headers.clone()
        })
        .unwrap_or_default();

    crate::dispatch::dispatcher()
        .dispatch_limited(&crate::rate_limit::limiter(), &headers, &form)
        .await
        .map_err(|e| e.into_server_fn_error())
}
