use shared_types::{
    interpret_response, CallMode, CallOutcome, CallPayload, CallProfile, LeadCallRequest,
};
use std::fmt;
use std::future::Future;

/// Everything needed to reach the calling API.
#[derive(Clone)]
pub struct CallerSettings {
    pub endpoint: String,
    pub api_key: String,
    pub profile: CallProfile,
}

impl fmt::Debug for CallerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallerSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

/// How a validated lead is turned into an outbound call.
pub trait SubmissionStrategy {
    /// Short name reported by the health check and logs.
    fn name(&self) -> &'static str;

    /// Make one best-effort attempt. Never retries.
    fn submit(&self, request: &LeadCallRequest) -> impl Future<Output = CallOutcome> + Send;
}

// ---------------------------------------------------------------------------
// Live
// ---------------------------------------------------------------------------

/// Posts the call payload to the calling API.
#[derive(Debug, Clone)]
pub struct LiveCaller {
    client: reqwest::Client,
    settings: CallerSettings,
}

impl LiveCaller {
    pub fn new(settings: CallerSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &CallerSettings {
        &self.settings
    }
}

impl SubmissionStrategy for LiveCaller {
    fn name(&self) -> &'static str {
        "live"
    }

    #[tracing::instrument(skip_all, fields(recipient = %request.phone_number))]
    async fn submit(&self, request: &LeadCallRequest) -> CallOutcome {
        let payload = CallPayload::build(request, &self.settings.profile);

        let response = match self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, endpoint = %self.settings.endpoint, "Calling API request failed");
                return CallOutcome::Failed;
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, status, "Failed to read calling API response");
                return CallOutcome::InvalidResponse;
            }
        };

        let outcome = interpret_response(status, &body);
        match &outcome {
            CallOutcome::Initiated { execution_id, .. } => {
                tracing::info!(status, execution_id = ?execution_id, "Call initiated");
            }
            CallOutcome::Rejected { message, .. } => {
                tracing::warn!(status, message = %message, "Calling API rejected the call");
            }
            CallOutcome::InvalidResponse => {
                tracing::warn!(status, body = %body, "Calling API returned a non-JSON body");
            }
            CallOutcome::Failed | CallOutcome::Echoed { .. } => {}
        }
        outcome
    }
}

// ---------------------------------------------------------------------------
// Echo
// ---------------------------------------------------------------------------

/// Development stand-in: logs the payload and sends nothing.
///
/// The echoed payload goes back to the browser, so it never carries the
/// agent id.
#[derive(Debug, Clone, Default)]
pub struct EchoCaller {
    profile: CallProfile,
}

impl EchoCaller {
    pub fn new(profile: CallProfile) -> Self {
        Self {
            profile: CallProfile {
                agent_id: String::new(),
                ..profile
            },
        }
    }
}

impl SubmissionStrategy for EchoCaller {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn submit(&self, request: &LeadCallRequest) -> CallOutcome {
        let payload = CallPayload::build(request, &self.profile);
        tracing::info!(
            payload = %serde_json::to_string(&payload).unwrap_or_default(),
            "Echoing lead submission"
        );
        CallOutcome::Echoed { payload }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum CallStrategy {
    Live(LiveCaller),
    Echo(EchoCaller),
}

impl CallStrategy {
    /// Pick the strategy for this process. Live calling needs complete
    /// settings and the echo flag switched off.
    pub fn select(settings: Option<CallerSettings>, echo_requested: bool) -> Self {
        match settings {
            Some(settings) if !echo_requested => CallStrategy::Live(LiveCaller::new(settings)),
            Some(settings) => CallStrategy::Echo(EchoCaller::new(settings.profile)),
            None => {
                if !echo_requested {
                    tracing::warn!(
                        "CALLER_API_KEY or CALLER_AGENT_ID not set; submissions will be echoed instead of called"
                    );
                }
                CallStrategy::Echo(EchoCaller::default())
            }
        }
    }
}

impl CallStrategy {
    pub fn mode(&self) -> CallMode {
        match self {
            CallStrategy::Live(_) => CallMode::Live,
            CallStrategy::Echo(_) => CallMode::Echo,
        }
    }
}

impl SubmissionStrategy for CallStrategy {
    fn name(&self) -> &'static str {
        match self {
            CallStrategy::Live(c) => c.name(),
            CallStrategy::Echo(c) => c.name(),
        }
    }

    async fn submit(&self, request: &LeadCallRequest) -> CallOutcome {
        match self {
            CallStrategy::Live(c) => c.submit(request).await,
            CallStrategy::Echo(c) => c.submit(request).await,
        }
    }
}
