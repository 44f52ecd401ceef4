//! Wire contract of the external "initiate call" endpoint and the mapping of
//! its responses onto user-facing notifications.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::LeadCallRequest;

pub const CALL_INITIATED_MESSAGE: &str = "Call initiated successfully!";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from the server.";
pub const REJECTED_FALLBACK_MESSAGE: &str = "Failed to initiate call.";
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to submit the form. Please try again.";

/// Identity the call is placed under. Resolved from server configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallProfile {
    pub agent_id: String,
    pub from_phone_number: String,
    /// Forward `preferred_time` inside `user_data`.
    pub include_preferred_time: bool,
}

/// JSON body posted to the calling API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CallPayload {
    pub agent_id: String,
    pub recipient_phone_number: String,
    pub from_phone_number: String,
    pub user_data: CallUserData,
}

/// Context handed to the calling agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CallUserData {
    pub contact_name: String,
    pub models_interested: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
}

impl CallPayload {
    pub fn build(request: &LeadCallRequest, profile: &CallProfile) -> Self {
        Self {
            agent_id: profile.agent_id.clone(),
            recipient_phone_number: request.phone_number.to_string(),
            from_phone_number: profile.from_phone_number.clone(),
            user_data: CallUserData {
                contact_name: request.contact_name.clone(),
                models_interested: request.models_interested(),
                notes: request.notes.clone(),
                preferred_time: profile
                    .include_preferred_time
                    .then(|| request.preferred_time.to_rfc3339()),
            },
        }
    }
}

/// Whether submissions reach the calling API or are only echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CallMode {
    #[default]
    Live,
    Echo,
}

impl CallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallMode::Live => "live",
            CallMode::Echo => "echo",
        }
    }

    pub fn is_echo(&self) -> bool {
        matches!(self, CallMode::Echo)
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What happened to one submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallOutcome {
    /// The calling API accepted the request.
    Initiated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        execution_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        call_status: Option<String>,
    },
    /// The calling API answered with a non-success status.
    Rejected { status_code: u16, message: String },
    /// A response arrived but its body was not JSON.
    InvalidResponse,
    /// The request never produced a response.
    Failed,
    /// Nothing was sent; the payload is echoed back for inspection.
    Echoed { payload: CallPayload },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A transient notification shown after a submission settles.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Initiated { .. } | CallOutcome::Echoed { .. })
    }

    pub fn notice(&self) -> Notice {
        match self {
            CallOutcome::Initiated { .. } => Notice {
                level: NoticeLevel::Success,
                text: CALL_INITIATED_MESSAGE.to_string(),
            },
            CallOutcome::Rejected { message, .. } => Notice {
                level: NoticeLevel::Error,
                text: format!("API Error: {message}"),
            },
            CallOutcome::InvalidResponse => Notice {
                level: NoticeLevel::Error,
                text: INVALID_RESPONSE_MESSAGE.to_string(),
            },
            CallOutcome::Failed => Notice {
                level: NoticeLevel::Error,
                text: SUBMISSION_FAILED_MESSAGE.to_string(),
            },
            CallOutcome::Echoed { payload } => Notice {
                level: NoticeLevel::Info,
                text: format!(
                    "You submitted the following values:\n{}",
                    serde_json::to_string_pretty(payload).unwrap_or_default()
                ),
            },
        }
    }
}

/// Classify a calling API response by HTTP status and raw body.
///
/// The body must parse as JSON before the status is considered at all.
pub fn interpret_response(status: u16, body: &str) -> CallOutcome {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return CallOutcome::InvalidResponse,
    };

    if (200..300).contains(&status) {
        CallOutcome::Initiated {
            execution_id: string_field(&parsed, "execution_id"),
            call_status: string_field(&parsed, "status"),
        }
    } else {
        CallOutcome::Rejected {
            status_code: status,
            message: string_field(&parsed, "message")
                .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string()),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
