use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional behaviour is active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false` so that a
/// missing or incomplete config file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub telemetry: bool,
    /// Log and echo submissions instead of calling out.
    #[serde(default)]
    pub echo_submissions: bool,
}

/// Non-secret settings for the calling API. Credentials come from the
/// environment, never from this file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallerFileConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub from_phone_number: String,
    #[serde(default)]
    pub include_preferred_time: bool,
}

fn default_endpoint() -> String {
    "https://api.bolna.dev/call".to_string()
}

impl Default for CallerFileConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            from_phone_number: String::new(),
            include_preferred_time: false,
        }
    }
}

/// Sliding-window limit applied to the public call route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_seconds() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub caller: CallerFileConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}
