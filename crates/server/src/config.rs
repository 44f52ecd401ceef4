use shared_types::{AppConfig, CallProfile, CallerFileConfig, FeatureFlags};
use std::sync::OnceLock;

use crate::caller::CallerSettings;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` and store it in the global `OnceLock`. Safe to call
/// multiple times; only the first call has effect.
///
/// If the file is missing or unparseable, every setting takes its default.
pub fn load_app_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config: AppConfig = toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("[config] Failed to parse {CONFIG_PATH}: {e}; using defaults");
                AppConfig::default()
            });
            eprintln!("[config] Feature flags: {:?}", config.features);
            config
        }
        Err(e) => {
            eprintln!("[config] {CONFIG_PATH} not found ({e}), using defaults");
            AppConfig::default()
        }
    })
}

/// Get the loaded config, loading it on first use.
pub fn app_config() -> &'static AppConfig {
    load_app_config()
}

pub fn feature_flags() -> &'static FeatureFlags {
    &app_config().features
}

/// Resolve calling API settings from the environment.
///
/// Reads:
///   - `CALLER_API_KEY`: bearer credential for the calling API
///   - `CALLER_AGENT_ID`: agent that handles the call
///   - `CALLER_ENDPOINT`: optional override of `[caller] endpoint`
///
/// Returns `None` when the credential or agent is missing, in which case the
/// caller falls back to echoing submissions.
pub fn caller_settings_from_env(file: &CallerFileConfig) -> Option<CallerSettings> {
    let _ = dotenvy::dotenv();
    caller_settings_from(
        file,
        std::env::var("CALLER_API_KEY").ok(),
        std::env::var("CALLER_AGENT_ID").ok(),
        std::env::var("CALLER_ENDPOINT").ok(),
    )
}

/// Combine file settings with secret values. Blank values count as missing.
pub fn caller_settings_from(
    file: &CallerFileConfig,
    api_key: Option<String>,
    agent_id: Option<String>,
    endpoint_override: Option<String>,
) -> Option<CallerSettings> {
    let api_key = api_key.filter(|v| !v.trim().is_empty())?;
    let agent_id = agent_id.filter(|v| !v.trim().is_empty())?;
    let endpoint = endpoint_override
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| file.endpoint.clone());

    Some(CallerSettings {
        endpoint,
        api_key,
        profile: CallProfile {
            agent_id,
            from_phone_number: file.from_phone_number.clone(),
            include_preferred_time: file.include_preferred_time,
        },
    })
}
