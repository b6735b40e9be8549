use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("TVTREND_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("TVTREND_CATALOG_PATH", "./data/title.basics.tsv"));
    let output_dir = PathBuf::from(or_default("TVTREND_OUTPUT_DIR", "."));
    let source_base_url = or_default("TVTREND_SOURCE_BASE_URL", "https://www.imdb.com");

    let request_timeout_secs = parse_u64("TVTREND_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TVTREND_USER_AGENT", "tvtrend/0.1 (episode-ratings)");
    let max_retries = parse_u32("TVTREND_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("TVTREND_RETRY_BACKOFF_BASE_SECS", "5")?;
    let inter_request_delay_ms = parse_u64("TVTREND_INTER_REQUEST_DELAY_MS", "250")?;

    Ok(AppConfig {
        log_level,
        catalog_path,
        output_dir,
        source_base_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        inter_request_delay_ms,
    })
}
