use std::path::PathBuf;

/// Runtime configuration, loaded from `TVTREND_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Path to the TSV title catalog.
    pub catalog_path: PathBuf,
    /// Directory the CLI writes the produced datasets into.
    pub output_dir: PathBuf,
    /// Base URL of the ratings source. Overridable so tests and mirrors
    /// can point the scraper elsewhere.
    pub source_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Delay between season fetches, applied after every season but the first.
    pub inter_request_delay_ms: u64,
}
