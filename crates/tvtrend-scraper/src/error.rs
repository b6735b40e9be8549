use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("season page not found: {url}")]
    NotFound { url: String },

    #[error("rate limited by source (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid source base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Extraction outcomes that are control signals rather than page damage.
///
/// `SeasonMismatch` in particular is the aggregation loop's normal
/// end-of-data signal and must never be conflated with a fetch failure.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page displays season {displayed}, expected season {expected}")]
    SeasonMismatch { expected: u32, displayed: u32 },

    #[error("season banner not found in page markup")]
    MissingSeasonBanner,
}
