//! HTTP client for the ratings source's season listing pages.

use std::time::Duration;

use reqwest::Client;

use tvtrend_core::{AppConfig, ShowId};

use crate::aggregate::SeasonPageSource;
use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

/// Fetches season listing pages over HTTP.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx
/// responses as typed errors. 404 is deliberately *not* retried: the
/// aggregator reads it as the end of the season range, not a failure.
/// Transient errors (429, network failures) are retried with exponential
/// backoff up to `max_retries` additional attempts.
pub struct EpisodesClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl EpisodesClient {
    /// Creates an `EpisodesClient` with configured timeout, `User-Agent`,
    /// base URL, and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if
    /// `base_url` does not parse as an absolute URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Convenience constructor from the application config.
    ///
    /// # Errors
    ///
    /// Same as [`EpisodesClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.source_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Fetches the raw HTML of one season listing page, with automatic
    /// retry on transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried; end of data).
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network failure after all retries exhausted.
    pub async fn fetch_season_page(
        &self,
        show_id: &ShowId,
        season: u32,
    ) -> Result<String, ScraperError> {
        let url = self.episodes_url(show_id, season);

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited { retry_after_secs });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Builds the listing URL for one (show, season) pair.
    fn episodes_url(&self, show_id: &ShowId, season: u32) -> String {
        format!(
            "{}/title/{}/episodes?season={}",
            self.base_url, show_id, season
        )
    }
}

impl SeasonPageSource for EpisodesClient {
    async fn fetch_season(&self, show_id: &ShowId, season: u32) -> Result<String, ScraperError> {
        self.fetch_season_page(show_id, season).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
