//! The aggregation loop: drive fetch-then-extract across increasing
//! seasons, accumulate episode rows, and derive per-season averages.
//!
//! Modeled as an explicit state machine (`Fetching(n)` → `Fetching(n+1)` |
//! `Stopped(reason)` | `Done`) so the partial-result semantics are testable
//! without network access — tests inject a fake [`SeasonPageSource`].

use std::time::Duration;

use tvtrend_core::{EpisodeRow, SeasonAverage, ShowId};

use crate::error::ExtractError;
use crate::extract::extract_season;
use crate::types::{ScrapeOutcome, ScrapeReport, SeasonListing, StopReason};

/// Anything that can produce the raw HTML of a season listing page.
///
/// [`crate::EpisodesClient`] is the production implementation; tests use
/// in-memory fakes.
pub trait SeasonPageSource {
    fn fetch_season(
        &self,
        show_id: &ShowId,
        season: u32,
    ) -> impl std::future::Future<Output = Result<String, crate::ScraperError>>;
}

enum State {
    Fetching(u32),
    Stopped(StopReason),
    Done,
}

/// Scrapes seasons `1..=season_count_hint` in strictly increasing order and
/// returns the accumulated episode table and season-average table.
///
/// Stop conditions, none of which discard accumulated data:
/// - fetch reports not-found → `Stopped(Exhausted)` (clean end of data);
/// - the page displays a different season number → `Stopped(Mismatch)`;
/// - any other fetch failure → `Stopped(Fetch)`;
/// - markup drift in extraction → `Stopped(Markup)`.
///
/// Completing every season up to the hint yields `Done`. A show with no
/// ratings at all still produces its full episode table with all-`None`
/// averages; that is data, not an error.
///
/// `inter_request_delay_ms` is applied between season fetches (never before
/// the first).
pub async fn aggregate<S: SeasonPageSource>(
    source: &S,
    show_id: &ShowId,
    season_count_hint: u32,
    inter_request_delay_ms: u64,
) -> ScrapeReport {
    let mut episodes: Vec<EpisodeRow> = Vec::new();
    let mut season_averages: Vec<SeasonAverage> = Vec::new();

    let mut state = if season_count_hint == 0 {
        State::Done
    } else {
        State::Fetching(1)
    };

    loop {
        let season = match state {
            State::Fetching(n) => n,
            State::Stopped(reason) => {
                tracing::info!(
                    show_id = %show_id,
                    seasons = season_averages.len(),
                    reason = ?reason,
                    "aggregation stopped early; returning partial result"
                );
                return ScrapeReport {
                    episodes,
                    season_averages,
                    outcome: ScrapeOutcome::Stopped(reason),
                };
            }
            State::Done => {
                tracing::info!(
                    show_id = %show_id,
                    seasons = season_averages.len(),
                    episodes = episodes.len(),
                    "aggregation complete"
                );
                return ScrapeReport {
                    episodes,
                    season_averages,
                    outcome: ScrapeOutcome::Done,
                };
            }
        };

        if season > 1 && inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
        }

        let html = match source.fetch_season(show_id, season).await {
            Ok(html) => html,
            Err(crate::ScraperError::NotFound { .. }) => {
                state = State::Stopped(StopReason::Exhausted);
                continue;
            }
            Err(err) => {
                state = State::Stopped(StopReason::Fetch(err));
                continue;
            }
        };

        let listing = match extract_season(&html, season) {
            Ok(listing) => listing,
            Err(ExtractError::SeasonMismatch {
                expected,
                displayed,
            }) => {
                state = State::Stopped(StopReason::Mismatch {
                    expected,
                    displayed,
                });
                continue;
            }
            Err(err) => {
                state = State::Stopped(StopReason::Markup(err));
                continue;
            }
        };

        tracing::debug!(
            show_id = %show_id,
            season,
            episodes = listing.len(),
            rated = listing.ratings.iter().filter(|r| r.is_some()).count(),
            "season extracted"
        );

        season_averages.push(SeasonAverage {
            show_id: show_id.clone(),
            season,
            average_rating: mean_rating(&listing),
        });
        append_rows(&mut episodes, show_id, &listing);

        state = if season == season_count_hint {
            State::Done
        } else {
            State::Fetching(season + 1)
        };
    }
}

fn append_rows(episodes: &mut Vec<EpisodeRow>, show_id: &ShowId, listing: &SeasonListing) {
    for i in 0..listing.len() {
        episodes.push(EpisodeRow {
            show_id: show_id.clone(),
            season: listing.season,
            episode_number: listing.numbers[i].clone(),
            episode_name: listing.names[i].clone(),
            rating: listing.ratings[i],
        });
    }
}

/// Mean of the rated episodes, rounded to 2 decimals; `None` when the
/// season has no rated episodes (never 0.0).
fn mean_rating(listing: &SeasonListing) -> Option<f64> {
    let rated: Vec<f64> = listing.ratings.iter().copied().flatten().collect();
    if rated.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = rated.iter().sum::<f64>() / rated.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
