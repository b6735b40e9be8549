use tvtrend_core::{EpisodeRow, SeasonAverage};

use crate::error::{ExtractError, ScraperError};

/// Episode data recovered from one season listing page, after positional
/// padding: `names`, `numbers`, and `ratings` always have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonListing {
    /// Season number the page actually displays.
    pub season: u32,
    pub names: Vec<String>,
    pub numbers: Vec<String>,
    pub ratings: Vec<Option<f64>>,
}

impl SeasonListing {
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Why the aggregation loop halted before completing the season hint.
#[derive(Debug)]
pub enum StopReason {
    /// The source reported not-found for the next season: clean end of data.
    Exhausted,
    /// The next season's page displayed a different season number: the
    /// requested season does not exist.
    Mismatch { expected: u32, displayed: u32 },
    /// A fetch failure that is not an end-of-data signal (network failure
    /// after retries, rate limit, unexpected status).
    Fetch(ScraperError),
    /// The page fetched but its markup no longer matches the extractor's
    /// selectors. Never carries `SeasonMismatch`; that maps to `Mismatch`.
    Markup(ExtractError),
}

/// Terminal state of one aggregation run.
#[derive(Debug)]
pub enum ScrapeOutcome {
    /// All seasons up to the hint were fetched and extracted.
    Done,
    /// The loop halted early; the accumulated tables are still valid.
    Stopped(StopReason),
}

/// Result of one aggregation run. The tables are complete for every season
/// visited before the terminal state, whatever that state is — a stopped
/// run is a partial result, not an error.
#[derive(Debug)]
pub struct ScrapeReport {
    pub episodes: Vec<EpisodeRow>,
    pub season_averages: Vec<SeasonAverage>,
    pub outcome: ScrapeOutcome,
}

impl ScrapeReport {
    /// Number of seasons that contributed at least one episode.
    #[must_use]
    pub fn seasons_collected(&self) -> usize {
        self.season_averages.len()
    }
}
