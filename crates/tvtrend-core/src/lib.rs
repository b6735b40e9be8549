pub mod app_config;
pub mod catalog;
pub mod config;
pub mod resolve;

pub use app_config::AppConfig;
pub use catalog::{TitleCatalog, TitleRecord, TitleType};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use resolve::{resolve, Candidate, ResolveError};

use serde::Serialize;

/// Opaque key uniquely identifying a show in the ratings source's catalog
/// (e.g. `tt0944947`). Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShowId(pub String);

impl std::fmt::Display for ShowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShowId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// One episode of a show, as recovered from a season listing page.
///
/// `episode_number` is a string because the source uses labels like
/// `"S1, Ep1"` that are not plain integers. `rating` is `None` for
/// unreleased or unrated episodes — absent is distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeRow {
    pub show_id: ShowId,
    pub season: u32,
    pub episode_number: String,
    pub episode_name: String,
    pub rating: Option<f64>,
}

/// Mean rating for one season, derived from that season's [`EpisodeRow`]s.
///
/// `average_rating` is `None` (never 0.0) when no episode in the season
/// carries a rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAverage {
    pub show_id: ShowId,
    pub season: u32,
    pub average_rating: Option<f64>,
}
