pub mod aggregate;
pub mod client;
pub mod error;
pub mod extract;
mod retry;
pub mod types;

pub use aggregate::{aggregate, SeasonPageSource};
pub use client::EpisodesClient;
pub use error::{ExtractError, ScraperError};
pub use types::{ScrapeOutcome, ScrapeReport, SeasonListing, StopReason};
