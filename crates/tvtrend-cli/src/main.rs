mod export;
mod scrape;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tvtrend")]
#[command(about = "Scrape per-episode TV ratings and aggregate season averages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a show name to its catalog id.
    Resolve {
        /// Show name (case-insensitive exact match).
        #[arg(long)]
        show: String,
        /// Start year, for names shared by several shows.
        #[arg(long)]
        year: Option<String>,
    },
    /// Scrape a show's episode ratings and write the two datasets.
    Scrape(scrape::ScrapeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = tvtrend_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve { show, year } => scrape::run_resolve(&config, &show, year.as_deref()),
        Commands::Scrape(args) => scrape::run_scrape(&config, args).await,
    }
}
