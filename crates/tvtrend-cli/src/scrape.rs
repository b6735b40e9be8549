//! The `resolve` and `scrape` command handlers.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};

use tvtrend_core::{resolve, AppConfig, ResolveError, ShowId, TitleCatalog};
use tvtrend_scraper::{aggregate, EpisodesClient, ScrapeOutcome, StopReason};

use crate::export::{self, ShowMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Show name (case-insensitive exact match). Ignored when --id is given.
    #[arg(long, required_unless_present = "id")]
    pub show: Option<String>,

    /// Start year, for names shared by several shows.
    #[arg(long)]
    pub year: Option<String>,

    /// Catalog id of the show (skips name resolution).
    #[arg(long)]
    pub id: Option<String>,

    /// Number of seasons to scrape; overrides the catalog's season count.
    #[arg(long)]
    pub seasons: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Output directory; defaults to TVTREND_OUTPUT_DIR.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<TitleCatalog> {
    let file = File::open(&config.catalog_path).with_context(|| {
        format!(
            "could not open title catalog at {}",
            config.catalog_path.display()
        )
    })?;
    let catalog = TitleCatalog::from_tsv(BufReader::new(file))?;
    tracing::debug!(
        series = catalog.len(),
        path = %config.catalog_path.display(),
        "title catalog loaded"
    );
    Ok(catalog)
}

/// Resolves a name, turning the ambiguity error into caller guidance: the
/// candidate start years are printed so the user can rerun with --year.
fn resolve_or_explain(
    catalog: &TitleCatalog,
    name: &str,
    year: Option<&str>,
) -> anyhow::Result<ShowId> {
    match resolve(catalog, name, year) {
        Ok(id) => Ok(id),
        Err(ResolveError::Ambiguous { name, candidates }) => {
            eprintln!("\"{name}\" matches {} shows:", candidates.len());
            for c in &candidates {
                eprintln!(
                    "  {}  {} ({})",
                    c.id,
                    c.primary_title,
                    c.start_year.as_deref().unwrap_or("unknown year")
                );
            }
            anyhow::bail!("ambiguous show name; rerun with --year");
        }
        Err(e @ ResolveError::NotFound { .. }) => Err(e.into()),
    }
}

pub fn run_resolve(config: &AppConfig, show: &str, year: Option<&str>) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    let id = resolve_or_explain(&catalog, show, year)?;
    println!("{id}");
    Ok(())
}

pub async fn run_scrape(config: &AppConfig, args: ScrapeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;

    let show_id = match &args.id {
        Some(id) => ShowId(id.clone()),
        None => {
            let name = args
                .show
                .as_deref()
                .context("either --show or --id is required")?;
            resolve_or_explain(&catalog, name, args.year.as_deref())?
        }
    };

    let entry = catalog.get(&show_id);
    let meta = ShowMeta {
        name: entry.map_or_else(|| show_id.0.clone(), |e| e.primary_title.clone()),
        premier_year: entry.and_then(|e| e.start_year.clone()),
    };

    let season_count_hint = args
        .seasons
        .or_else(|| catalog.season_count(&show_id))
        .context("catalog carries no season count for this show; pass --seasons")?;

    tracing::info!(
        show_id = %show_id,
        show = %meta.name,
        seasons = season_count_hint,
        "starting scrape"
    );

    let client = EpisodesClient::from_config(config)?;
    let report = aggregate(
        &client,
        &show_id,
        season_count_hint,
        config.inter_request_delay_ms,
    )
    .await;

    match &report.outcome {
        ScrapeOutcome::Done => {
            println!(
                "scraped {} seasons ({} episodes)",
                report.seasons_collected(),
                report.episodes.len()
            );
        }
        ScrapeOutcome::Stopped(StopReason::Exhausted) => {
            println!(
                "source ran out of seasons after {} ({} episodes); keeping partial result",
                report.seasons_collected(),
                report.episodes.len()
            );
        }
        ScrapeOutcome::Stopped(StopReason::Mismatch {
            expected,
            displayed,
        }) => {
            println!(
                "season {expected} not released yet (page shows season {displayed}); \
                 keeping {} seasons",
                report.seasons_collected()
            );
        }
        ScrapeOutcome::Stopped(reason) => {
            tracing::warn!(reason = ?reason, "scrape stopped early");
            println!(
                "scrape stopped early ({} seasons collected); see logs",
                report.seasons_collected()
            );
        }
    }

    let out_dir = args.out.unwrap_or_else(|| config.output_dir.clone());
    let written = match args.format {
        OutputFormat::Csv => export::write_csv_datasets(&out_dir, &meta, &report)?,
        OutputFormat::Json => vec![export::write_json_dataset(&out_dir, &meta, &report)?],
    };
    for path in written {
        println!("wrote {}", path.display());
    }

    Ok(())
}
