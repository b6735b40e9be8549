//! Dataset export in the schema the downstream dashboard reads.
//!
//! Two tables: episode-level rows and per-season averages. Column names
//! match the consumer's expectations (`tvshow_code`, `seasonNumber`,
//! `averageRating`, ...). Absent ratings become empty CSV fields and JSON
//! nulls — never `0`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::json;

use tvtrend_scraper::ScrapeReport;

pub const EPISODES_CSV: &str = "episode_rating_database.csv";
pub const AVERAGES_CSV: &str = "average_rating_by_season.csv";
pub const REPORT_JSON: &str = "episode_ratings.json";

/// Display metadata for the scraped show, carried into the episode table
/// so the dashboard can label its selector entries.
pub struct ShowMeta {
    pub name: String,
    pub premier_year: Option<String>,
}

/// Writes both CSV datasets into `dir`, returning the paths written.
pub fn write_csv_datasets(
    dir: &Path,
    meta: &ShowMeta,
    report: &ScrapeReport,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create output directory {}", dir.display()))?;

    let episodes_path = dir.join(EPISODES_CSV);
    write_file(&episodes_path, &render_episode_csv(meta, report))?;

    let averages_path = dir.join(AVERAGES_CSV);
    write_file(&averages_path, &render_average_csv(report))?;

    Ok(vec![episodes_path, averages_path])
}

/// Writes a single JSON document with both tables into `dir`.
pub fn write_json_dataset(
    dir: &Path,
    meta: &ShowMeta,
    report: &ScrapeReport,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create output directory {}", dir.display()))?;

    let doc = json!({
        "show_name": meta.name,
        "show_premier_year": meta.premier_year,
        "episodes": report.episodes,
        "season_averages": report.season_averages,
    });

    let path = dir.join(REPORT_JSON);
    write_file(&path, &serde_json::to_string_pretty(&doc)?)?;
    Ok(path)
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("could not write {}", path.display()))?;
    Ok(())
}

fn render_episode_csv(meta: &ShowMeta, report: &ScrapeReport) -> String {
    let mut out = String::from(
        "show_name,show_premier_year,tvshow_code,seasonNumber,episodeNumber,episode_name,averageRating\n",
    );
    for ep in &report.episodes {
        push_row(
            &mut out,
            &[
                meta.name.clone(),
                meta.premier_year.clone().unwrap_or_default(),
                ep.show_id.to_string(),
                ep.season.to_string(),
                ep.episode_number.clone(),
                ep.episode_name.clone(),
                rating_field(ep.rating),
            ],
        );
    }
    out
}

fn render_average_csv(report: &ScrapeReport) -> String {
    let mut out = String::from("tvshow_code,seasonNumber,averageRating\n");
    for avg in &report.season_averages {
        push_row(
            &mut out,
            &[
                avg.show_id.to_string(),
                avg.season.to_string(),
                rating_field(avg.average_rating),
            ],
        );
    }
    out
}

/// Absent ratings are empty fields, distinct from any numeric value.
fn rating_field(rating: Option<f64>) -> String {
    rating.map(|r| r.to_string()).unwrap_or_default()
}

fn push_row(out: &mut String, cells: &[String]) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        } else {
            first = false;
        }
        out.push_str(&escape_csv(cell));
    }
    out.push('\n');
}

/// Quotes a field when it contains a separator, quote, or newline,
/// doubling embedded quotes.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use tvtrend_core::{EpisodeRow, SeasonAverage, ShowId};
    use tvtrend_scraper::ScrapeOutcome;

    use super::*;

    fn sample_report() -> ScrapeReport {
        let show_id = ShowId::from("tt0001");
        ScrapeReport {
            episodes: vec![
                EpisodeRow {
                    show_id: show_id.clone(),
                    season: 1,
                    episode_number: "S1, Ep1".into(),
                    episode_name: "Winter, Spring".into(),
                    rating: Some(8.5),
                },
                EpisodeRow {
                    show_id: show_id.clone(),
                    season: 1,
                    episode_number: "S1, Ep2".into(),
                    episode_name: "Untitled".into(),
                    rating: None,
                },
            ],
            season_averages: vec![SeasonAverage {
                show_id,
                season: 1,
                average_rating: Some(8.5),
            }],
            outcome: ScrapeOutcome::Done,
        }
    }

    fn meta() -> ShowMeta {
        ShowMeta {
            name: "Show X".into(),
            premier_year: Some("2005".into()),
        }
    }

    #[test]
    fn episode_csv_quotes_fields_with_commas() {
        let csv = render_episode_csv(&meta(), &sample_report());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "show_name,show_premier_year,tvshow_code,seasonNumber,episodeNumber,episode_name,averageRating"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Show X,2005,tt0001,1,\"S1, Ep1\",\"Winter, Spring\",8.5"
        );
    }

    #[test]
    fn missing_rating_is_an_empty_field() {
        let csv = render_episode_csv(&meta(), &sample_report());
        let unrated = csv.lines().nth(2).unwrap();
        assert!(
            unrated.ends_with(",Untitled,"),
            "expected trailing empty rating field, got: {unrated}"
        );
    }

    #[test]
    fn average_csv_has_one_row_per_season() {
        let csv = render_average_csv(&sample_report());
        assert_eq!(
            csv,
            "tvshow_code,seasonNumber,averageRating\ntt0001,1,8.5\n"
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(escape_csv("the \"best\" one"), "\"the \"\"best\"\" one\"");
        assert_eq!(escape_csv("plain"), "plain");
    }

    #[test]
    fn json_document_serializes_nulls_for_missing_ratings() {
        let doc = json!({
            "episodes": sample_report().episodes,
        });
        let rendered = serde_json::to_string(&doc).unwrap();
        assert!(rendered.contains("\"rating\":null"));
        assert!(rendered.contains("\"rating\":8.5"));
    }
}
