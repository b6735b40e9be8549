//! Title catalog loading.
//!
//! The catalog is a header-keyed TSV export of the ratings source's title
//! basics dataset. Loading is an explicit initialization step over an
//! injected reader — the catalog is never fetched implicitly at
//! construction time, so tests can feed an in-memory slice.
//!
//! Expected columns (order does not matter, extra columns are ignored):
//! `primaryTitle`, `originalTitle`, `tconst`, `startYear`, `titleType`,
//! `seasonNumber`. The literal `\N` marks an absent value.

use std::io::BufRead;

use thiserror::Error;

use crate::ShowId;

/// Placeholder the source dataset uses for absent values.
const ABSENT: &str = "\\N";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is empty (no header row)")]
    Empty,

    #[error("catalog header is missing required column \"{0}\"")]
    MissingColumn(&'static str),
}

/// Whether a catalog row describes a television series or something else
/// (movie, short, episode row, ...). Only series rows participate in
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleType {
    Series,
    Other,
}

impl TitleType {
    fn from_raw(raw: &str) -> Self {
        if raw == "tvSeries" {
            Self::Series
        } else {
            Self::Other
        }
    }
}

/// One catalog row. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct TitleRecord {
    pub primary_title: String,
    pub original_title: String,
    pub id: ShowId,
    pub start_year: Option<String>,
    pub title_type: TitleType,
    pub season_count: Option<u32>,
}

/// In-memory title catalog, filtered to series rows at load time.
#[derive(Debug, Default)]
pub struct TitleCatalog {
    entries: Vec<TitleRecord>,
}

impl TitleCatalog {
    /// Parses a TSV catalog from `reader`, keeping only series rows.
    ///
    /// Rows with fewer fields than the header are skipped with a warning
    /// rather than failing the whole load — the upstream dataset contains
    /// occasional short lines.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] when there is no header row,
    /// [`CatalogError::MissingColumn`] when a required column is absent
    /// from the header, or [`CatalogError::Io`] on read failure.
    pub fn from_tsv<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(CatalogError::Empty),
        };
        let columns: Vec<&str> = header.trim_end_matches('\r').split('\t').collect();

        let col = |name: &'static str| -> Result<usize, CatalogError> {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or(CatalogError::MissingColumn(name))
        };

        let idx_primary = col("primaryTitle")?;
        let idx_original = col("originalTitle")?;
        let idx_id = col("tconst")?;
        let idx_year = col("startYear")?;
        let idx_type = col("titleType")?;
        let idx_seasons = col("seasonNumber")?;
        let width = [
            idx_primary,
            idx_original,
            idx_id,
            idx_year,
            idx_type,
            idx_seasons,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1;

        let mut entries = Vec::new();
        for (line_no, line) in lines.enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
            if fields.len() < width {
                tracing::warn!(line = line_no + 2, "skipping short catalog row");
                continue;
            }

            let title_type = TitleType::from_raw(fields[idx_type]);
            if title_type != TitleType::Series {
                continue;
            }

            entries.push(TitleRecord {
                primary_title: fields[idx_primary].to_owned(),
                original_title: fields[idx_original].to_owned(),
                id: ShowId(fields[idx_id].to_owned()),
                start_year: optional(fields[idx_year]),
                title_type,
                season_count: optional(fields[idx_seasons]).and_then(|s| s.parse().ok()),
            });
        }

        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[TitleRecord] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a record by show id.
    #[must_use]
    pub fn get(&self, id: &ShowId) -> Option<&TitleRecord> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Season-count hint for the aggregation loop, when the catalog
    /// carries one for this show.
    #[must_use]
    pub fn season_count(&self, id: &ShowId) -> Option<u32> {
        self.get(id).and_then(|e| e.season_count)
    }
}

fn optional(field: &str) -> Option<String> {
    if field.is_empty() || field == ABSENT {
        None
    } else {
        Some(field.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "tconst\ttitleType\tprimaryTitle\toriginalTitle\tstartYear\tseasonNumber";

    fn catalog(rows: &[&str]) -> TitleCatalog {
        let text = format!("{HEADER}\n{}\n", rows.join("\n"));
        TitleCatalog::from_tsv(text.as_bytes()).expect("catalog should parse")
    }

    #[test]
    fn keeps_only_series_rows() {
        let cat = catalog(&[
            "tt0001\ttvSeries\tShow X\tShow X\t2005\t4",
            "tt0002\tmovie\tShow X\tShow X\t2005\t\\N",
            "tt0003\ttvSeries\tShow Y\tShow Y\t2019\t2",
        ]);
        assert_eq!(cat.len(), 2);
        assert!(cat.entries().iter().all(|e| e.title_type == TitleType::Series));
    }

    #[test]
    fn absent_marker_maps_to_none() {
        let cat = catalog(&["tt0001\ttvSeries\tShow X\tShow X\t\\N\t\\N"]);
        let entry = &cat.entries()[0];
        assert_eq!(entry.start_year, None);
        assert_eq!(entry.season_count, None);
    }

    #[test]
    fn season_count_lookup() {
        let cat = catalog(&["tt0001\ttvSeries\tShow X\tShow X\t2005\t4"]);
        assert_eq!(cat.season_count(&ShowId::from("tt0001")), Some(4));
        assert_eq!(cat.season_count(&ShowId::from("tt9999")), None);
    }

    #[test]
    fn header_order_does_not_matter() {
        let text = "primaryTitle\ttconst\tstartYear\ttitleType\tseasonNumber\toriginalTitle\n\
                    Show X\ttt0001\t2005\ttvSeries\t4\tShow X Original\n";
        let cat = TitleCatalog::from_tsv(text.as_bytes()).unwrap();
        let entry = &cat.entries()[0];
        assert_eq!(entry.id, ShowId::from("tt0001"));
        assert_eq!(entry.original_title, "Show X Original");
    }

    #[test]
    fn short_rows_are_skipped_not_fatal() {
        let cat = catalog(&[
            "tt0001\ttvSeries",
            "tt0002\ttvSeries\tShow Y\tShow Y\t2019\t2",
        ]);
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.entries()[0].id, ShowId::from("tt0002"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let text = "tconst\ttitleType\tprimaryTitle\n";
        let result = TitleCatalog::from_tsv(text.as_bytes());
        assert!(
            matches!(result, Err(CatalogError::MissingColumn("originalTitle"))),
            "expected MissingColumn(originalTitle), got: {result:?}"
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = TitleCatalog::from_tsv("".as_bytes());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }
}
