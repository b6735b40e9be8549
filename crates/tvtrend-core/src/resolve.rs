//! Show-name resolution against the title catalog.
//!
//! Resolution is a pure function: when a name maps to several shows the
//! candidates come back attached to [`ResolveError::Ambiguous`] and the
//! caller (CLI, UI, or test) decides how to disambiguate — there is no
//! interactive prompt buried in here.

use thiserror::Error;

use crate::catalog::TitleCatalog;
use crate::ShowId;

/// One show a given name could refer to, carried by
/// [`ResolveError::Ambiguous`] so callers can present the choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: ShowId,
    pub primary_title: String,
    pub start_year: Option<String>,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no series named \"{name}\" in the catalog")]
    NotFound { name: String },

    #[error("\"{name}\" matches more than one show; disambiguate by start year")]
    Ambiguous {
        name: String,
        candidates: Vec<Candidate>,
    },
}

/// Resolves a show name to its catalog id.
///
/// Matching is a case-insensitive exact comparison against primary titles
/// of series entries. Two-stage contract:
///
/// 1. Zero title matches → [`ResolveError::NotFound`].
/// 2. Several matches and no `start_year` → [`ResolveError::Ambiguous`]
///    with the candidate list attached. With a `start_year`, candidates
///    are re-filtered by exact year; anything other than exactly one
///    survivor is again `Ambiguous`.
///
/// # Errors
///
/// See above; no partial state is left behind on failure.
pub fn resolve(
    catalog: &TitleCatalog,
    name: &str,
    start_year: Option<&str>,
) -> Result<ShowId, ResolveError> {
    let wanted = name.to_lowercase();
    let matches: Vec<Candidate> = catalog
        .entries()
        .iter()
        .filter(|e| e.primary_title.to_lowercase() == wanted)
        .map(|e| Candidate {
            id: e.id.clone(),
            primary_title: e.primary_title.clone(),
            start_year: e.start_year.clone(),
        })
        .collect();

    if matches.is_empty() {
        return Err(ResolveError::NotFound {
            name: name.to_owned(),
        });
    }

    match start_year {
        None => match matches.as_slice() {
            [only] => Ok(only.id.clone()),
            _ => Err(ResolveError::Ambiguous {
                name: name.to_owned(),
                candidates: matches,
            }),
        },
        Some(year) => {
            let mut by_year = matches
                .iter()
                .filter(|c| c.start_year.as_deref() == Some(year));
            match (by_year.next(), by_year.next()) {
                (Some(only), None) => Ok(only.id.clone()),
                _ => Err(ResolveError::Ambiguous {
                    name: name.to_owned(),
                    candidates: matches,
                }),
            }
        }
    }
}
