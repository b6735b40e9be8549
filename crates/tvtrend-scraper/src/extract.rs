//! Episode extraction from a season listing page.
//!
//! The page is parsed with regexes against four markup anchors: the season
//! banner (`id="episode_top"`), episode-name anchors (`<strong><a title=..>`
//! under the episode list), episode-number containers (`zero-z-index`
//! blocks), and rating value spans (`ipl-rating-star__rating` inside the
//! non-interactive `ipl-rating-star small` widget).
//!
//! Operational risk: any change to this markup breaks extraction. That
//! fragility is inherent to scraping this source and is surfaced as
//! [`ExtractError::MissingSeasonBanner`] / short listings rather than
//! hidden.
//!
//! Alignment rule: the source lists ratings in episode order and simply
//! stops emitting them at the first unreleased episode, so ratings are
//! matched to episodes positionally and every position past the end of the
//! ratings list gets `None`. This is an explicit, tested rule. Known limit:
//! if the source ever omitted a rating for an *early* episode while later
//! ones are rated, positional padding would misalign the tail; the listing
//! exposes no per-episode rating key to join on instead.

use regex::Regex;

use crate::error::ExtractError;
use crate::types::SeasonListing;

/// Parses one season listing page and aligns names, number labels, and
/// ratings into a [`SeasonListing`].
///
/// # Errors
///
/// - [`ExtractError::SeasonMismatch`] when the page's banner displays a
///   season other than `expected_season` — the aggregator's stop signal.
/// - [`ExtractError::MissingSeasonBanner`] when no banner is present at
///   all (markup drift, or not a season listing page).
pub fn extract_season(html: &str, expected_season: u32) -> Result<SeasonListing, ExtractError> {
    let displayed = extract_displayed_season(html).ok_or(ExtractError::MissingSeasonBanner)?;
    if displayed != expected_season {
        return Err(ExtractError::SeasonMismatch {
            expected: expected_season,
            displayed,
        });
    }

    // Scope the episode selectors to the listing region when the page
    // carries one; headers and footers also contain anchors.
    let region = html
        .find("id=\"episodes_content\"")
        .map_or(html, |i| &html[i..]);

    let names = extract_episode_names(region);
    let mut numbers = extract_episode_numbers(region);
    let ratings = extract_ratings(region);

    if numbers.len() != names.len() {
        tracing::warn!(
            names = names.len(),
            numbers = numbers.len(),
            season = displayed,
            "episode number labels do not line up with episode names"
        );
        numbers.resize(names.len(), String::new());
    }

    if ratings.len() > names.len() {
        tracing::warn!(
            names = names.len(),
            ratings = ratings.len(),
            season = displayed,
            "more ratings than episodes; truncating"
        );
    }

    // Positional padding: episodes past the end of the ratings list are
    // unreleased or unrated.
    let mut padded: Vec<Option<f64>> = ratings.into_iter().map(Some).collect();
    padded.resize(names.len(), None);

    Ok(SeasonListing {
        season: displayed,
        names,
        numbers,
        ratings: padded,
    })
}

/// Reads the season number the page actually displays from the banner
/// element (`id="episode_top"`, text like `"Season 3"`).
fn extract_displayed_season(html: &str) -> Option<u32> {
    let banner = Regex::new(r#"(?is)<[^>]*\bid\s*=\s*"episode_top"[^>]*>(.*?)</"#)
        .expect("valid season banner regex");
    let text = clean_text(banner.captures(html)?.get(1).map_or("", |m| m.as_str()));

    let digits = Regex::new(r"\d+").expect("valid digits regex");
    digits.find(&text)?.as_str().parse().ok()
}

/// Episode names come from the `title` attribute of the name anchors.
fn extract_episode_names(region: &str) -> Vec<String> {
    let re = Regex::new(r#"(?is)<strong>\s*<a\b[^>]*\btitle\s*=\s*"([^"]*)""#)
        .expect("valid episode name regex");
    re.captures_iter(region)
        .map(|cap| decode_entities(cap.get(1).map_or("", |m| m.as_str())))
        .collect()
}

/// Episode-number labels live in the inner div of `zero-z-index` hover
/// containers, e.g. `"S1, Ep3"`. The labels are kept verbatim; some are
/// not plain integers.
fn extract_episode_numbers(region: &str) -> Vec<String> {
    let re = Regex::new(
        r#"(?is)<div[^>]*\bclass\s*=\s*"[^"]*\bzero-z-index\b[^"]*"[^>]*>\s*<div[^>]*>(.*?)</div>"#,
    )
    .expect("valid episode number regex");
    re.captures_iter(region)
        .map(|cap| clean_text(cap.get(1).map_or("", |m| m.as_str())))
        .collect()
}

/// Ratings come from the value span of each non-interactive rating widget.
/// Only rated episodes render one, so this list may be shorter than the
/// episode-name list. Values outside [0, 10] are dropped with a warning.
fn extract_ratings(region: &str) -> Vec<f64> {
    let widget = Regex::new(
        r#"(?is)<div[^>]*\bclass\s*=\s*"[^"]*\bipl-rating-star\b[^"]*\bsmall\b[^"]*"[^>]*>(.*?)</div>"#,
    )
    .expect("valid rating widget regex");
    let value = Regex::new(
        r#"(?is)\bipl-rating-star__rating\b[^>]*>\s*([0-9]+(?:\.[0-9]+)?)\s*<"#,
    )
    .expect("valid rating value regex");

    let mut ratings = Vec::new();
    for block in widget.captures_iter(region) {
        let inner = block.get(1).map_or("", |m| m.as_str());
        let Some(cap) = value.captures(inner) else {
            continue;
        };
        let Ok(parsed) = cap.get(1).map_or("", |m| m.as_str()).parse::<f64>() else {
            continue;
        };
        if (0.0..=10.0).contains(&parsed) {
            ratings.push(parsed);
        } else {
            tracing::warn!(rating = parsed, "dropping out-of-range rating value");
        }
    }
    ratings
}

/// Strips tags and collapses whitespace.
fn clean_text(input: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tags regex");
    let no_tags = tags.replace_all(input, " ");
    let decoded = decode_entities(&no_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the handful of entities the source actually emits in titles.
fn decode_entities(input: &str) -> String {
    input
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
