use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::raw::{RawOrganicResult, RawResultPage};

/// Phrases that mark a snippet as announcing a study, survey or release.
/// Matched as lower-case substrings.
pub const PRESS_RELEASE_KEYWORDS: &[&str] = &[
    "new study",
    "survey",
    "report",
    "findings",
    "new research",
    "announced",
    "press release",
];

/// Search-engine click wrappers such as `https://www.google.com/url?q=...`.
static REDIRECT_WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://[^/?#]+/url\?(?:[^#]*&)?(?:q|url)=").expect("valid regex")
});

/// Column names in display order.
pub const COLUMNS: [&str; 9] = [
    "query",
    "title",
    "url",
    "displayedUrl",
    "description",
    "date",
    "position",
    "source",
    "likelyPressRelease",
];

/// One deduplicated result. Every column is always present; missing source
/// data is `None` and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResultRow {
    pub query: String,
    pub title: Option<String>,
    pub url: String,
    pub displayed_url: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub position: Option<i64>,
    pub source: Option<String>,
    pub likely_press_release: bool,
}

impl NormalizedResultRow {
    /// Cell values as text, in [`COLUMNS`] order. `None` becomes an empty string.
    pub fn cells(&self) -> [String; 9] {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        [
            self.query.clone(),
            opt(&self.title),
            self.url.clone(),
            opt(&self.displayed_url),
            opt(&self.description),
            opt(&self.date),
            self.position.map(|p| p.to_string()).unwrap_or_default(),
            opt(&self.source),
            self.likely_press_release.to_string(),
        ]
    }
}

/// Flattens result pages into a table of unique URLs.
#[derive(Debug, Clone, Default)]
pub struct ResultNormalizer {
    /// Lower-cased; blank patterns are dropped at construction.
    exclude: Option<String>,
}

impl ResultNormalizer {
    /// `exclude` is a literal, case-insensitive substring such as the
    /// requester's own domain.
    pub fn new(exclude: Option<&str>) -> Self {
        Self {
            exclude: exclude
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_lowercase),
        }
    }

    pub fn normalize(&self, pages: &[RawResultPage]) -> Vec<NormalizedResultRow> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut rows = Vec::new();
        let mut dropped_no_url = 0usize;
        let mut dropped_excluded = 0usize;

        for page in pages {
            for result in &page.organic_results {
                let Some(url) = clean_url(result.url.as_deref()) else {
                    dropped_no_url += 1;
                    continue;
                };
                if self.is_excluded(&url) {
                    dropped_excluded += 1;
                    continue;
                }
                if !seen.insert(url.clone()) {
                    continue;
                }
                rows.push(to_row(&page.query, url, result));
            }
        }

        tracing::debug!(
            pages = pages.len(),
            rows = rows.len(),
            dropped_no_url,
            dropped_excluded,
            "Normalized SERP pages"
        );
        rows
    }

    fn is_excluded(&self, url: &str) -> bool {
        if is_redirect_wrapper(url) {
            return true;
        }
        match &self.exclude {
            Some(pattern) => url.to_lowercase().contains(pattern.as_str()),
            None => false,
        }
    }
}

/// Convenience for a one-off [`ResultNormalizer`].
pub fn normalize(pages: &[RawResultPage], exclude_pattern: Option<&str>) -> Vec<NormalizedResultRow> {
    ResultNormalizer::new(exclude_pattern).normalize(pages)
}

/// True for the search engine's own click-through wrappers.
pub fn is_redirect_wrapper(url: &str) -> bool {
    REDIRECT_WRAPPER_RE.is_match(url)
}

/// True when the snippet reads like coverage of a study, survey or release.
pub fn likely_press_release(description: Option<&str>) -> bool {
    let Some(text) = description else {
        return false;
    };
    let lower = text.to_lowercase();
    PRESS_RELEASE_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn clean_url(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from)
}

fn to_row(query: &str, url: String, result: &RawOrganicResult) -> NormalizedResultRow {
    NormalizedResultRow {
        query: query.to_string(),
        title: result.title.clone(),
        url,
        displayed_url: result.displayed_url.clone(),
        description: result.description.clone(),
        date: result.date.clone(),
        position: result.position,
        source: result.source.clone(),
        likely_press_release: likely_press_release(result.description.as_deref()),
    }
}
