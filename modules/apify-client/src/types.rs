use serde::Serialize;

// --- Google Search scraper types ---

/// Input for the apify/google-search-scraper actor.
///
/// Optional fields are skipped when unset so the actor applies its own
/// defaults instead of receiving explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoogleSearchInput {
    /// One query per line. The actor takes a single string, not an array.
    pub queries: String,
    #[serde(rename = "maxPagesPerQuery")]
    pub max_pages_per_query: u32,
    #[serde(rename = "countryCode", skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "languageCode", skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// `"active"` or `"off"`.
    #[serde(rename = "safeSearch", skip_serializing_if = "Option::is_none")]
    pub safe_search: Option<String>,
    /// Relative range token such as `h24`, `d7`, `m1` or `y1`.
    #[serde(rename = "quickDateRange", skip_serializing_if = "Option::is_none")]
    pub quick_date_range: Option<String>,
    /// `YYYY-MM-DD`, inclusive lower bound.
    #[serde(rename = "afterDate", skip_serializing_if = "Option::is_none")]
    pub after_date: Option<String>,
    /// `YYYY-MM-DD`, inclusive upper bound.
    #[serde(rename = "beforeDate", skip_serializing_if = "Option::is_none")]
    pub before_date: Option<String>,
}

impl GoogleSearchInput {
    /// Number of non-empty query lines carried by this input.
    pub fn query_count(&self) -> usize {
        self.queries.lines().filter(|l| !l.trim().is_empty()).count()
    }
}
