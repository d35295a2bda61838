//! Loosely-typed SERP pages as the search actor returns them.
//!
//! The actor's output schema has drifted across versions, so every field is
//! looked up through an ordered table of JSON pointers and the first present,
//! non-null candidate wins. Missing fields are never an error.

use serde_json::Value;

/// Candidate locations of each field, in priority order.
pub mod aliases {
    pub const QUERY_TERM: &[&str] = &["/searchQuery/term", "/query", "/term", "/searchTerm"];
    pub const ORGANIC_RESULTS: &[&str] = &["/organicResults", "/organic", "/results"];

    pub const TITLE: &[&str] = &["/title", "/name"];
    pub const URL: &[&str] = &["/url", "/link", "/href"];
    pub const DISPLAYED_URL: &[&str] = &["/displayedUrl", "/displayUrl", "/displayLink", "/shortUrl"];
    pub const DESCRIPTION: &[&str] = &["/description", "/snippet", "/text"];
    pub const DATE: &[&str] = &["/date", "/publishedDate", "/publishDate", "/datePublished"];
    pub const POSITION: &[&str] = &["/position", "/rank"];
    pub const SOURCE: &[&str] = &["/source", "/siteName", "/sourceName"];
    pub const RESULT_TYPE: &[&str] = &["/type", "/resultType"];
}

/// One organic result. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOrganicResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub displayed_url: Option<String>,
    pub description: Option<String>,
    /// Vendor text verbatim; both "Jan 5, 2025" and "3 days ago" occur.
    pub date: Option<String>,
    pub source: Option<String>,
    pub position: Option<i64>,
    pub result_type: Option<String>,
}

impl RawOrganicResult {
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: text_field(value, aliases::TITLE),
            url: text_field(value, aliases::URL),
            displayed_url: text_field(value, aliases::DISPLAYED_URL),
            description: text_field(value, aliases::DESCRIPTION),
            date: text_field(value, aliases::DATE),
            source: text_field(value, aliases::SOURCE),
            position: int_field(value, aliases::POSITION),
            result_type: text_field(value, aliases::RESULT_TYPE),
        }
    }
}

/// One result page for one submitted query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResultPage {
    /// Empty when the page does not say which query produced it.
    pub query: String,
    pub organic_results: Vec<RawOrganicResult>,
}

impl RawResultPage {
    pub fn from_value(value: &Value) -> Self {
        let query = text_field(value, aliases::QUERY_TERM).unwrap_or_default();
        let organic_results = first_present(value, aliases::ORGANIC_RESULTS)
            .and_then(Value::as_array)
            .map(|results| results.iter().map(RawOrganicResult::from_value).collect())
            .unwrap_or_default();

        Self {
            query,
            organic_results,
        }
    }

    /// Parse every dataset item. Items that are not objects yield empty pages.
    pub fn from_items(items: &[Value]) -> Vec<Self> {
        items
            .iter()
            .map(|item| {
                if !item.is_object() {
                    tracing::debug!(kind = value_kind(item), "Dataset item is not an object");
                }
                Self::from_value(item)
            })
            .collect()
    }
}

fn first_present<'a>(value: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|pointer| value.pointer(pointer))
        .find(|v| !v.is_null())
}

/// First candidate holding a scalar, coerced to text. Objects and arrays are
/// skipped so a structured field never masks a plain one further down.
fn text_field(value: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|pointer| value.pointer(pointer))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
}

fn int_field(value: &Value, candidates: &[&str]) -> Option<i64> {
    candidates
        .iter()
        .filter_map(|pointer| value.pointer(pointer))
        .find_map(|v| match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
