use std::fmt;
use std::str::FromStr;

use apify_client::GoogleSearchInput;
use chrono::{Days, Local, NaiveDate};

use crate::error::{CoverageError, Result};

/// Textual date format the search actor accepts for explicit windows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Width of the window used to approximate "last 48 hours".
const LAST_48H_WINDOW_DAYS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeSearch {
    Active,
    Off,
}

impl SafeSearch {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeSearch::Active => "active",
            SafeSearch::Off => "off",
        }
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafeSearch {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "on" => Ok(SafeSearch::Active),
            "off" => Ok(SafeSearch::Off),
            other => Err(CoverageError::validation(format!(
                "unknown safe search mode '{other}' (expected active or off)"
            ))),
        }
    }
}

/// How far back results may date, as chosen by a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recency {
    #[default]
    AnyTime,
    Last24Hours,
    Last48Hours,
    Last7Days,
    Last30Days,
    Last12Months,
    Custom,
}

impl Recency {
    pub const ALL: [Recency; 7] = [
        Recency::AnyTime,
        Recency::Last24Hours,
        Recency::Last48Hours,
        Recency::Last7Days,
        Recency::Last30Days,
        Recency::Last12Months,
        Recency::Custom,
    ];

    /// Short name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recency::AnyTime => "any",
            Recency::Last24Hours => "24h",
            Recency::Last48Hours => "48h",
            Recency::Last7Days => "7d",
            Recency::Last30Days => "30d",
            Recency::Last12Months => "12mo",
            Recency::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recency::AnyTime => "Any time",
            Recency::Last24Hours => "Last 24 hours",
            Recency::Last48Hours => "Last 48 hours",
            Recency::Last7Days => "Last 7 days",
            Recency::Last30Days => "Last 30 days",
            Recency::Last12Months => "Last 12 months",
            Recency::Custom => "Custom range",
        }
    }
}

impl fmt::Display for Recency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recency {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Recency::ALL
            .into_iter()
            .find(|r| r.as_str() == needle || r.label().to_ascii_lowercase() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = Recency::ALL.iter().map(|r| r.as_str()).collect();
                CoverageError::validation(format!(
                    "unknown recency '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Relative ranges the search actor supports natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeRange {
    PastDay,
    PastWeek,
    PastMonth,
    PastYear,
}

impl RelativeRange {
    /// `quickDateRange` token understood by the actor.
    pub fn token(&self) -> &'static str {
        match self {
            RelativeRange::PastDay => "h24",
            RelativeRange::PastWeek => "d7",
            RelativeRange::PastMonth => "m1",
            RelativeRange::PastYear => "y1",
        }
    }
}

/// Vendor-side encoding of a [`Recency`] choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyFilter {
    Relative(RelativeRange),
    /// Inclusive on both ends.
    Window { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_pages_per_query: u32,
    pub country_code: Option<String>,
    pub language_code: Option<String>,
    pub safe_search: Option<SafeSearch>,
    pub recency: Recency,
    /// Only read when `recency` is [`Recency::Custom`].
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_pages_per_query: 1,
            country_code: None,
            language_code: None,
            safe_search: None,
            recency: Recency::AnyTime,
            custom_start: None,
            custom_end: None,
        }
    }
}

/// A validated, normalized search submission.
///
/// Country and language codes are lower-cased (`US` becomes `us`), which is
/// what the Google search actor's input schema lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub queries: Vec<String>,
    pub max_pages_per_query: u32,
    pub country_code: Option<String>,
    pub language_code: Option<String>,
    pub safe_search: Option<SafeSearch>,
    pub recency: Option<RecencyFilter>,
}

impl SearchRequest {
    /// Wire payload for the search actor. Unset options are left out so the
    /// actor falls back to its defaults.
    pub fn to_actor_input(&self) -> GoogleSearchInput {
        let (quick_date_range, after_date, before_date) = match self.recency {
            None => (None, None, None),
            Some(RecencyFilter::Relative(range)) => (Some(range.token().to_string()), None, None),
            Some(RecencyFilter::Window { start, end }) => (
                None,
                Some(start.format(DATE_FORMAT).to_string()),
                Some(end.format(DATE_FORMAT).to_string()),
            ),
        };

        GoogleSearchInput {
            queries: self.queries.join("\n"),
            max_pages_per_query: self.max_pages_per_query,
            country_code: self.country_code.clone(),
            language_code: self.language_code.clone(),
            safe_search: self.safe_search.map(|s| s.as_str().to_string()),
            quick_date_range,
            after_date,
            before_date,
        }
    }
}

/// Turns user-entered queries and options into a [`SearchRequest`].
///
/// The reference date for relative windows is fixed at construction so
/// building stays deterministic.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder {
    today: NaiveDate,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    /// Builder anchored on the local calendar date.
    pub fn new() -> Self {
        Self::on(Local::now().date_naive())
    }

    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn build<I, S>(&self, queries: I, options: &SearchOptions) -> Result<SearchRequest>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let queries = clean_queries(queries);
        if queries.is_empty() {
            return Err(CoverageError::validation("at least one non-empty query is required"));
        }
        if options.max_pages_per_query == 0 {
            return Err(CoverageError::validation("max pages per query must be at least 1"));
        }

        let recency = self.recency(options.recency, options.custom_start, options.custom_end)?;

        let request = SearchRequest {
            queries,
            max_pages_per_query: options.max_pages_per_query,
            country_code: normalize_code(options.country_code.as_deref()),
            language_code: normalize_code(options.language_code.as_deref()),
            safe_search: options.safe_search,
            recency,
        };

        tracing::debug!(
            queries = request.queries.len(),
            max_pages = request.max_pages_per_query,
            recency = %options.recency,
            "Built search request"
        );
        Ok(request)
    }

    /// Translate a recency choice into the actor's filter encoding.
    ///
    /// The actor has no 48 hour token, so [`Recency::Last48Hours`] becomes an
    /// explicit window from two days ago to today. Caller dates are only
    /// consulted for [`Recency::Custom`].
    pub fn recency(
        &self,
        selector: Recency,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<RecencyFilter>> {
        let filter = match selector {
            Recency::AnyTime => None,
            Recency::Last24Hours => Some(RecencyFilter::Relative(RelativeRange::PastDay)),
            Recency::Last48Hours => {
                let start = self
                    .today
                    .checked_sub_days(Days::new(LAST_48H_WINDOW_DAYS))
                    .ok_or_else(|| CoverageError::validation("date out of range"))?;
                Some(RecencyFilter::Window {
                    start,
                    end: self.today,
                })
            }
            Recency::Last7Days => Some(RecencyFilter::Relative(RelativeRange::PastWeek)),
            Recency::Last30Days => Some(RecencyFilter::Relative(RelativeRange::PastMonth)),
            Recency::Last12Months => Some(RecencyFilter::Relative(RelativeRange::PastYear)),
            Recency::Custom => {
                let (Some(start), Some(end)) = (start, end) else {
                    return Err(CoverageError::validation(
                        "custom date range needs both a start and an end date",
                    ));
                };
                if start > end {
                    return Err(CoverageError::validation(format!(
                        "start date {start} must be on or before end date {end}"
                    )));
                }
                Some(RecencyFilter::Window { start, end })
            }
        };
        Ok(filter)
    }
}

/// Split on newlines, trim, and drop blank lines. A single entry may hold
/// several queries when it came from a multi-line text box.
fn clean_queries<I, S>(queries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    queries
        .into_iter()
        .flat_map(|q| {
            q.as_ref()
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_ascii_lowercase())
}
