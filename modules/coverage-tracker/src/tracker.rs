use apify_client::{ApifyClient, GoogleSearchInput};
use async_trait::async_trait;
use coverage_core::{NormalizedResultRow, RawResultPage, ResultNormalizer, SearchRequest};
use serde_json::Value;
use tracing::{info, warn};

/// The remote half of a search: submit actor input, get dataset items back.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, input: &GoogleSearchInput) -> coverage_core::Result<Vec<Value>>;
}

#[async_trait]
impl SearchBackend for ApifyClient {
    async fn search(&self, input: &GoogleSearchInput) -> coverage_core::Result<Vec<Value>> {
        Ok(self.google_search(input).await?)
    }
}

/// Result of one submission: the table plus the raw items it came from, so
/// an empty table can be told apart from a failed call.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub raw: Vec<Value>,
    pub rows: Vec<NormalizedResultRow>,
}

impl SearchOutcome {
    pub fn page_count(&self) -> usize {
        self.raw.len()
    }

    pub fn first_raw(&self) -> Option<&Value> {
        self.raw.first()
    }
}

pub struct Tracker<B> {
    backend: B,
    normalizer: ResultNormalizer,
}

impl<B: SearchBackend> Tracker<B> {
    pub fn new(backend: B, exclude_pattern: Option<&str>) -> Self {
        Self {
            backend,
            normalizer: ResultNormalizer::new(exclude_pattern),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// One synchronous round trip. Transport failures are returned as-is,
    /// never retried.
    pub async fn run(&self, request: &SearchRequest) -> coverage_core::Result<SearchOutcome> {
        let input = request.to_actor_input();
        info!(
            queries = request.queries.len(),
            max_pages = request.max_pages_per_query,
            "Running search"
        );

        let raw = self.backend.search(&input).await?;
        let pages = RawResultPage::from_items(&raw);
        let rows = self.normalizer.normalize(&pages);

        if rows.is_empty() {
            warn!(pages = raw.len(), "Search returned no usable organic results");
        } else {
            info!(pages = raw.len(), rows = rows.len(), "Search complete");
        }

        Ok(SearchOutcome { raw, rows })
    }
}
