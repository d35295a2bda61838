pub mod error;
pub mod types;

pub use error::{ApifyError, ErrorBody, Result};
pub use types::GoogleSearchInput;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for apify/google-search-scraper.
pub const GOOGLE_SEARCH_SCRAPER: &str = "apify~google-search-scraper";

/// Synchronous runs can take minutes when several result pages are requested.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    actor: String,
    timeout: Duration,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            actor: GOOGLE_SEARCH_SCRAPER.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Use a different search actor, e.g. a fork of the Google scraper.
    pub fn with_actor(mut self, actor: &str) -> Self {
        self.actor = actor.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Run an actor synchronously and return its default dataset items.
    ///
    /// Blocks until the run finishes or the request times out. Non-2xx
    /// responses come back as [`ApifyError::Api`] with the raw body.
    pub async fn run_sync_get_dataset_items<I: Serialize>(
        &self,
        actor: &str,
        input: &I,
    ) -> Result<Vec<Value>> {
        let url = format!("{}/acts/{}/run-sync-get-dataset-items", self.base_url, actor);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .timeout(self.timeout)
            .json(input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(actor, status = status.as_u16(), "Apify run failed");
            return Err(ApifyError::Api {
                status: status.as_u16(),
                body: ErrorBody::from_text(text),
            });
        }

        let text = resp.text().await?;
        let items: Vec<Value> = serde_json::from_str(&text)?;
        Ok(items)
    }

    /// Run the configured Google search actor. Returns one item per SERP page.
    pub async fn google_search(&self, input: &GoogleSearchInput) -> Result<Vec<Value>> {
        tracing::info!(
            actor = %self.actor,
            queries = input.query_count(),
            max_pages = input.max_pages_per_query,
            "Starting Google search run"
        );

        let items = self.run_sync_get_dataset_items(&self.actor, input).await?;
        tracing::info!(count = items.len(), "Fetched SERP pages");

        Ok(items)
    }
}
