use std::time::Duration;

use anyhow::{bail, Context, Result};
use apify_client::{ApifyClient, DEFAULT_BASE_URL, GOOGLE_SEARCH_SCRAPER};

const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Runtime configuration loaded from environment variables.
/// Holds the Apify credential, so it is never printed whole.
#[derive(Clone)]
pub struct TrackerConfig {
    pub apify_token: String,
    pub apify_base_url: String,
    pub apify_actor: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("apify_token", &"<redacted>")
            .field("apify_base_url", &self.apify_base_url)
            .field("apify_actor", &self.apify_actor)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TrackerConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(apify_token) = non_empty("APIFY_TOKEN").or_else(|| non_empty("APIFY_API_KEY"))
        else {
            bail!("APIFY_TOKEN environment variable is required");
        };

        let timeout_secs = match non_empty("APIFY_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("APIFY_TIMEOUT_SECS must be a number, got '{raw}'"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            apify_token: apify_token.trim().to_string(),
            apify_base_url: non_empty("APIFY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            apify_actor: non_empty("APIFY_ACTOR").unwrap_or_else(|| GOOGLE_SEARCH_SCRAPER.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn apify_client(&self) -> ApifyClient {
        ApifyClient::new(self.apify_token.clone())
            .with_base_url(&self.apify_base_url)
            .with_actor(&self.apify_actor)
            .with_timeout(self.timeout)
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  APIFY_TOKEN: set ({} chars)", self.apify_token.len());
        tracing::info!("  APIFY_BASE_URL: {}", self.apify_base_url);
        tracing::info!("  APIFY_ACTOR: {}", self.apify_actor);
        tracing::info!("  APIFY_TIMEOUT_SECS: {}", self.timeout.as_secs());
    }
}
