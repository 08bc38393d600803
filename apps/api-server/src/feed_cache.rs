//! Home-feed page cache.
//!
//! The home feed is cached as a whole rendering per page for a fixed TTL.
//! Writes do not invalidate it: within the TTL a reader may see a stale
//! listing, which is accepted behavior.

use std::sync::Arc;
use std::time::Duration;

use murmur_core::ports::Cache;

const CACHE_KEY_PREFIX: &str = "index_page";

/// Time-boxed cache of the rendered home-feed pages.
#[derive(Clone)]
pub struct HomeFeedCache {
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl HomeFeedCache {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Parse the untrusted `?page=` value the same way pagination does.
    /// Keys are derived from page numbers, never from the raw query string,
    /// so arbitrary query values cannot mint new cache entries.
    fn requested_page(raw_page: Option<&str>) -> usize {
        raw_page
            .and_then(|s| s.trim().parse::<usize>().ok())
            .map(|n| n.max(1))
            .unwrap_or(1)
    }

    fn key(page_number: usize) -> String {
        format!("{CACHE_KEY_PREFIX}:{page_number}")
    }

    /// Stored rendering for the requested page, if still fresh.
    pub async fn get(&self, raw_page: Option<&str>) -> Option<String> {
        self.cache
            .get(&Self::key(Self::requested_page(raw_page)))
            .await
    }

    /// Store the rendered body under the page number actually served, which
    /// keeps the live key count bounded by the number of pages.
    pub async fn store(&self, page_number: usize, body: &str) {
        if let Err(e) = self
            .cache
            .set(&Self::key(page_number), body, Some(self.ttl))
            .await
        {
            tracing::warn!("Failed to cache home feed page: {}", e);
        }
    }
}
