//! Short-lived search result cache
//!
//! Keyed by the raw term. Entries expire a fixed TTL after insertion,
//! regardless of how often they are read. Expired entries are never served
//! and are physically removed by [`SearchCache::purge_expired`], which
//! [`SearchCache::run_sweeper`] runs on an interval.

use dashmap::DashMap;
use shared::models::Employee;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Immutable result list shared between the cache and in-flight responses
pub type SearchResults = Arc<Vec<Employee>>;

struct CacheEntry {
    results: SearchResults,
    expires_at: Instant,
}

/// Search cache shared across requests
#[derive(Clone)]
pub struct SearchCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl SearchCache {
    /// A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, term: &str) -> Option<SearchResults> {
        let entry = self.entries.get(term)?;
        if entry.expires_at > Instant::now() {
            Some(entry.results.clone())
        } else {
            None
        }
    }

    /// Store `results` for `term`, replacing any previous entry
    pub fn set(&self, term: &str, results: SearchResults) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            term.to_owned(),
            CacheEntry {
                results,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    /// Purge expired entries every `every` until the task is aborted
    pub async fn run_sweeper(self, every: Duration) {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            if self.is_empty() {
                continue;
            }
            let removed = self.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, remaining = self.len(), "Search cache swept");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
