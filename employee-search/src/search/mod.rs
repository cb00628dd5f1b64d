//! Employee search pipeline: validate, consult the cache, query the store.

pub mod cache;
pub mod query;

pub use cache::{SearchCache, SearchResults};
pub use query::{MatchMode, QueryDecision, SearchQuery};

use std::sync::Arc;

use crate::db::EmployeeStore;
use crate::error::ServiceResult;

#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn EmployeeStore>,
    cache: SearchCache,
    mode: MatchMode,
}

impl SearchService {
    pub fn new(store: Arc<dyn EmployeeStore>, cache: SearchCache, mode: MatchMode) -> Self {
        Self { store, cache, mode }
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Run a search for the raw `term` parameter.
    ///
    /// Absent or empty terms yield an empty list without touching the store.
    pub async fn search(&self, raw: Option<&str>) -> ServiceResult<SearchResults> {
        let term = match QueryDecision::from_raw(raw) {
            QueryDecision::Empty => return Ok(SearchResults::default()),
            QueryDecision::Proceed(term) => term,
        };

        if let Some(hit) = self.cache.get(term) {
            tracing::debug!(term = %term, results = hit.len(), cache = "hit", "Employee search");
            return Ok(hit);
        }

        let query = SearchQuery::new(term, self.mode);
        let mut rows = self.store.search(&query).await?;
        rows.truncate(query.limit);

        tracing::debug!(term = %term, results = rows.len(), cache = "miss", "Employee search");

        let results = Arc::new(rows);
        self.cache.set(term, results.clone());
        Ok(results)
    }
}
