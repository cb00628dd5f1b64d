//! Application state

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::db::EmployeeStore;
use crate::middleware::RateLimiter;
use crate::search::{SearchCache, SearchService};

/// Shared application state
///
/// Everything a handler needs is constructed here and injected; nothing is
/// reached through globals.
#[derive(Clone)]
pub struct AppState {
    /// Search pipeline (store + result cache)
    pub search: SearchService,
    /// Rate limiter for the search route
    pub rate_limiter: RateLimiter,
    /// Process start, for `/health` uptime
    pub started_at: Instant,
    /// Include underlying error messages in 500 responses
    pub expose_errors: bool,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn EmployeeStore>) -> Self {
        Self {
            search: SearchService::new(
                store,
                SearchCache::new(config.cache_ttl),
                config.match_mode,
            ),
            rate_limiter: RateLimiter::new(
                config.rate_limit_max_requests,
                config.rate_limit_window,
                config.trust_proxy,
            ),
            started_at: Instant::now(),
            expose_errors: config.debug_errors,
        }
    }
}
