//! HTTP middleware

pub mod logging;
pub mod rate_limit;

pub use logging::logging_middleware;
pub use rate_limit::{RateLimiter, search_rate_limit};
