//! Service configuration
//!
//! Resolved once at startup from environment variables. Nothing re-reads the
//! environment after [`Config::from_env`] returns.

use http::HeaderValue;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::search::MatchMode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Password wrapper that never prints its content
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Allowed cross-origin values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`
    Any,
    /// Explicit origin list
    List(Vec<HeaderValue>),
}

impl FromStr for CorsOrigins {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "*" {
            return Ok(Self::Any);
        }

        let mut origins = Vec::new();
        for origin in s.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if origin == "*" {
                return Err("`*` cannot be combined with explicit origins".into());
            }
            let value = HeaderValue::from_str(origin)
                .map_err(|_| format!("{origin:?} is not a valid header value"))?;
            origins.push(value);
        }

        if origins.is_empty() {
            return Ok(Self::Any);
        }
        Ok(Self::List(origins))
    }
}

/// Employee table identifier, optionally schema-qualified
///
/// Holds the double-quoted form ready to splice into SQL. Segments are
/// restricted to ASCII alphanumerics and `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn as_sql(&self) -> &str {
        &self.0
    }
}

impl FromStr for TableName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.trim().split('.').collect();
        if segments.len() > 2 {
            return Err("expected `table` or `schema.table`".into());
        }
        for segment in &segments {
            if segment.is_empty() {
                return Err("empty identifier segment".into());
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(format!("{segment:?} contains unsupported characters"));
            }
        }
        let quoted = segments
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(".");
        Ok(Self(quoted))
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL host
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: Secret,
    pub db_name: String,
    /// Require TLS on the database connection
    pub db_ssl: bool,
    /// Pool size
    pub db_max_connections: u32,
    /// Upper bound on waiting for a pooled connection
    pub db_acquire_timeout: Duration,
    /// Table holding the employee rows
    pub employee_table: TableName,
    /// HTTP listening port
    pub http_port: u16,
    pub cors_origins: CorsOrigins,
    pub match_mode: MatchMode,
    /// Result cache TTL (zero disables caching)
    pub cache_ttl: Duration,
    /// Interval of the expired-entry sweep
    pub cache_sweep_interval: Duration,
    /// Requests allowed per client per window (zero disables limiting)
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    /// Behind a trusted reverse proxy: rate limit on `X-Forwarded-For`
    pub trust_proxy: bool,
    /// Environment: development | staging | production
    pub environment: String,
    /// Include the underlying error message in 500 responses
    pub debug_errors: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "development".into());

        let debug_requested = flag(&lookup, "DEBUG_ERRORS", false)?;
        let debug_errors = debug_requested && environment != "production";
        if debug_requested && !debug_errors {
            tracing::warn!("DEBUG_ERRORS is ignored in production");
        }

        let http_port = match lookup("HTTP_PORT").filter(|v| !v.trim().is_empty()) {
            Some(_) => parsed(&lookup, "HTTP_PORT", 3000)?,
            None => parsed(&lookup, "PORT", 3000)?,
        };

        let db_max_connections: u32 = parsed(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        if db_max_connections == 0 {
            return Err(ConfigError::invalid(
                "DB_MAX_CONNECTIONS",
                "0",
                "must be at least 1",
            ));
        }

        let sweep_secs: u64 = parsed(&lookup, "SEARCH_CACHE_SWEEP_SECS", 30)?;
        if sweep_secs == 0 {
            return Err(ConfigError::invalid(
                "SEARCH_CACHE_SWEEP_SECS",
                "0",
                "must be at least 1",
            ));
        }

        let window_secs: u64 = parsed(&lookup, "RATE_LIMIT_WINDOW_SECS", 900)?;
        if window_secs == 0 {
            return Err(ConfigError::invalid(
                "RATE_LIMIT_WINDOW_SECS",
                "0",
                "must be at least 1",
            ));
        }

        Ok(Self {
            db_host: required(&lookup, "DB_HOST")?,
            db_port: parsed(&lookup, "DB_PORT", 5432)?,
            db_user: required(&lookup, "DB_USER")?,
            db_password: Secret(required(&lookup, "DB_PASSWORD")?),
            db_name: required(&lookup, "DB_NAME")?,
            db_ssl: flag(&lookup, "DB_SSL", false)?,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(parsed(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            employee_table: parsed_with(&lookup, "EMPLOYEE_TABLE", "employees")?,
            http_port,
            cors_origins: parsed_with(&lookup, "CORS_ORIGINS", "*")?,
            match_mode: parsed_with(&lookup, "SEARCH_MATCH_MODE", "contains")?,
            cache_ttl: Duration::from_secs(parsed(&lookup, "SEARCH_CACHE_TTL_SECS", 60)?),
            cache_sweep_interval: Duration::from_secs(sweep_secs),
            rate_limit_max_requests: parsed(&lookup, "RATE_LIMIT_MAX_REQUESTS", 100)?,
            rate_limit_window: Duration::from_secs(window_secs),
            trust_proxy: flag(&lookup, "TRUST_PROXY", false)?,
            environment,
            debug_errors,
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Parse a numeric variable, falling back to `default` when unset or blank
fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(name, &raw, e.to_string())),
        _ => Ok(default),
    }
}

/// Parse a variable whose default is itself expressed as text
fn parsed_with<F, T>(lookup: &F, name: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr<Err = String>,
{
    let raw = lookup(name)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    raw.parse()
        .map_err(|reason| ConfigError::invalid(name, &raw, reason))
}

fn flag<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name).filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(name, &raw, "expected true or false")),
    }
}
