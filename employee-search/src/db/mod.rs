//! Database access layer

pub mod employee;

use async_trait::async_trait;
use shared::models::Employee;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

use crate::config::Config;
use crate::search::SearchQuery;

pub use employee::PgEmployeeStore;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Read-only access to the employee table
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Rows matching `query`, sorted by name, at most `query.limit` of them
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Employee>, BoxError>;
}

pub fn connect_options(config: &Config) -> PgConnectOptions {
    let ssl_mode = if config.db_ssl {
        PgSslMode::Require
    } else {
        PgSslMode::Disable
    };

    PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(config.db_password.expose())
        .database(&config.db_name)
        .ssl_mode(ssl_mode)
}

/// Build the pool and verify connectivity
///
/// Any failure here is a startup failure; callers are expected to exit.
pub async fn connect(config: &Config) -> Result<PgPool, BoxError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .idle_timeout(std::time::Duration::from_secs(600))
        .max_lifetime(std::time::Duration::from_secs(1800))
        .connect_with(connect_options(config))
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!(
        host = %config.db_host,
        port = config.db_port,
        database = %config.db_name,
        ssl = config.db_ssl,
        max_connections = config.db_max_connections,
        "Connected to PostgreSQL"
    );
    Ok(pool)
}
