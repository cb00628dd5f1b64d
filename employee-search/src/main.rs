//! employee-search — employee lookup service
//!
//! Long-running HTTP service that:
//! - Answers `GET /search-employees?term=...` with matching employee rows
//! - Caches results per raw term for a short, fixed TTL
//! - Rate limits the search route per client
//! - Exposes `GET /health` as a liveness check

mod api;
mod config;
mod db;
mod error;
mod middleware;
mod search;
mod shutdown;
mod state;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use config::Config;
use db::{BoxError, PgEmployeeStore};
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_search=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()
        .inspect_err(|e| tracing::error!("Invalid configuration: {e}"))?;

    tracing::info!(
        "Starting employee-search (env: {}, match: {})",
        config.environment,
        config.match_mode
    );

    // No retry: an unreachable database at startup is fatal
    let pool = db::connect(&config)
        .await
        .inspect_err(|e| tracing::error!("Database connectivity check failed: {e}"))?;

    let store = Arc::new(PgEmployeeStore::new(pool.clone(), &config.employee_table));
    let state = AppState::new(&config, store);
    let app = api::create_router(state.clone(), &config.cors_origins);

    // Periodic cache sweep
    let cache_sweeper = tokio::spawn(
        state
            .search
            .cache()
            .clone()
            .run_sweeper(config.cache_sweep_interval),
    );

    // Periodic rate limiter cleanup (every 5 minutes)
    let limiter_cleanup = tokio::spawn(
        state
            .rate_limiter
            .clone()
            .run_cleanup(std::time::Duration::from_secs(300)),
    );

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!("employee-search HTTP listening on {http_addr}");

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown::shutdown_signal())
    .await;

    cache_sweeper.abort();
    limiter_cleanup.abort();

    // In-flight requests have drained; release connections before exit
    pool.close().await;
    tracing::info!("Database pool closed");

    if let Err(e) = served {
        tracing::error!("HTTP server error: {e}");
        return Err(e.into());
    }
    Ok(())
}
