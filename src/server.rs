//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database migrations, and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::memory::InMemoryCatalog;
use crate::infrastructure::persistence::{PgAuthorRepository, PgBookRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory catalog)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects the configured storage backend and wraps it in [`AppState`].
async fn build_state(config: &Config) -> Result<AppState> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("No database configured, catalog is kept in memory");
        return Ok(AppState::in_memory());
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    Ok(AppState::new(
        Arc::new(PgBookRepository::new(pool.clone())),
        Arc::new(PgAuthorRepository::new(pool)),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_state_without_database_is_in_memory() {
        let config = Config {
            database_url: None,
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            db_max_connections: 1,
            db_connect_timeout: 1,
            db_idle_timeout: 1,
            db_max_lifetime: 1,
        };

        let state = build_state(&config).await.unwrap();

        assert_eq!(state.book_service.count().await.unwrap(), 0);
    }
}
