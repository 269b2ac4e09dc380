//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! the per-crate error types and their RFC 7807 responses.

mod app;
mod config;

use std::sync::Arc;

use auth::application::{BootstrapOutcome, BootstrapUseCase};
use auth::{AuthAppState, SessionStore, SqliteAuthRepository};
use platform::database;
use todo::{LookupDefaults, SeedLookupsUseCase, SqliteTodoRepository};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,todo=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database
    let pool = database::connect(&config.database_path).await?;
    database::migrate(&pool).await?;

    let users = Arc::new(SqliteAuthRepository::new(pool.clone()));
    let todo = Arc::new(SqliteTodoRepository::new(pool));

    SeedLookupsUseCase::new(todo.clone())
        .execute(&LookupDefaults::default())
        .await?;

    // Default administrator; must finish before we accept connections
    let auth_config = Arc::new(config.auth_config());
    match BootstrapUseCase::new(users.clone(), auth_config.clone(), config.bootstrap.clone())
        .execute()
        .await?
    {
        BootstrapOutcome::Created { user, .. } => {
            tracing::info!(user_id = %user.id, "Default administrator created");
        }
        BootstrapOutcome::AlreadyDone { user_name, drifted } => {
            tracing::info!(user_name = %user_name, drifted, "Default administrator already present");
        }
    }

    let sessions = Arc::new(SessionStore::new());
    if let Some(period) = config.session_sweep {
        spawn_session_sweep(sessions.clone(), period);
    }

    let auth = AuthAppState {
        repo: users,
        sessions,
        config: auth_config,
    };

    let mut app = app::router(auth, todo);
    if let Some(cors) = app::cors(&config.frontend_origins) {
        app = app.layer(cors);
    }

    // Start server
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Drop expired sessions periodically. Expiry is enforced on every read
/// regardless; this only bounds memory.
fn spawn_session_sweep(sessions: Arc<SessionStore>, period: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired(chrono::Utc::now());
            if purged > 0 {
                tracing::debug!(purged, "Expired sessions swept");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
