//! # Service Bootstrap
//!
//! Drives the process from configuration to a serving listener.
//!
//! ## Bootstrap Sequence
//!
//! 1. **Log version** — structured startup banner.
//! 2. **Initialize storage** — open pool, probe, bootstrap schema.
//! 3. **Build router** — `/` and `/health` over the shared store.
//! 4. **Bind listener** — `0.0.0.0:<PORT>`.
//! 5. **Serve** — until the listener fails.
//!
//! Every step returns a typed [`StartupError`]; the binary decides how to
//! exit. The pool is closed on every return path after step 2.

use std::net::SocketAddr;

use greeter_store::{ConfigError, PgGreetingStore, StoreError};
use tokio::net::TcpListener;

use crate::state::{AppConfig, AppState};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Fatal errors between process start and the end of serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Environment configuration could not be interpreted.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pool probe or schema bootstrap failed.
    #[error("storage initialization failed: {0}")]
    Store(#[from] StoreError),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The listener failed while serving.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Run the service until the listener fails.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    log_startup_banner(&config);

    let pool = greeter_store::initialize(&config.database).await?;
    let state = AppState::new(PgGreetingStore::new(pool.clone()));

    let result = async move {
        let addr = config.listen_addr();
        let listener = bind(addr).await?;
        tracing::info!("Server running at http://{addr}/");
        serve(listener, state).await
    }
    .await;

    pool.close().await;
    tracing::info!("database pool closed");
    result
}

/// Bind the TCP listener for `addr`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

/// Serve the application router on an already-bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), StartupError> {
    axum::serve(listener, crate::app(state))
        .await
        .map_err(StartupError::Serve)
}

fn log_startup_banner(config: &AppConfig) {
    tracing::info!(
        version = %config.version,
        port = config.port,
        seed = config.database.seed.as_str(),
        "Starting greeter-api version: {}",
        config.version
    );
}
