//! # greeter-api — Axum HTTP Service for the Greeter
//!
//! Serves the most recently stored greeting and a database health probe.
//!
//! ## API Surface
//!
//! | Method | Path      | Success          | Failure                              |
//! |--------|-----------|------------------|--------------------------------------|
//! | GET    | `/`       | 200 `<greeting>` | 500 `Internal Server Error`          |
//! | GET    | `/health` | 200 `OK`         | 503 `Database connection failed`     |
//!
//! Any other path falls through to axum's default 404.
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → Handler
//! ```

pub mod bootstrap;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Assemble the application router with both routes and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::greeting::router())
        .merge(routes::health::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}
