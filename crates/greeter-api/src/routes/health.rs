//! `GET /health` — database liveness probe.

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// 200 `OK` while the store answers, 503 otherwise.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state
        .store()
        .ping()
        .await
        .map_err(AppError::StoreUnavailable)?;
    Ok("OK\n")
}
