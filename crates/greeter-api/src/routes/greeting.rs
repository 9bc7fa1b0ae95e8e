//! `GET /` — the current greeting.

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(current_greeting))
}

/// Respond with the newest greeting followed by a newline.
async fn current_greeting(State(state): State<AppState>) -> Result<String, AppError> {
    let message = state
        .store()
        .current_greeting()
        .await
        .map_err(AppError::Greeting)?;
    tracing::debug!(greeting = %message, "served greeting");
    Ok(format!("{message}\n"))
}
