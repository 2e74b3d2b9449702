use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Readiness probe: pings the database. 503 until the connection works, so
/// the orchestrator holds traffic back instead of routing into failures.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
