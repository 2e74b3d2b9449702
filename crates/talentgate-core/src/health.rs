use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check. Always 200 while the
/// process is serving requests.
///
/// Readiness (`/readyz`) is defined per service so it can probe the
/// service's own dependencies (database, etc.).
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
