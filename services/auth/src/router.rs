use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use talentgate_core::health::healthz;
use talentgate_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{admin_verify, cleanup, delete_user, revoke_user_sessions, totp_url},
    health::readyz,
    otp::{login, signup, verify},
    session::{logout, me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP flows
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/verify", post(verify))
        // Session
        .route("/auth/me", get(me))
        .route("/auth/session", delete(logout))
        // Admin
        .route("/auth/admin/verify", post(admin_verify))
        .route("/auth/admin/totp", get(totp_url))
        .route("/auth/admin/cleanup", post(cleanup))
        .route(
            "/auth/admin/users/{id}/sessions",
            delete(revoke_user_sessions),
        )
        .route("/auth/admin/users/{id}", delete(delete_user))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}
