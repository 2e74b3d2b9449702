use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use talentgate_auth::config::AuthConfig;
use talentgate_auth::router::build_router;
use talentgate_auth::state::AppState;
use talentgate_auth::usecase::totp::AdminTotp;
use talentgate_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let admin_totp = AdminTotp::new(
        &config.admin_totp_secret,
        config.totp_digits,
        config.totp_step,
        &config.totp_issuer,
        &config.totp_account,
    )
    .expect("invalid TOTP configuration");

    let state = AppState {
        db,
        admin_totp: Arc::new(admin_totp),
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
