use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use talentgate_auth::router::build_router;
use talentgate_auth::state::AppState;
use talentgate_auth_types::cookie::SESSION_COOKIE;

use crate::helpers::{code_outside_current_window, test_totp};

/// Router backed by a disconnected database. Every request below answers
/// before its first query, so routing, extraction, validation and cookie
/// handling are exercised for real without a live Postgres.
fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        admin_totp: Arc::new(test_totp()),
        cookie_domain: "example.com".to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_return_200_on_healthz() {
    let server = test_server();
    let res = server.get("/healthz").await;
    res.assert_status_ok();
}

#[tokio::test]
async fn should_return_404_for_unknown_route() {
    let server = test_server();
    let res = server.get("/auth/unknown").await;
    res.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_return_401_on_me_without_cookie() {
    let server = test_server();
    let res = server.get("/auth/me").await;

    res.assert_status(StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>();
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_return_400_on_signup_with_malformed_email() {
    let server = test_server();
    let res = server
        .post("/auth/signup")
        .json(&json!({
            "email": "not-an-email",
            "name": "New Person",
        }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>();
    assert_eq!(body["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_return_400_on_verify_with_malformed_code() {
    let server = test_server();
    let res = server
        .post("/auth/verify")
        .json(&json!({
            "email": "user@example.com",
            "code": "12",
        }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["message"], "code must be 6 digits");
}

#[tokio::test]
async fn should_return_204_and_clear_cookie_on_logout_without_session() {
    let server = test_server();
    let res = server.delete("/auth/session").await;

    res.assert_status(StatusCode::NO_CONTENT);
    // Logout always answers with a cleared cookie.
    let cookie = res.cookie(SESSION_COOKIE);
    assert_eq!(cookie.value(), "");
}

#[tokio::test]
async fn should_return_401_on_admin_totp_url_without_cookie() {
    let server = test_server();
    let res = server.get("/auth/admin/totp").await;

    res.assert_status(StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>();
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_return_401_on_admin_cleanup_without_cookie() {
    let server = test_server();
    let res = server.post("/auth/admin/cleanup").await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_401_on_admin_user_routes_without_cookie() {
    let server = test_server();
    let id = Uuid::new_v4();

    let res = server
        .delete(&format!("/auth/admin/users/{id}/sessions"))
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);

    let res = server.delete(&format!("/auth/admin/users/{id}")).await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_400_on_admin_user_route_with_malformed_id() {
    let server = test_server();
    // Path<Uuid> rejects before the handler runs.
    let res = server.delete("/auth/admin/users/not-a-uuid").await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_401_on_admin_verify_with_wrong_code() {
    let server = test_server();
    // Same secret as the server, so the code is wrong for any step the
    // verifier will consider.
    let wrong = code_outside_current_window(&test_totp());

    let res = server
        .post("/auth/admin/verify")
        .json(&json!({
            "email": "admin@example.com",
            "code": wrong,
        }))
        .await;

    res.assert_status(StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>();
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_return_400_on_admin_verify_with_malformed_code() {
    let server = test_server();
    let res = server
        .post("/auth/admin/verify")
        .json(&json!({
            "email": "admin@example.com",
            "code": "99",
        }))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>();
    assert_eq!(body["kind"], "VALIDATION");
}
