use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use talentgate_auth_types::cookie::{read_session_cookie, set_session_cookie};
use talentgate_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::AuthError;
use crate::handlers::request_metadata;
use crate::handlers::session::AuthResponse;
use crate::state::AppState;
use crate::usecase::admin::{CleanupUseCase, DeleteUserUseCase, RevokeUserSessionsUseCase};
use crate::usecase::session::CurrentSessionUseCase;
use crate::usecase::totp::{AdminLoginInput, AdminLoginUseCase};

/// Resolve the caller's cookie and require an admin account behind it.
/// Anything less is a plain 401; this surface does not reveal which check
/// failed.
async fn require_admin(state: &AppState, jar: &CookieJar) -> Result<User, AuthError> {
    let token = read_session_cookie(jar);
    let usecase = CurrentSessionUseCase {
        users: state.user_store(),
        sessions: state.session_store(),
    };
    let (user, _session) = usecase
        .execute(token.as_deref())
        .await?
        .ok_or(AuthError::Unauthorized)?;
    if user.role < UserRole::Admin {
        return Err(AuthError::Unauthorized);
    }
    Ok(user)
}

// ── POST /auth/admin/verify ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdminVerifyRequest {
    pub email: String,
    pub code: String,
}

pub async fn admin_verify(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(body): Json<AdminVerifyRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let usecase = AdminLoginUseCase {
        users: state.user_store(),
        sessions: state.session_store(),
        totp: state.admin_totp.clone(),
    };
    let out = usecase
        .execute(AdminLoginInput {
            email: body.email,
            code: body.code,
            metadata: request_metadata(&headers),
        })
        .await?;

    let jar = set_session_cookie(
        jar,
        out.session.token.clone(),
        state.cookie_domain.clone(),
    );
    let body = AuthResponse::from_parts(out.user, out.session);
    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── GET /auth/admin/totp ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TotpUrlResponse {
    pub url: String,
}

pub async fn totp_url(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<TotpUrlResponse>, AuthError> {
    require_admin(&state, &jar).await?;
    Ok(Json(TotpUrlResponse {
        url: state.admin_totp.provisioning_url(),
    }))
}

// ── POST /auth/admin/cleanup ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CleanupResponse {
    pub purged_sessions: u64,
    pub purged_otps: u64,
}

pub async fn cleanup(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<CleanupResponse>, AuthError> {
    require_admin(&state, &jar).await?;
    let usecase = CleanupUseCase {
        otps: state.otp_store(),
        sessions: state.session_store(),
    };
    let out = usecase.execute().await?;
    Ok(Json(CleanupResponse {
        purged_sessions: out.purged_sessions,
        purged_otps: out.purged_otps,
    }))
}

// ── DELETE /auth/admin/users/{id}/sessions ───────────────────────────────────

pub async fn revoke_user_sessions(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AuthError> {
    require_admin(&state, &jar).await?;
    let usecase = RevokeUserSessionsUseCase {
        users: state.user_store(),
        sessions: state.session_store(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /auth/admin/users/{id} ────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AuthError> {
    require_admin(&state, &jar).await?;
    let usecase = DeleteUserUseCase {
        users: state.user_store(),
        sessions: state.session_store(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
