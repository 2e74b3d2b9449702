use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use talentgate_auth_types::cookie::{clear_session_cookie, read_session_cookie};
use talentgate_domain::user::UserRole;

use crate::domain::types::{Session, User};
use crate::error::AuthError;
use crate::state::AppState;
use crate::usecase::session::{CurrentSessionUseCase, DestroySessionUseCase};

/// Authenticated-caller payload returned by login, verification and `/auth/me`.
/// The session token itself travels only in the cookie.
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub session: SessionResponse,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub email_verified: bool,
    #[serde(serialize_with = "talentgate_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: String,
    #[serde(serialize_with = "talentgate_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "talentgate_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl AuthResponse {
    pub fn from_parts(user: User, session: Session) -> Self {
        Self {
            user: UserResponse {
                id: user.id.to_string(),
                email: user.email,
                name: user.name,
                role: user.role,
                email_verified: user.email_verified,
                created_at: user.created_at,
            },
            session: SessionResponse {
                id: session.id.to_string(),
                created_at: session.created_at,
                expires_at: session.expires_at,
            },
        }
    }
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AuthResponse>, AuthError> {
    let token = read_session_cookie(&jar);
    let usecase = CurrentSessionUseCase {
        users: state.user_store(),
        sessions: state.session_store(),
    };
    let (user, session) = usecase
        .execute(token.as_deref())
        .await?
        .ok_or(AuthError::Unauthorized)?;
    Ok(Json(AuthResponse::from_parts(user, session)))
}

// ── DELETE /auth/session ─────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthError> {
    let token = read_session_cookie(&jar);
    let usecase = DestroySessionUseCase {
        sessions: state.session_store(),
    };
    usecase.execute(token.as_deref()).await?;
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
