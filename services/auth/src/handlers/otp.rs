use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use talentgate_auth_types::cookie::set_session_cookie;
use talentgate_domain::user::UserRole;

use crate::error::AuthError;
use crate::handlers::request_metadata;
use crate::handlers::session::AuthResponse;
use crate::state::AppState;
use crate::usecase::otp::{
    RequestLoginOtpInput, RequestLoginOtpUseCase, SignupInput, SignupUseCase, VerifyOtpInput,
    VerifyOtpUseCase,
};

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub role: Option<UserRole>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<StatusCode, AuthError> {
    let usecase = SignupUseCase {
        users: state.user_store(),
        otps: state.otp_store(),
    };
    usecase
        .execute(SignupInput {
            email: body.email,
            name: body.name,
            role: body.role,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<StatusCode, AuthError> {
    let usecase = RequestLoginOtpUseCase {
        users: state.user_store(),
        otps: state.otp_store(),
    };
    usecase
        .execute(RequestLoginOtpInput { email: body.email })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/verify ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(body): Json<VerifyRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_store(),
        otps: state.otp_store(),
        sessions: state.session_store(),
    };
    let out = usecase
        .execute(VerifyOtpInput {
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
