use chrono::{Duration, Utc};
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use talentgate_domain::user::UserRole;

use crate::domain::repository::{OtpStore, SessionStore, UserStore};
use crate::domain::types::{
    OTP_DIGITS, OTP_TTL_SECS, OtpRecord, OutboxEvent, RequestMetadata, Session, User,
    is_otp_format, validate_email,
};
use crate::error::AuthError;
use crate::usecase::session::build_session;

/// Charset for generating random OTP codes (decimal digits).
const CHARSET: &[u8] = b"0123456789";

pub fn generate_otp_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_DIGITS)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Build a fresh OTP record for `email` plus the outbox event that hands the
/// code to the mail relay. The two are persisted in one transaction.
fn issue_otp(email: &str, purpose: &str) -> (OtpRecord, OutboxEvent) {
    let now = Utc::now();
    let record = OtpRecord {
        email: email.to_owned(),
        code: generate_otp_code(),
        issued_at: now,
        expires_at: now + Duration::seconds(OTP_TTL_SECS),
    };
    let event_id = Uuid::new_v4();
    let event = OutboxEvent {
        id: event_id,
        kind: "otp_issued".to_owned(),
        payload: json!({
            "email": record.email,
            "code": record.code,
            "purpose": purpose,
        }),
        idempotency_key: format!("otp_issued:{event_id}"),
    };
    (record, event)
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub email: String,
    pub name: String,
    pub role: Option<UserRole>,
}

pub struct SignupUseCase<U, O>
where
    U: UserStore,
    O: OtpStore,
{
    pub users: U,
    pub otps: O,
}

impl<U, O> SignupUseCase<U, O>
where
    U: UserStore,
    O: OtpStore,
{
    pub async fn execute(&self, input: SignupInput) -> Result<(), AuthError> {
        if !validate_email(&input.email) {
            return Err(AuthError::Validation("email is malformed".to_owned()));
        }
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("name must not be empty".to_owned()));
        }
        let role = input.role.unwrap_or(UserRole::Candidate);
        if !role.assignable_at_signup() {
            return Err(AuthError::Validation(
                "role must be candidate or recruiter".to_owned(),
            ));
        }

        // A verified account is a duplicate. An unverified one just gets a
        // fresh code; the stored profile wins over the resubmitted one.
        match self.users.find_by_email(&input.email).await? {
            Some(user) if user.email_verified => return Err(AuthError::Conflict),
            Some(_) => {}
            None => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::now_v7(),
                    email: input.email.clone(),
                    name: name.to_owned(),
                    role,
                    email_verified: false,
                    deleted_at: None,
                    created_at: now,
                    updated_at: now,
                };
                self.users.create(&user).await?;
            }
        }

        let (record, event) = issue_otp(&input.email, "signup");
        self.otps.upsert(&record, &event).await?;
        Ok(())
    }
}

// ── RequestLoginOtp ──────────────────────────────────────────────────────────

pub struct RequestLoginOtpInput {
    pub email: String,
}

pub struct RequestLoginOtpUseCase<U, O>
where
    U: UserStore,
    O: OtpStore,
{
    pub users: U,
    pub otps: O,
}

impl<U, O> RequestLoginOtpUseCase<U, O>
where
    U: UserStore,
    O: OtpStore,
{
    pub async fn execute(&self, input: RequestLoginOtpInput) -> Result<(), AuthError> {
        if !validate_email(&input.email) {
            return Err(AuthError::Validation("email is malformed".to_owned()));
        }

        self.users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::NotFound)?;

        let (record, event) = issue_otp(&input.email, "login");
        self.otps.upsert(&record, &event).await?;
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
    pub metadata: RequestMetadata,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub user: User,
    pub session: Session,
}

pub struct VerifyOtpUseCase<U, O, S>
where
    U: UserStore,
    O: OtpStore,
    S: SessionStore,
{
    pub users: U,
    pub otps: O,
    pub sessions: S,
}

impl<U, O, S> VerifyOtpUseCase<U, O, S>
where
    U: UserStore,
    O: OtpStore,
    S: SessionStore,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, AuthError> {
        // Malformed codes are rejected before any lookup.
        if !is_otp_format(&input.code) {
            return Err(AuthError::Validation(format!(
                "code must be {OTP_DIGITS} digits"
            )));
        }

        let mut user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::NotFound)?;

        // Expired, consumed and never-issued codes all land here.
        if !self.otps.consume_valid(&input.email, &input.code).await? {
            return Err(AuthError::NotFound);
        }

        // First successful verification proves ownership of the address.
        if !user.email_verified {
            self.users.set_email_verified(user.id).await?;
            user.email_verified = true;
        }

        let session = build_session(user.id, &input.metadata);
        self.sessions.create(&session).await?;

        Ok(VerifyOtpOutput { user, session })
    }
}
