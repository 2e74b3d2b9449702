use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use talentgate_domain::user::UserRole;

/// Account data the auth flows read and create.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-time password issued for signup or login.
///
/// Keyed by email: issuing a new code for an address replaces the previous
/// row, so at most one code per email is live at any time.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub email: String,
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// Server-side session backing the opaque cookie token.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub is_active: bool,
}

impl Session {
    /// A session authenticates iff it is still active and unexpired.
    pub fn is_valid(&self) -> bool {
        self.is_active && self.expires_at > Utc::now()
    }
}

/// Client metadata captured on the session at login.
#[derive(Debug, Clone, Default)]
pub struct RequestMetadata {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Outbox event for async delivery (e.g. OTP email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// OTP length in decimal digits.
pub const OTP_DIGITS: usize = 6;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 600;

/// Validate an email address: one `@` with a non-empty local part and a
/// domain containing at least one dot, no whitespace, at most 254 chars.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|part| !part.is_empty())
}

/// Check that a candidate OTP has exactly [`OTP_DIGITS`] ASCII digits.
pub fn is_otp_format(code: &str) -> bool {
    code.len() == OTP_DIGITS && code.bytes().all(|b| b.is_ascii_digit())
}
