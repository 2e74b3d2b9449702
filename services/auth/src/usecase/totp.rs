use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::anyhow;
use totp_rs::{Algorithm, Secret, TOTP};

use talentgate_domain::user::UserRole;

use crate::domain::repository::{SessionStore, UserStore};
use crate::domain::types::{RequestMetadata, Session, User};
use crate::error::AuthError;
use crate::usecase::session::build_session;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Stateless RFC 6238 verifier for the admin login path.
///
/// One shared secret, SHA-1, one step of clock skew either side. Nothing is
/// persisted on this path; possession of the secret plus an admin account is
/// the whole credential.
pub struct AdminTotp {
    totp: TOTP,
    digits: usize,
}

impl AdminTotp {
    pub fn new(
        secret_base32: &str,
        digits: usize,
        step: u64,
        issuer: &str,
        account: &str,
    ) -> anyhow::Result<Self> {
        let secret_bytes = Secret::Encoded(secret_base32.to_owned())
            .to_bytes()
            .map_err(|e| anyhow!("decode TOTP secret: {e}"))?;
        let totp = TOTP::new(
            Algorithm::SHA1,
            digits,
            1,
            step,
            secret_bytes,
            Some(issuer.to_owned()),
            account.to_owned(),
        )
        .map_err(|e| anyhow!("build TOTP: {e}"))?;
        Ok(Self { totp, digits })
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Zero-padded decimal code for the current time step.
    pub fn generate(&self) -> String {
        self.totp.generate(now_secs())
    }

    /// Code for the step containing `ts` (unix seconds).
    pub fn generate_at(&self, ts: u64) -> String {
        self.totp.generate(ts)
    }

    /// Exactly `digits` ASCII digits.
    pub fn is_well_formed(&self, candidate: &str) -> bool {
        candidate.len() == self.digits && candidate.bytes().all(|b| b.is_ascii_digit())
    }

    /// True iff `candidate` matches the current step or an adjacent one.
    pub fn verify(&self, candidate: &str) -> bool {
        self.verify_at(candidate, now_secs())
    }

    pub fn verify_at(&self, candidate: &str, ts: u64) -> bool {
        self.is_well_formed(candidate) && self.totp.check(candidate, ts)
    }

    /// otpauth:// URL for enrolling an authenticator app. Display only.
    pub fn provisioning_url(&self) -> String {
        self.totp.get_url()
    }
}

// ── AdminLogin ───────────────────────────────────────────────────────────────

pub struct AdminLoginInput {
    pub email: String,
    pub code: String,
    pub metadata: RequestMetadata,
}

#[derive(Debug)]
pub struct AdminLoginOutput {
    pub user: User,
    pub session: Session,
}

pub struct AdminLoginUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
    pub totp: Arc<AdminTotp>,
}

impl<U, S> AdminLoginUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    pub async fn execute(&self, input: AdminLoginInput) -> Result<AdminLoginOutput, AuthError> {
        // The code is checked statelessly before any lookup.
        if !self.totp.is_well_formed(&input.code) {
            return Err(AuthError::Validation(format!(
                "code must be {} digits",
                self.totp.digits()
            )));
        }
        if !self.totp.verify(&input.code) {
            return Err(AuthError::Unauthorized);
        }

        // A valid code only authenticates a known admin account.
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::NotFound)?;
        if user.role != UserRole::Admin {
            return Err(AuthError::NotFound);
        }

        let session = build_session(user.id, &input.metadata);
        self.sessions.create(&session).await?;

        Ok(AdminLoginOutput { user, session })
    }
}
