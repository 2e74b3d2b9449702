use chrono::{Duration, Utc};
use uuid::Uuid;

use talentgate_auth_types::cookie::SESSION_TTL_SECS;
use talentgate_auth_types::token::SessionToken;

use crate::domain::repository::{SessionStore, UserStore};
use crate::domain::types::{RequestMetadata, Session, User};
use crate::error::AuthError;

/// Build a fresh session for `user_id`: new opaque token, 7-day expiry,
/// client metadata for audit. No I/O; persisting it is the caller's job.
pub fn build_session(user_id: Uuid, metadata: &RequestMetadata) -> Session {
    let now = Utc::now();
    Session {
        id: Uuid::new_v4(),
        user_id,
        token: SessionToken::generate().into_string(),
        created_at: now,
        expires_at: now + Duration::seconds(SESSION_TTL_SECS as i64),
        user_agent: metadata.user_agent.clone(),
        ip_address: metadata.ip_address.clone(),
        is_active: true,
    }
}

// ── CurrentSession ───────────────────────────────────────────────────────────

pub struct CurrentSessionUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> CurrentSessionUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    /// Resolve a cookie token to its user and session.
    ///
    /// `Ok(None)` for a missing cookie, an unknown/expired/revoked token, or
    /// a soft-deleted user. None of these are errors; handlers decide what an
    /// anonymous caller gets.
    pub async fn execute(
        &self,
        token: Option<&str>,
    ) -> Result<Option<(User, Session)>, AuthError> {
        let Some(token) = token else {
            return Ok(None);
        };
        let Some(session) = self.sessions.find_valid(token).await? else {
            return Ok(None);
        };
        let Some(user) = self.users.find_by_id(session.user_id).await? else {
            return Ok(None);
        };
        Ok(Some((user, session)))
    }
}

// ── DestroySession ───────────────────────────────────────────────────────────

pub struct DestroySessionUseCase<S>
where
    S: SessionStore,
{
    pub sessions: S,
}

impl<S> DestroySessionUseCase<S>
where
    S: SessionStore,
{
    /// Logout. Idempotent: absent cookies and unknown or already-revoked
    /// tokens succeed the same way.
    pub async fn execute(&self, token: Option<&str>) -> Result<(), AuthError> {
        if let Some(token) = token {
            self.sessions.deactivate(token).await?;
        }
        Ok(())
    }
}
