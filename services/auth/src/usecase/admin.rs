use uuid::Uuid;

use crate::domain::repository::{OtpStore, SessionStore, UserStore};
use crate::error::AuthError;

// ── RevokeUserSessions ───────────────────────────────────────────────────────

pub struct RevokeUserSessionsUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> RevokeUserSessionsUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    /// Revoke every session of one user. Returns how many were still active.
    pub async fn execute(&self, user_id: Uuid) -> Result<u64, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;
        self.sessions.deactivate_for_user(user_id).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> DeleteUserUseCase<U, S>
where
    U: UserStore,
    S: SessionStore,
{
    /// Soft-delete the account, then revoke its sessions. A crash between
    /// the two writes leaves sessions that no longer resolve to a user, so
    /// the order is fail-safe.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), AuthError> {
        if !self.users.soft_delete(user_id).await? {
            return Err(AuthError::NotFound);
        }
        self.sessions.deactivate_for_user(user_id).await?;
        Ok(())
    }
}

// ── Cleanup ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CleanupOutput {
    pub purged_sessions: u64,
    pub purged_otps: u64,
}

pub struct CleanupUseCase<O, S>
where
    O: OtpStore,
    S: SessionStore,
{
    pub otps: O,
    pub sessions: S,
}

impl<O, S> CleanupUseCase<O, S>
where
    O: OtpStore,
    S: SessionStore,
{
    /// Reclaim storage for expired or revoked sessions and expired OTP rows.
    /// Idempotent; safe to run concurrently. Invoked by an external
    /// scheduler through the admin endpoint.
    pub async fn execute(&self) -> Result<CleanupOutput, AuthError> {
        let purged_sessions = self.sessions.purge().await?;
        let purged_otps = self.otps.purge_expired().await?;
        Ok(CleanupOutput {
            purged_sessions,
            purged_otps,
        })
    }
}
