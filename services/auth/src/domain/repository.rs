#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{OtpRecord, OutboxEvent, Session, User};
use crate::error::AuthError;

/// Store for user accounts. Soft-deleted rows are invisible to every lookup.
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

    async fn create(&self, user: &User) -> Result<(), AuthError>;

    /// Mark the user's email as verified. The only profile update the auth
    /// flows perform.
    async fn set_email_verified(&self, id: Uuid) -> Result<(), AuthError>;

    /// Soft-delete: sets deleted_at. Returns `false` when the user does not
    /// exist or is already deleted.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, AuthError>;
}

/// Store for one-time passwords, one row per email.
pub trait OtpStore: Send + Sync {
    /// Insert or replace the row for `record.email` and write the outbox
    /// event, all in one transaction. After this returns, only the new code
    /// can verify for that email.
    async fn upsert(&self, record: &OtpRecord, event: &OutboxEvent) -> Result<(), AuthError>;

    /// Atomically delete the row iff email + code match and the code is
    /// unexpired. Returns `true` when a row was consumed. Expired and
    /// never-issued codes both come back `false`.
    async fn consume_valid(&self, email: &str, code: &str) -> Result<bool, AuthError>;

    /// Bulk-remove expired rows. Returns the number removed.
    async fn purge_expired(&self) -> Result<u64, AuthError>;
}

/// Store for server-side sessions.
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), AuthError>;

    /// Find by token, constrained to active and unexpired sessions.
    /// Unknown, expired and revoked tokens are indistinguishable: all None.
    async fn find_valid(&self, token: &str) -> Result<Option<Session>, AuthError>;

    /// Set is_active = false. No-op success on unknown or already-inactive
    /// tokens.
    async fn deactivate(&self, token: &str) -> Result<(), AuthError>;

    /// Revoke every session belonging to one user. Returns the number of
    /// sessions that were still active.
    async fn deactivate_for_user(&self, user_id: Uuid) -> Result<u64, AuthError>;

    /// Bulk-delete expired or revoked sessions. Returns the number removed.
    async fn purge(&self) -> Result<u64, AuthError>;
}
