use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Utc};
use uuid::Uuid;

use talentgate_auth::domain::repository::{OtpStore, SessionStore, UserStore};
use talentgate_auth::domain::types::{OTP_TTL_SECS, OtpRecord, OutboxEvent, Session, User};
use talentgate_auth::error::AuthError;
use talentgate_auth::usecase::totp::AdminTotp;
use talentgate_auth_types::token::SessionToken;
use talentgate_domain::user::UserRole;

// ── MockUserStore ────────────────────────────────────────────────────────────

pub struct MockUserStore {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), AuthError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn set_email_verified(&self, id: Uuid) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.email_verified = true;
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AuthError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users
            .iter_mut()
            .find(|u| u.id == id && u.deleted_at.is_none())
        {
            u.deleted_at = Some(Utc::now());
            return Ok(true);
        }
        Ok(false)
    }
}

// ── MockOtpStore ─────────────────────────────────────────────────────────────

pub struct MockOtpStore {
    pub records: Arc<Mutex<Vec<OtpRecord>>>,
    pub events: Arc<Mutex<Vec<OutboxEvent>>>,
}

impl MockOtpStore {
    pub fn new(records: Vec<OtpRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            events: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn records_handle(&self) -> Arc<Mutex<Vec<OtpRecord>>> {
        Arc::clone(&self.records)
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<OutboxEvent>>> {
        Arc::clone(&self.events)
    }
}

impl OtpStore for MockOtpStore {
    async fn upsert(&self, record: &OtpRecord, event: &OutboxEvent) -> Result<(), AuthError> {
        let mut records = self.records.lock().unwrap();
        records.retain(|r| r.email != record.email);
        records.push(record.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn consume_valid(&self, email: &str, code: &str) -> Result<bool, AuthError> {
        let mut records = self.records.lock().unwrap();
        if let Some(idx) = records
            .iter()
            .position(|r| r.email == email && r.code == code && r.is_valid())
        {
            records.remove(idx);
            return Ok(true);
        }
        Ok(false)
    }

    async fn purge_expired(&self) -> Result<u64, AuthError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.is_valid());
        Ok((before - records.len()) as u64)
    }
}

// ── MockSessionStore ─────────────────────────────────────────────────────────

pub struct MockSessionStore {
    pub sessions: Arc<Mutex<Vec<Session>>>,
}

impl MockSessionStore {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn sessions_handle(&self) -> Arc<Mutex<Vec<Session>>> {
        Arc::clone(&self.sessions)
    }
}

impl SessionStore for MockSessionStore {
    async fn create(&self, session: &Session) -> Result<(), AuthError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_valid(&self, token: &str) -> Result<Option<Session>, AuthError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.token == token && s.is_valid())
            .cloned())
    }

    async fn deactivate(&self, token: &str) -> Result<(), AuthError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(s) = sessions.iter_mut().find(|s| s.token == token) {
            s.is_active = false;
        }
        Ok(())
    }

    async fn deactivate_for_user(&self, user_id: Uuid) -> Result<u64, AuthError> {
        let mut sessions = self.sessions.lock().unwrap();
        let mut revoked = 0;
        for s in sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.is_active)
        {
            s.is_active = false;
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn purge(&self) -> Result<u64, AuthError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|s| s.is_active && s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        email: "user@example.com".to_owned(),
        name: "Jordan Reyes".to_owned(),
        role: UserRole::Candidate,
        email_verified: true,
        deleted_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_admin() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap(),
        email: "admin@example.com".to_owned(),
        name: "Avery Chen".to_owned(),
        role: UserRole::Admin,
        email_verified: true,
        deleted_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_otp(email: &str) -> OtpRecord {
    OtpRecord {
        email: email.to_owned(),
        code: "123456".to_owned(),
        issued_at: Utc::now(),
        expires_at: Utc::now() + Duration::seconds(OTP_TTL_SECS),
    }
}

pub fn test_session(user_id: Uuid) -> Session {
    Session {
        id: Uuid::new_v4(),
        user_id,
        token: SessionToken::generate().into_string(),
        created_at: Utc::now(),
        expires_at: Utc::now() + Duration::days(7),
        user_agent: None,
        ip_address: None,
        is_active: true,
    }
}

/// RFC 6238 reference secret ("12345678901234567890") in base32.
pub const TEST_TOTP_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

pub fn test_totp() -> AdminTotp {
    AdminTotp::new(TEST_TOTP_SECRET, 6, 30, "Talentgate", "admin@example.com").unwrap()
}

/// A six-digit code that is guaranteed not to verify right now: every code
/// the skew window could accept is excluded by construction.
pub fn code_outside_current_window(totp: &AdminTotp) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let window: Vec<String> = [now - 30, now, now + 30, now + 60]
        .iter()
        .map(|&ts| totp.generate_at(ts))
        .collect();
    (0..1_000_000)
        .map(|n| format!("{n:06}"))
        .find(|c| !window.contains(c))
        .unwrap()
}
