use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOtpStore, DbSessionStore, DbUserStore};
use crate::usecase::totp::AdminTotp;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub admin_totp: Arc<AdminTotp>,
    pub cookie_domain: String,
}

impl AppState {
    pub fn user_store(&self) -> DbUserStore {
        DbUserStore {
            db: self.db.clone(),
        }
    }

    pub fn otp_store(&self) -> DbOtpStore {
        DbOtpStore {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> DbSessionStore {
        DbSessionStore {
            db: self.db.clone(),
        }
    }
}
