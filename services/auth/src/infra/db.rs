use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use talentgate_auth_schema::{otp_codes, outbox_events, sessions, users};
use talentgate_domain::user::UserRole;

use crate::domain::repository::{OtpStore, SessionStore, UserStore};
use crate::domain::types::{OtpRecord, OutboxEvent, Session, User};
use crate::error::AuthError;

// ── User store ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserStore {
    pub db: DatabaseConnection,
}

impl UserStore for DbUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        let model = users::Entity::find_by_id(id)
            .filter(users::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), AuthError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            role: Set(user.role.as_i16()),
            email_verified: Set(user.email_verified),
            deleted_at: Set(None),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn set_email_verified(&self, id: Uuid) -> Result<(), AuthError> {
        users::ActiveModel {
            id: Set(id),
            email_verified: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set email verified")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AuthError> {
        let now = Utc::now();
        let result = users::Entity::update_many()
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::DeletedAt.is_null())
            .col_expr(users::Column::DeletedAt, Expr::value(now))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .exec(&self.db)
            .await
            .context("soft delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, AuthError> {
    let role = UserRole::from_i16(model.role).ok_or_else(|| {
        AuthError::Persistence(anyhow::anyhow!("unknown role value {}", model.role))
    })?;
    Ok(User {
        id: model.id,
        email: model.email,
        name: model.name,
        role,
        email_verified: model.email_verified,
        deleted_at: model.deleted_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── OTP store ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpStore {
    pub db: DatabaseConnection,
}

impl OtpStore for DbOtpStore {
    async fn upsert(&self, record: &OtpRecord, event: &OutboxEvent) -> Result<(), AuthError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let record = record.clone();
                let event = event.clone();
                Box::pin(async move {
                    upsert_otp_code(txn, &record).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("upsert otp with outbox")?;
        Ok(())
    }

    async fn consume_valid(&self, email: &str, code: &str) -> Result<bool, AuthError> {
        // Single conditional DELETE: matching and consuming are one step, so
        // two concurrent verifications cannot both succeed.
        let now = Utc::now();
        let result = otp_codes::Entity::delete_many()
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::Code.eq(code))
            .filter(otp_codes::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("consume otp")?;
        Ok(result.rows_affected > 0)
    }

    async fn purge_expired(&self) -> Result<u64, AuthError> {
        let now = Utc::now();
        let result = otp_codes::Entity::delete_many()
            .filter(otp_codes::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("purge expired otps")?;
        Ok(result.rows_affected)
    }
}

/// Insert-or-replace on the email primary key. The previous code for that
/// address stops validating the instant this commits.
async fn upsert_otp_code(
    txn: &DatabaseTransaction,
    record: &OtpRecord,
) -> Result<(), sea_orm::DbErr> {
    let model = otp_codes::ActiveModel {
        email: Set(record.email.clone()),
        code: Set(record.code.clone()),
        issued_at: Set(record.issued_at),
        expires_at: Set(record.expires_at),
    };
    otp_codes::Entity::insert(model)
        .on_conflict(
            OnConflict::column(otp_codes::Column::Email)
                .update_columns([
                    otp_codes::Column::Code,
                    otp_codes::Column::IssuedAt,
                    otp_codes::Column::ExpiresAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        created_at: Set(Utc::now()),
        processed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

// ── Session store ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionStore {
    pub db: DatabaseConnection,
}

impl SessionStore for DbSessionStore {
    async fn create(&self, session: &Session) -> Result<(), AuthError> {
        sessions::ActiveModel {
            id: Set(session.id),
            user_id: Set(session.user_id),
            token: Set(session.token.clone()),
            created_at: Set(session.created_at),
            expires_at: Set(session.expires_at),
            user_agent: Set(session.user_agent.clone()),
            ip_address: Set(session.ip_address.clone()),
            is_active: Set(session.is_active),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_valid(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let now = Utc::now();
        let model = sessions::Entity::find()
            .filter(sessions::Column::Token.eq(token))
            .filter(sessions::Column::IsActive.eq(true))
            .filter(sessions::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find valid session")?;
        Ok(model.map(session_from_model))
    }

    async fn deactivate(&self, token: &str) -> Result<(), AuthError> {
        sessions::Entity::update_many()
            .filter(sessions::Column::Token.eq(token))
            .col_expr(sessions::Column::IsActive, Expr::value(false))
            .exec(&self.db)
            .await
            .context("deactivate session")?;
        Ok(())
    }

    async fn deactivate_for_user(&self, user_id: Uuid) -> Result<u64, AuthError> {
        let result = sessions::Entity::update_many()
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::IsActive.eq(true))
            .col_expr(sessions::Column::IsActive, Expr::value(false))
            .exec(&self.db)
            .await
            .context("deactivate user sessions")?;
        Ok(result.rows_affected)
    }

    async fn purge(&self) -> Result<u64, AuthError> {
        let now = Utc::now();
        let result = sessions::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(sessions::Column::ExpiresAt.lte(now))
                    .add(sessions::Column::IsActive.eq(false)),
            )
            .exec(&self.db)
            .await
            .context("purge sessions")?;
        Ok(result.rows_affected)
    }
}

fn session_from_model(model: sessions::Model) -> Session {
    Session {
        id: model.id,
        user_id: model.user_id,
        token: model.token,
        created_at: model.created_at,
        expires_at: model.expires_at,
        user_agent: model.user_agent,
        ip_address: model.ip_address,
        is_active: model.is_active,
    }
}
