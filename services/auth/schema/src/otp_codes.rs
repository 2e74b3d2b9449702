use sea_orm::entity::prelude::*;

/// One-time login code emailed to a user. Keyed by email: reissuing for the
/// same address upserts this row, so at most one code per email can ever be
/// valid. Expires 10 minutes after issue; consumed (deleted) on successful
/// verification.
///
/// No foreign key to `users` — the record is bound to the address string
/// only, and signup issues codes before the email is proven to exist.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otp_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub code: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
