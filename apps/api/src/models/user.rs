#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Account row. Deliberately not serializable — the password hash stays
/// server-side.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
