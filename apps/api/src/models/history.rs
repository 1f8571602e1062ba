use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Outcome a user recorded for a generated email.
/// Stored as a smallint; serialized as the variant name on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum WorkedStatus {
    #[default]
    Unknown = 0,
    Worked = 1,
    DidntWork = 2,
}

/// One generated email, kept for follow-up tracking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailHistoryRow {
    pub id: i64,
    pub user_id: i64,
    pub recipient_profile_text: String,
    pub email_body: String,
    pub worked_status: WorkedStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
