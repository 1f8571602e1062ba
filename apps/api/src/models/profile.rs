use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::generation::SenderProfile;

/// Stored sender profile, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub current_role: Option<String>,
    pub target_roles: String,
    pub about_me: String,
    pub linked_in_url: Option<String>,
}

impl From<UserProfileRow> for SenderProfile {
    fn from(row: UserProfileRow) -> Self {
        SenderProfile {
            full_name: row.full_name,
            current_role: row.current_role,
            target_roles: row.target_roles,
            about_me: row.about_me,
            linked_in_url: row.linked_in_url,
        }
    }
}
