//! Profile endpoints: fetch and create-or-update the caller's sender profile.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::AuthUser;
use crate::errors::AppError;
use crate::models::profile::UserProfileRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub full_name: String,
    pub current_role: Option<String>,
    pub target_roles: String,
    pub about_me: String,
    pub linked_in_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub full_name: String,
    pub current_role: Option<String>,
    pub target_roles: String,
    pub about_me: String,
    pub linked_in_url: Option<String>,
    pub is_complete: bool,
}

impl From<UserProfileRow> for ProfileResponse {
    fn from(row: UserProfileRow) -> Self {
        let is_complete = is_profile_complete(&row);
        ProfileResponse {
            id: row.id,
            full_name: row.full_name,
            current_role: row.current_role,
            target_roles: row.target_roles,
            about_me: row.about_me,
            linked_in_url: row.linked_in_url,
            is_complete,
        }
    }
}

/// GET /api/profile
/// A user without a saved profile gets an empty one, id 0, not a 404.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile: Option<UserProfileRow> =
        sqlx::query_as("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user.user_id)
            .fetch_optional(&state.db)
            .await?;

    let response = match profile {
        Some(row) => row.into(),
        None => ProfileResponse {
            id: 0,
            full_name: String::new(),
            current_role: None,
            target_roles: String::new(),
            about_me: String::new(),
            linked_in_url: None,
            is_complete: false,
        },
    };

    Ok(Json(response))
}

/// POST /api/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_profile(&request)?;

    // current_role is a reserved word in Postgres, hence the quoting.
    let row: UserProfileRow = sqlx::query_as(
        r#"
        INSERT INTO user_profiles (user_id, full_name, "current_role", target_roles, about_me, linked_in_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE SET
            full_name = EXCLUDED.full_name,
            "current_role" = EXCLUDED."current_role",
            target_roles = EXCLUDED.target_roles,
            about_me = EXCLUDED.about_me,
            linked_in_url = EXCLUDED.linked_in_url
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(request.full_name.trim())
    .bind(request.current_role.as_deref().map(str::trim))
    .bind(request.target_roles.trim())
    .bind(request.about_me.trim())
    .bind(request.linked_in_url.as_deref().map(str::trim))
    .fetch_one(&state.db)
    .await?;

    info!("Saved profile for user {}", user.user_id);

    Ok(Json(row.into()))
}

fn validate_profile(request: &ProfileRequest) -> Result<(), AppError> {
    if request.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    if request.target_roles.trim().is_empty() {
        return Err(AppError::Validation("Target roles is required".to_string()));
    }
    if request.about_me.trim().is_empty() {
        return Err(AppError::Validation("About me is required".to_string()));
    }

    check_length("Full name", &request.full_name, 100)?;
    check_length("Target roles", &request.target_roles, 500)?;
    check_length("About me", &request.about_me, 2000)?;
    if let Some(role) = &request.current_role {
        check_length("Current role", role, 100)?;
    }
    if let Some(url) = &request.linked_in_url {
        check_length("LinkedIn URL", url, 200)?;
    }

    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn is_profile_complete(row: &UserProfileRow) -> bool {
    !row.full_name.trim().is_empty()
        && !row.target_roles.trim().is_empty()
        && !row.about_me.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProfileRequest {
        ProfileRequest {
            full_name: "Jane Q. Doe".to_string(),
            current_role: Some("Staff Engineer".to_string()),
            target_roles: "Platform engineering roles".to_string(),
            about_me: "Ten years of distributed systems work".to_string(),
            linked_in_url: None,
        }
    }

    #[test]
    fn test_validate_accepts_complete_profile() {
        assert!(validate_profile(&request()).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        for blank in ["", "   ", "\n\t"] {
            let mut req = request();
            req.full_name = blank.to_string();
            assert!(validate_profile(&req).is_err(), "blank full name must fail");

            let mut req = request();
            req.target_roles = blank.to_string();
            assert!(validate_profile(&req).is_err(), "blank target roles must fail");

            let mut req = request();
            req.about_me = blank.to_string();
            assert!(validate_profile(&req).is_err(), "blank about me must fail");
        }
    }

    #[test]
    fn test_validate_enforces_length_caps() {
        let mut req = request();
        req.full_name = "x".repeat(101);
        assert!(validate_profile(&req).is_err());

        let mut req = request();
        req.about_me = "x".repeat(2001);
        assert!(validate_profile(&req).is_err());
    }

    #[test]
    fn test_profile_request_parses_camel_case() {
        let json = r#"{
            "fullName": "Jane Q. Doe",
            "currentRole": "Staff Engineer",
            "targetRoles": "Platform",
            "aboutMe": "Infra work",
            "linkedInUrl": "https://linkedin.com/in/janeqdoe"
        }"#;

        let parsed: ProfileRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.full_name, "Jane Q. Doe");
        assert_eq!(parsed.linked_in_url.as_deref(), Some("https://linkedin.com/in/janeqdoe"));
    }

    #[test]
    fn test_incomplete_row_reports_is_complete_false() {
        let row = UserProfileRow {
            id: 1,
            user_id: 1,
            full_name: "Jane".to_string(),
            current_role: None,
            target_roles: "  ".to_string(),
            about_me: "something".to_string(),
            linked_in_url: None,
        };

        let response = ProfileResponse::from(row);
        assert!(!response.is_complete);
    }
}
