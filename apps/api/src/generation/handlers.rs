//! Axum route handlers for the email generation API.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::AuthUser;
use crate::errors::AppError;
use crate::generation::engine::generate_email;
use crate::generation::{EmailStyle, GenerationRequest};
use crate::models::profile::UserProfileRow;
use crate::state::AppState;

/// Pasted profiles beyond this size are rejected before any model call.
const MAX_GUEST_PROFILE_CHARS: usize = 100_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailRequest {
    pub recipient_profile_text: String,
    #[serde(default)]
    pub style: EmailStyle,
    pub custom_instructions: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailResponse {
    pub id: i64,
    pub email_body: String,
    pub created_at: DateTime<Utc>,
}

/// POST /api/email/generate
///
/// Full pipeline for signed-in users: load the sender profile, build the
/// prompt, call the model, persist the draft to history.
pub async fn handle_generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<GenerateEmailRequest>,
) -> Result<Json<GenerateEmailResponse>, AppError> {
    validate_request(&request)?;

    let profile: Option<UserProfileRow> =
        sqlx::query_as("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user.user_id)
            .fetch_optional(&state.db)
            .await?;

    let generation = GenerationRequest {
        recipient_profile_text: request.recipient_profile_text.clone(),
        style: request.style,
        custom_instructions: request.custom_instructions.clone(),
        sender: profile.map(Into::into),
    };

    info!(
        "Generating {:?} style email for user {}",
        request.style, user.user_id
    );

    let email_body = generate_email(&state.llm, &state.config.gemini(), &generation).await?;

    let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
        "INSERT INTO email_histories (user_id, recipient_profile_text, email_body) \
         VALUES ($1, $2, $3) RETURNING id, created_at",
    )
    .bind(user.user_id)
    .bind(&request.recipient_profile_text)
    .bind(&email_body)
    .fetch_one(&state.db)
    .await?;

    info!("Stored generated email {} for user {}", id, user.user_id);

    Ok(Json(GenerateEmailResponse {
        id,
        email_body,
        created_at,
    }))
}

/// POST /api/email/generate/guest
///
/// Guest emails are not persisted; id 0 marks a history-less response.
pub async fn handle_generate_guest(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<GenerateEmailRequest>,
) -> Result<Json<GenerateEmailResponse>, AppError> {
    validate_request(&request)?;

    if request.recipient_profile_text.chars().count() > MAX_GUEST_PROFILE_CHARS {
        return Err(AppError::Validation(
            "Recipient profile text too large".to_string(),
        ));
    }

    let generation = GenerationRequest {
        recipient_profile_text: request.recipient_profile_text,
        style: request.style,
        custom_instructions: request.custom_instructions,
        sender: None,
    };

    info!(
        "Generating {:?} style guest email for {}",
        generation.style,
        addr.ip()
    );

    let email_body = generate_email(&state.llm, &state.config.gemini(), &generation).await?;

    Ok(Json(GenerateEmailResponse {
        id: 0,
        email_body,
        created_at: Utc::now(),
    }))
}

fn validate_request(request: &GenerateEmailRequest) -> Result<(), AppError> {
    if request.recipient_profile_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Recipient profile text is required".to_string(),
        ));
    }

    if request.style == EmailStyle::Custom {
        let has_instructions = request
            .custom_instructions
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        if !has_instructions {
            return Err(AppError::Validation(
                "Custom instructions are required when style is 'Custom'".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(style: EmailStyle) -> GenerateEmailRequest {
        GenerateEmailRequest {
            recipient_profile_text: "Alex Rivera, CTO at Acme Robotics".to_string(),
            style,
            custom_instructions: None,
        }
    }

    #[test]
    fn test_style_defaults_to_default_when_omitted() {
        let parsed: GenerateEmailRequest =
            serde_json::from_str(r#"{"recipientProfileText": "Alex Rivera"}"#).unwrap();
        assert_eq!(parsed.style, EmailStyle::Default);
        assert_eq!(parsed.custom_instructions, None);
    }

    #[test]
    fn test_request_parses_camel_case_fields() {
        let json = r#"{
            "recipientProfileText": "Alex Rivera, CTO",
            "style": "AboutThem",
            "customInstructions": "Mention the robotics talk"
        }"#;

        let parsed: GenerateEmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.style, EmailStyle::AboutThem);
        assert_eq!(
            parsed.custom_instructions.as_deref(),
            Some("Mention the robotics talk")
        );
    }

    #[test]
    fn test_blank_recipient_profile_is_rejected() {
        let mut req = request(EmailStyle::Default);
        req.recipient_profile_text = "   \n".to_string();
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_custom_style_requires_instructions() {
        let req = request(EmailStyle::Custom);
        assert!(
            validate_request(&req).is_err(),
            "missing instructions must fail"
        );

        let mut req = request(EmailStyle::Custom);
        req.custom_instructions = Some("  ".to_string());
        assert!(
            validate_request(&req).is_err(),
            "blank instructions must fail"
        );

        let mut req = request(EmailStyle::Custom);
        req.custom_instructions = Some("Keep it under three sentences".to_string());
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_non_custom_styles_do_not_require_instructions() {
        for style in [
            EmailStyle::Default,
            EmailStyle::Minimal,
            EmailStyle::AboutThem,
        ] {
            assert!(validate_request(&request(style)).is_ok(), "{style:?} must pass");
        }
    }
}
