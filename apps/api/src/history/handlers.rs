use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::AuthUser;
use crate::errors::AppError;
use crate::models::history::{EmailHistoryRow, WorkedStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub status: Option<WorkedStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailHistoryResponse {
    pub id: i64,
    pub recipient_profile_text: String,
    pub email_body: String,
    pub worked_status: WorkedStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmailHistoryRow> for EmailHistoryResponse {
    fn from(row: EmailHistoryRow) -> Self {
        EmailHistoryResponse {
            id: row.id,
            recipient_profile_text: row.recipient_profile_text,
            email_body: row.email_body,
            worked_status: row.worked_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub worked_status: WorkedStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    pub email_body: String,
}

/// GET /api/history
pub async fn handle_list_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<EmailHistoryResponse>>, AppError> {
    let rows: Vec<EmailHistoryRow> = match query.status {
        Some(status) => {
            sqlx::query_as(
                "SELECT * FROM email_histories WHERE user_id = $1 AND worked_status = $2 \
                 ORDER BY created_at DESC",
            )
            .bind(user.user_id)
            .bind(status)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM email_histories WHERE user_id = $1 ORDER BY created_at DESC",
            )
            .bind(user.user_id)
            .fetch_all(&state.db)
            .await?
        }
    };

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/history/:id
pub async fn handle_get_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<EmailHistoryResponse>, AppError> {
    let row = fetch_owned(&state, user.user_id, id).await?;
    Ok(Json(row.into()))
}

/// PATCH /api/history/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<EmailHistoryResponse>, AppError> {
    let row: Option<EmailHistoryRow> = sqlx::query_as(
        "UPDATE email_histories SET worked_status = $1, updated_at = now() \
         WHERE id = $2 AND user_id = $3 RETURNING *",
    )
    .bind(request.worked_status)
    .bind(id)
    .bind(user.user_id)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| AppError::NotFound("Email history not found".to_string()))?;

    info!(
        "Updated worked status for history entry {} (user {})",
        id, user.user_id
    );

    Ok(Json(row.into()))
}

/// PUT /api/history/:id
/// A blank body only bumps updated_at; the stored draft is left alone.
pub async fn handle_update_email(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEmailRequest>,
) -> Result<Json<EmailHistoryResponse>, AppError> {
    let row: Option<EmailHistoryRow> = if request.email_body.trim().is_empty() {
        sqlx::query_as(
            "UPDATE email_histories SET updated_at = now() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user.user_id)
        .fetch_optional(&state.db)
        .await?
    } else {
        sqlx::query_as(
            "UPDATE email_histories SET email_body = $1, updated_at = now() \
             WHERE id = $2 AND user_id = $3 RETURNING *",
        )
        .bind(&request.email_body)
        .bind(id)
        .bind(user.user_id)
        .fetch_optional(&state.db)
        .await?
    };

    let row = row.ok_or_else(|| AppError::NotFound("Email history not found".to_string()))?;

    Ok(Json(row.into()))
}

/// DELETE /api/history/:id
pub async fn handle_delete_history(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM email_histories WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Email history not found".to_string()));
    }

    info!("Deleted history entry {} (user {})", id, user.user_id);

    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_owned(state: &AppState, user_id: i64, id: i64) -> Result<EmailHistoryRow, AppError> {
    let row: Option<EmailHistoryRow> =
        sqlx::query_as("SELECT * FROM email_histories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

    row.ok_or_else(|| AppError::NotFound("Email history not found".to_string()))
}
