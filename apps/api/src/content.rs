//! Generated-content lifecycle: save, review, publish, delete.
//!
//! Statuses are deliberately permissive: any of draft/approved/published may
//! be set at any time, including reverting. `source_id` is an opaque string;
//! content outlives the listing it was generated from.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::content::{ContentRow, ContentStatus, ContentType, SourceType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentListQuery {
    /// When present, filters to pieces generated from this source record.
    pub source_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentRequest {
    pub source_type: SourceType,
    pub source_id: String,
    pub content_type: ContentType,
    pub tone: Option<String>,
    pub body: String,
    #[serde(default)]
    pub status: ContentStatus,
    pub metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ContentStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBodyRequest {
    pub body: String,
}

/// GET /api/v1/content
pub async fn handle_list(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> Result<Json<Vec<ContentRow>>, AppError> {
    let rows = match (&query.source_id, identity.is_admin()) {
        (Some(source_id), true) => {
            sqlx::query_as::<_, ContentRow>(
                "SELECT * FROM content WHERE source_id = $1 ORDER BY created_at DESC",
            )
            .bind(source_id)
            .fetch_all(&state.db)
            .await?
        }
        (Some(source_id), false) => {
            sqlx::query_as::<_, ContentRow>(
                "SELECT * FROM content WHERE source_id = $1 AND user_id = $2 ORDER BY created_at DESC",
            )
            .bind(source_id)
            .bind(identity.account_id()?)
            .fetch_all(&state.db)
            .await?
        }
        (None, true) => {
            sqlx::query_as::<_, ContentRow>("SELECT * FROM content ORDER BY created_at DESC")
                .fetch_all(&state.db)
                .await?
        }
        (None, false) => {
            sqlx::query_as::<_, ContentRow>(
                "SELECT * FROM content WHERE user_id = $1 ORDER BY created_at DESC",
            )
            .bind(identity.account_id()?)
            .fetch_all(&state.db)
            .await?
        }
    };

    Ok(Json(rows))
}

/// GET /api/v1/content/:id
pub async fn handle_get(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentRow>, AppError> {
    let row =
        sqlx::query_as::<_, ContentRow>("SELECT * FROM content WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(identity.account_id()?)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content {id} not found")))?;

    Ok(Json(row))
}

/// POST /api/v1/content
///
/// Persisting is an explicit caller action after a generation call succeeds;
/// the generation endpoint itself never writes here.
pub async fn handle_create(
    identity: Identity,
    State(state): State<AppState>,
    Json(request): Json<CreateContentRequest>,
) -> Result<Json<ContentRow>, AppError> {
    let row = sqlx::query_as::<_, ContentRow>(
        r#"
        INSERT INTO content
            (user_id, source_type, source_id, content_type, tone, body, status, metadata)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(identity.account_id()?)
    .bind(request.source_type.as_str())
    .bind(&request.source_id)
    .bind(request.content_type.as_str())
    .bind(&request.tone)
    .bind(&request.body)
    .bind(request.status.as_str())
    .bind(&request.metadata)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// PATCH /api/v1/content/:id/status
pub async fn handle_update_status(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ContentRow>, AppError> {
    let row = sqlx::query_as::<_, ContentRow>(
        r#"
        UPDATE content SET status = $3, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(identity.account_id()?)
    .bind(request.status.as_str())
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Content {id} not found")))?;

    Ok(Json(row))
}

/// PATCH /api/v1/content/:id/body
pub async fn handle_update_body(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBodyRequest>,
) -> Result<Json<ContentRow>, AppError> {
    let row = sqlx::query_as::<_, ContentRow>(
        r#"
        UPDATE content SET body = $3, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(identity.account_id()?)
    .bind(&request.body)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Content {id} not found")))?;

    Ok(Json(row))
}

/// DELETE /api/v1/content/:id
pub async fn handle_delete(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM content WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(identity.account_id()?)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Content {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
