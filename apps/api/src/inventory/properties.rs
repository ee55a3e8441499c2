//! Axum route handlers for property listings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::listing::{PropertyRow, PropertyStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub square_feet: f64,
    pub property_type: String,
    pub status: PropertyStatus,
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub year_built: Option<i32>,
    pub lot_size: Option<f64>,
    pub mls_number: Option<String>,
}

/// Partial update: provided fields overwrite, omitted fields are untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<f64>,
    pub property_type: Option<String>,
    pub status: Option<PropertyStatus>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
    pub year_built: Option<i32>,
    pub lot_size: Option<f64>,
    pub mls_number: Option<String>,
}

/// GET /api/v1/properties
pub async fn handle_list(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<PropertyRow>>, AppError> {
    let listings = if identity.is_admin() {
        sqlx::query_as::<_, PropertyRow>("SELECT * FROM properties ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    } else {
        sqlx::query_as::<_, PropertyRow>(
            "SELECT * FROM properties WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(identity.account_id()?)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(listings))
}

/// GET /api/v1/properties/:id
pub async fn handle_get(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyRow>, AppError> {
    let listing = sqlx::query_as::<_, PropertyRow>(
        "SELECT * FROM properties WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(identity.account_id()?)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Property {id} not found")))?;

    Ok(Json(listing))
}

/// POST /api/v1/properties
pub async fn handle_create(
    identity: Identity,
    State(state): State<AppState>,
    Json(request): Json<CreatePropertyRequest>,
) -> Result<Json<PropertyRow>, AppError> {
    let listing = sqlx::query_as::<_, PropertyRow>(
        r#"
        INSERT INTO properties
            (user_id, address, city, state, zip_code, price, bedrooms, bathrooms,
             square_feet, property_type, status, description, features, image_urls,
             year_built, lot_size, mls_number)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING *
        "#,
    )
    .bind(identity.account_id()?)
    .bind(&request.address)
    .bind(&request.city)
    .bind(&request.state)
    .bind(&request.zip_code)
    .bind(request.price)
    .bind(request.bedrooms)
    .bind(request.bathrooms)
    .bind(request.square_feet)
    .bind(&request.property_type)
    .bind(request.status.as_str())
    .bind(&request.description)
    .bind(&request.features)
    .bind(&request.image_urls)
    .bind(request.year_built)
    .bind(request.lot_size)
    .bind(&request.mls_number)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(listing))
}

/// PATCH /api/v1/properties/:id
pub async fn handle_update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePropertyRequest>,
) -> Result<Json<PropertyRow>, AppError> {
    let listing = sqlx::query_as::<_, PropertyRow>(
        r#"
        UPDATE properties SET
            address = COALESCE($3, address),
            city = COALESCE($4, city),
            state = COALESCE($5, state),
            zip_code = COALESCE($6, zip_code),
            price = COALESCE($7, price),
            bedrooms = COALESCE($8, bedrooms),
            bathrooms = COALESCE($9, bathrooms),
            square_feet = COALESCE($10, square_feet),
            property_type = COALESCE($11, property_type),
            status = COALESCE($12, status),
            description = COALESCE($13, description),
            features = COALESCE($14, features),
            image_urls = COALESCE($15, image_urls),
            year_built = COALESCE($16, year_built),
            lot_size = COALESCE($17, lot_size),
            mls_number = COALESCE($18, mls_number),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(identity.account_id()?)
    .bind(&request.address)
    .bind(&request.city)
    .bind(&request.state)
    .bind(&request.zip_code)
    .bind(request.price)
    .bind(request.bedrooms)
    .bind(request.bathrooms)
    .bind(request.square_feet)
    .bind(&request.property_type)
    .bind(request.status.map(|s| s.as_str()))
    .bind(&request.description)
    .bind(&request.features)
    .bind(&request.image_urls)
    .bind(request.year_built)
    .bind(request.lot_size)
    .bind(&request.mls_number)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Property {id} not found")))?;

    Ok(Json(listing))
}

/// DELETE /api/v1/properties/:id
///
/// Generated content referencing this listing is left in place; its source
/// reference dangles.
pub async fn handle_delete(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM properties WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(identity.account_id()?)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Property {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
