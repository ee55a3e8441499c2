//! Axum route handlers for vehicle listings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::listing::{VehicleCondition, VehicleRow, VehicleStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub vin: Option<String>,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub mileage: f64,
    pub price: f64,
    pub condition: VehicleCondition,
    pub status: VehicleStatus,
    pub color: Option<String>,
    pub interior_color: Option<String>,
    pub transmission: Option<String>,
    pub drivetrain: Option<String>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub stock_number: Option<String>,
    pub description: Option<String>,
}

/// Partial update: provided fields overwrite, omitted fields are untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub vin: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub mileage: Option<f64>,
    pub price: Option<f64>,
    pub condition: Option<VehicleCondition>,
    pub status: Option<VehicleStatus>,
    pub color: Option<String>,
    pub interior_color: Option<String>,
    pub transmission: Option<String>,
    pub drivetrain: Option<String>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    pub features: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
    pub stock_number: Option<String>,
    pub description: Option<String>,
}

/// GET /api/v1/vehicles
pub async fn handle_list(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleRow>>, AppError> {
    let listings = if identity.is_admin() {
        sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?
    } else {
        sqlx::query_as::<_, VehicleRow>(
            "SELECT * FROM vehicles WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(identity.account_id()?)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(listings))
}

/// GET /api/v1/vehicles/:id
pub async fn handle_get(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleRow>, AppError> {
    let listing =
        sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(identity.account_id()?)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {id} not found")))?;

    Ok(Json(listing))
}

/// POST /api/v1/vehicles
pub async fn handle_create(
    identity: Identity,
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<VehicleRow>, AppError> {
    let listing = sqlx::query_as::<_, VehicleRow>(
        r#"
        INSERT INTO vehicles
            (user_id, vin, year, make, model, trim, mileage, price, condition, status,
             color, interior_color, transmission, drivetrain, engine, fuel_type,
             features, image_urls, stock_number, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        RETURNING *
        "#,
    )
    .bind(identity.account_id()?)
    .bind(&request.vin)
    .bind(request.year)
    .bind(&request.make)
    .bind(&request.model)
    .bind(&request.trim)
    .bind(request.mileage)
    .bind(request.price)
    .bind(request.condition.as_str())
    .bind(request.status.as_str())
    .bind(&request.color)
    .bind(&request.interior_color)
    .bind(&request.transmission)
    .bind(&request.drivetrain)
    .bind(&request.engine)
    .bind(&request.fuel_type)
    .bind(&request.features)
    .bind(&request.image_urls)
    .bind(&request.stock_number)
    .bind(&request.description)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(listing))
}

/// PATCH /api/v1/vehicles/:id
pub async fn handle_update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<VehicleRow>, AppError> {
    let listing = sqlx::query_as::<_, VehicleRow>(
        r#"
        UPDATE vehicles SET
            vin = COALESCE($3, vin),
            year = COALESCE($4, year),
            make = COALESCE($5, make),
            model = COALESCE($6, model),
            trim = COALESCE($7, trim),
            mileage = COALESCE($8, mileage),
            price = COALESCE($9, price),
            condition = COALESCE($10, condition),
            status = COALESCE($11, status),
            color = COALESCE($12, color),
            interior_color = COALESCE($13, interior_color),
            transmission = COALESCE($14, transmission),
            drivetrain = COALESCE($15, drivetrain),
            engine = COALESCE($16, engine),
            fuel_type = COALESCE($17, fuel_type),
            features = COALESCE($18, features),
            image_urls = COALESCE($19, image_urls),
            stock_number = COALESCE($20, stock_number),
            description = COALESCE($21, description),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(identity.account_id()?)
    .bind(&request.vin)
    .bind(request.year)
    .bind(&request.make)
    .bind(&request.model)
    .bind(&request.trim)
    .bind(request.mileage)
    .bind(request.price)
    .bind(request.condition.map(|c| c.as_str()))
    .bind(request.status.map(|s| s.as_str()))
    .bind(&request.color)
    .bind(&request.interior_color)
    .bind(&request.transmission)
    .bind(&request.drivetrain)
    .bind(&request.engine)
    .bind(&request.fuel_type)
    .bind(&request.features)
    .bind(&request.image_urls)
    .bind(&request.stock_number)
    .bind(&request.description)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Vehicle {id} not found")))?;

    Ok(Json(listing))
}

/// DELETE /api/v1/vehicles/:id
pub async fn handle_delete(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(identity.account_id()?)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Vehicle {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
