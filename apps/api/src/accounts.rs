//! Account workspace operations: upsert-on-sign-in, onboarding, the synthetic
//! admin account, and the generation usage meter.

use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::account::{AccountRow, Industry};
use crate::state::AppState;

/// Generations included with the free plan.
const FREE_PLAN_GENERATION_LIMIT: i64 = 10;
/// Effectively unmetered limit seeded onto the admin account.
const ADMIN_GENERATION_LIMIT: i64 = 100_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAccountRequest {
    pub email: String,
    pub name: String,
}

/// POST /api/v1/accounts
///
/// Upsert by external id: first sign-in creates the workspace on the free
/// plan, later calls return the existing row untouched.
pub async fn handle_upsert_account(
    identity: Identity,
    State(state): State<AppState>,
    Json(request): Json<UpsertAccountRequest>,
) -> Result<Json<AccountRow>, AppError> {
    let external_id = identity.account_id()?;

    sqlx::query(
        r#"
        INSERT INTO accounts (external_id, email, name, generations_limit)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (external_id) DO NOTHING
        "#,
    )
    .bind(external_id)
    .bind(&request.email)
    .bind(&request.name)
    .bind(FREE_PLAN_GENERATION_LIMIT)
    .execute(&state.db)
    .await?;

    let account =
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE external_id = $1")
            .bind(external_id)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(account))
}

/// GET /api/v1/accounts/me
pub async fn handle_get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<AccountRow>, AppError> {
    let external_id = identity.account_id()?;

    let account =
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE external_id = $1")
            .bind(external_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {external_id} not found")))?;

    Ok(Json(account))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub industry: Industry,
    pub company_name: String,
}

/// POST /api/v1/accounts/onboarding
pub async fn handle_complete_onboarding(
    identity: Identity,
    State(state): State<AppState>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<AccountRow>, AppError> {
    let external_id = identity.account_id()?;

    let account = sqlx::query_as::<_, AccountRow>(
        r#"
        UPDATE accounts
        SET industry = $2, company_name = $3, onboarding_complete = TRUE, updated_at = now()
        WHERE external_id = $1
        RETURNING *
        "#,
    )
    .bind(external_id)
    .bind(request.industry.as_str())
    .bind(&request.company_name)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Account {external_id} not found")))?;

    info!("Onboarding completed for account {external_id}");

    Ok(Json(account))
}

/// Ensures the synthetic admin account exists. Called on admin login;
/// records the admin creates while browsing are owned by this account.
pub async fn seed_admin_account(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO accounts
            (external_id, email, name, plan, generations_limit, onboarding_complete)
        VALUES ($1, 'admin@autocontent.local', 'Platform Admin', 'agency', $2, TRUE)
        ON CONFLICT (external_id) DO NOTHING
        "#,
    )
    .bind(Identity::ADMIN_ACCOUNT_ID)
    .bind(ADMIN_GENERATION_LIMIT)
    .execute(pool)
    .await?;

    Ok(())
}

/// Burns one generation credit for the account. The limit check and the
/// increment happen in the same guarded UPDATE; two concurrent requests
/// cannot both consume the last credit.
pub async fn consume_generation_credit(
    pool: &PgPool,
    external_id: &str,
) -> Result<(), AppError> {
    let updated = sqlx::query(
        r#"
        UPDATE accounts
        SET generations_used = generations_used + 1, updated_at = now()
        WHERE external_id = $1 AND generations_used < generations_limit
        "#,
    )
    .bind(external_id)
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE external_id = $1)")
                .bind(external_id)
                .fetch_one(pool)
                .await?;

        return if exists {
            Err(AppError::LimitExceeded)
        } else {
            Err(AppError::NotFound(format!("Account {external_id} not found")))
        };
    }

    Ok(())
}
