//! Axum route handlers for the admin session endpoints.

use axum::{extract::State, http::header, response::AppendHeaders, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::accounts::seed_admin_account;
use crate::auth::admin::{
    build_admin_cookie, build_clear_cookie, constant_time_eq, derive_admin_token,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// POST /api/admin/login
///
/// Exact password match sets the derived-token cookie and seeds the synthetic
/// admin account so cross-account browsing has an owner record to attach to.
pub async fn handle_admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<(AppendHeaders<[(header::HeaderName, String); 1]>, Json<Value>), AppError> {
    if request.password.is_empty()
        || !constant_time_eq(&request.password, &state.config.admin_password)
    {
        return Err(AppError::Unauthorized);
    }

    seed_admin_account(&state.db).await?;

    let token = derive_admin_token(&state.config.admin_password);
    info!("Admin session opened");

    Ok((
        AppendHeaders([(header::SET_COOKIE, build_admin_cookie(&token))]),
        Json(json!({ "ok": true })),
    ))
}

/// DELETE /api/admin/login
///
/// Clears the cookie unconditionally; the token itself stays valid until the
/// secret rotates.
pub async fn handle_admin_logout(
) -> (AppendHeaders<[(header::HeaderName, String); 1]>, Json<Value>) {
    (
        AppendHeaders([(header::SET_COOKIE, build_clear_cookie())]),
        Json(json!({ "ok": true })),
    )
}
