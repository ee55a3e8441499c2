pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{accounts, auth, content, generation, inventory};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/generate", post(generation::handlers::handle_generate))
        // Admin session
        .route(
            "/api/admin/login",
            post(auth::handlers::handle_admin_login).delete(auth::handlers::handle_admin_logout),
        )
        // Accounts
        .route("/api/v1/accounts", post(accounts::handle_upsert_account))
        .route("/api/v1/accounts/me", get(accounts::handle_get_me))
        .route(
            "/api/v1/accounts/onboarding",
            post(accounts::handle_complete_onboarding),
        )
        // Property listings
        .route(
            "/api/v1/properties",
            get(inventory::properties::handle_list).post(inventory::properties::handle_create),
        )
        .route(
            "/api/v1/properties/:id",
            get(inventory::properties::handle_get)
                .patch(inventory::properties::handle_update)
                .delete(inventory::properties::handle_delete),
        )
        // Vehicle listings
        .route(
            "/api/v1/vehicles",
            get(inventory::vehicles::handle_list).post(inventory::vehicles::handle_create),
        )
        .route(
            "/api/v1/vehicles/:id",
            get(inventory::vehicles::handle_get)
                .patch(inventory::vehicles::handle_update)
                .delete(inventory::vehicles::handle_delete),
        )
        // Generated content
        .route(
            "/api/v1/content",
            get(content::handle_list).post(content::handle_create),
        )
        .route(
            "/api/v1/content/:id",
            get(content::handle_get).delete(content::handle_delete),
        )
        .route(
            "/api/v1/content/:id/status",
            patch(content::handle_update_status),
        )
        .route(
            "/api/v1/content/:id/body",
            patch(content::handle_update_body),
        )
        .with_state(state)
}
