//! Request identity resolution.
//!
//! Every protected handler receives an explicit `Identity`, resolved exactly
//! once per request from the admin cookie and the identity-provider bearer
//! token. Admin status is never inferred from the absence of a session.

pub mod admin;
pub mod handlers;
pub mod session;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

/// The caller's resolved identity for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Identity-provider session holding the external account id.
    Authenticated(String),
    /// Valid admin cookie; platform-wide read access, records owned by the
    /// synthetic admin account.
    AdminBypass,
    Anonymous,
}

impl Identity {
    /// Owner id of the synthetic account that backs admin-created records.
    pub const ADMIN_ACCOUNT_ID: &'static str = "admin_bypass";

    /// Rejects anonymous callers.
    pub fn require(&self) -> Result<(), AppError> {
        match self {
            Identity::Anonymous => Err(AppError::Unauthorized),
            _ => Ok(()),
        }
    }

    /// The external account id that owns records created by this caller.
    pub fn account_id(&self) -> Result<&str, AppError> {
        match self {
            Identity::Authenticated(id) => Ok(id),
            Identity::AdminBypass => Ok(Self::ADMIN_ACCOUNT_ID),
            Identity::Anonymous => Err(AppError::Unauthorized),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::AdminBypass)
    }
}

/// Resolution order: valid admin cookie, then identity-provider bearer token,
/// then anonymous.
pub fn resolve_identity(headers: &HeaderMap, config: &Config) -> Identity {
    if admin::is_admin_session(headers, &config.admin_password) {
        return Identity::AdminBypass;
    }

    if let Some(token) = bearer_token(headers) {
        if let Some(account_id) = session::verify_session_token(token, &config.session_jwt_secret)
        {
            return Identity::Authenticated(account_id);
        }
    }

    Identity::Anonymous
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(resolve_identity(&parts.headers, &state.config))
    }
}
