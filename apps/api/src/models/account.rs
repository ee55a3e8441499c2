#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One workspace per external identity. `generations_used` only moves up
/// absent a manual reset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccountRow {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub industry: Option<String>,
    pub company_name: Option<String>,
    pub plan: String,
    pub generations_used: i64,
    pub generations_limit: i64,
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    RealEstate,
    Auto,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::RealEstate => "real_estate",
            Industry::Auto => "auto",
        }
    }
}
