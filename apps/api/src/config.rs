use anyhow::{bail, Context, Result};

use crate::llm_client::LlmBackend;

/// The out-of-the-box admin password. Must be overridden in any real deployment;
/// startup logs a warning while it is still in effect.
pub const DEFAULT_ADMIN_PASSWORD: &str = "jarvis2026";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared secret for the admin bypass session scheme.
    pub admin_password: String,
    /// HS256 secret used to verify identity-provider session tokens.
    pub session_jwt_secret: String,
    pub llm_backend: LlmBackend,
    pub llm_api_key: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_backend = match std::env::var("LLM_BACKEND") {
            Ok(value) => match LlmBackend::parse(&value) {
                Some(backend) => backend,
                None => bail!("LLM_BACKEND must be one of: openai, xai (got '{value}')"),
            },
            Err(_) => LlmBackend::OpenAi,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string())
                .trim()
                .to_string(),
            session_jwt_secret: require_env("SESSION_JWT_SECRET")?,
            llm_api_key: require_env(llm_backend.api_key_var())?,
            llm_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| llm_backend.default_model().to_string()),
            llm_backend,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
