/// LLM Client: the single point of entry for all completion calls in AutoContent.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through the `CompletionProvider` trait.
///
/// Two backends speak the same chat-completions wire format; deployment
/// configuration picks one. Sampling parameters are fixed here to keep
/// generated copy consistent across backends.
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Fixed sampling temperature for all marketing-copy generations.
const TEMPERATURE: f32 = 0.75;
/// Output cap; the longest content type (video script) fits comfortably.
const MAX_COMPLETION_TOKENS: u32 = 600;
const HTTP_TIMEOUT_SECS: u64 = 120;

/// Process-wide HTTP client, lazily constructed on first use and shared by
/// every provider instance.
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn http_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Completion backend selected at deploy time via `LLM_BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAi,
    Xai,
}

impl LlmBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(LlmBackend::OpenAi),
            "xai" => Some(LlmBackend::Xai),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "https://api.openai.com/v1/chat/completions",
            LlmBackend::Xai => "https://api.x.ai/v1/chat/completions",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "gpt-4o-mini",
            LlmBackend::Xai => "grok-3-mini",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "OPENAI_API_KEY",
            LlmBackend::Xai => "XAI_API_KEY",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "openai",
            LlmBackend::Xai => "xai",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Token accounting reported back to the caller. Backends that omit usage
/// yield all-zero counts rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A single completion result: generated text plus token accounting.
#[derive(Debug, Clone)]
pub struct Completion {
    pub body: String,
    pub usage: TokenUsage,
}

/// The pluggable completion interface. One call per generation request:
/// no retry, no streaming, no caching.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Completion, ProviderError>;
    fn model(&self) -> &str;
}

/// HTTP implementation speaking the OpenAI-compatible chat-completions format.
pub struct ChatCompletionsProvider {
    endpoint: &'static str,
    model: String,
    api_key: String,
}

impl ChatCompletionsProvider {
    pub fn new(backend: LlmBackend, model: String, api_key: String) -> Self {
        Self {
            endpoint: backend.endpoint(),
            model,
            api_key,
        }
    }
}

/// Builds the configured provider. Called exactly once at startup; the
/// resulting handle is shared through `AppState`.
pub fn provider_from_config(config: &Config) -> Arc<dyn CompletionProvider> {
    Arc::new(ChatCompletionsProvider::new(
        config.llm_backend,
        config.llm_model.clone(),
        config.llm_api_key.clone(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Maps the parsed wire response to a `Completion`. A missing first choice or
/// missing usage block degrades to empty text / zero counts instead of panicking.
fn completion_from_response(response: ChatResponse) -> Completion {
    let body = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    let usage = response.usage.unwrap_or_default();

    Completion {
        body,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsProvider {
    async fn complete(&self, prompt: &str) -> Result<Completion, ProviderError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = http_client()
            .post(self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error envelope
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let completion = completion_from_response(parsed);

        debug!(
            "Completion succeeded: prompt_tokens={}, completion_tokens={}",
            completion.usage.prompt_tokens, completion.usage.completion_tokens
        );

        Ok(completion)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
