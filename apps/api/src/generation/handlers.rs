//! Axum route handler for the generation endpoint.

use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::accounts::consume_generation_credit;
use crate::auth::Identity;
use crate::errors::AppError;
use crate::generation::prompts::build_prompt;
use crate::generation::snapshots::parse_snapshot;
use crate::llm_client::{CompletionProvider, TokenUsage};
use crate::models::content::{ContentType, SourceType};
use crate::state::AppState;

pub const DEFAULT_TONE: &str = "professional";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub source_type: SourceType,
    pub content_type: ContentType,
    #[serde(default = "default_tone")]
    pub tone: String,
    pub data: Value,
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub body: String,
    pub usage: TokenUsage,
    pub duration_ms: u64,
}

/// POST /api/generate
///
/// Steps in order: authorize, validate the payload, meter the account, then
/// exactly one provider call. Anonymous callers and exhausted accounts never
/// reach the provider.
pub async fn handle_generate(
    identity: Identity,
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    identity.require()?;

    let snapshot = parse_snapshot(request.source_type, request.data)?;

    // Admin browsing is unmetered; authenticated accounts burn one credit
    // per request, checked and incremented in a single guarded UPDATE.
    if let Identity::Authenticated(account_id) = &identity {
        consume_generation_credit(&state.db, account_id).await?;
    }

    let prompt = build_prompt(&snapshot, request.content_type, &request.tone);
    let response = run_generation(state.provider.as_ref(), &prompt).await?;

    info!(
        "Generated {} copy for {} source in {}ms",
        request.content_type.as_str(),
        request.source_type.as_str(),
        response.duration_ms
    );

    Ok(Json(response))
}

/// Issues the single completion call and measures wall-clock latency around it.
async fn run_generation(
    provider: &dyn CompletionProvider,
    prompt: &str,
) -> Result<GenerateResponse, AppError> {
    let started = Instant::now();

    let completion = provider
        .complete(prompt)
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    let duration_ms = started.elapsed().as_millis() as u64;

    Ok(GenerateResponse {
        body: completion.body,
        usage: completion.usage,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{Completion, ProviderError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts invocations and returns fixed text with no usage data, the way
    /// a backend that omits token accounting would.
    struct MockProvider {
        response: &'static str,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(response: &'static str) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn complete(&self, _prompt: &str) -> Result<Completion, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Completion {
                body: self.response.to_string(),
                usage: TokenUsage::default(),
            })
        }

        fn model(&self) -> &str {
            "mock"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _prompt: &str) -> Result<Completion, ProviderError> {
            Err(ProviderError::Api {
                status: 500,
                message: "upstream unavailable".to_string(),
            })
        }

        fn model(&self) -> &str {
            "mock"
        }
    }

    fn twitter_request() -> GenerateRequest {
        serde_json::from_value(json!({
            "sourceType": "property",
            "contentType": "social_twitter",
            "tone": "luxury",
            "data": {
                "address": "1 Ocean Dr",
                "city": "Miami",
                "state": "FL",
                "zipCode": "33139",
                "price": 950000,
                "propertyType": "condo",
                "bedrooms": 2,
                "bathrooms": 2,
                "squareFeet": 1400,
                "features": ["Ocean View"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_tone_defaults_to_professional() {
        let request: GenerateRequest = serde_json::from_value(json!({
            "sourceType": "property",
            "contentType": "listing_description",
            "data": {}
        }))
        .unwrap();
        assert_eq!(request.tone, DEFAULT_TONE);
    }

    #[test]
    fn test_anonymous_caller_never_reaches_the_provider() {
        let provider = MockProvider::new("should never be returned");
        let result = Identity::Anonymous.require();
        assert!(matches!(result, Err(AppError::Unauthorized)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_mock_completion_passes_through_unchanged() {
        let provider = MockProvider::new("Luxury condo with ocean views. $950,000. DM for tours.");
        let request = twitter_request();
        let snapshot = parse_snapshot(request.source_type, request.data).unwrap();
        let prompt = build_prompt(&snapshot, request.content_type, &request.tone);

        let response = run_generation(&provider, &prompt).await.unwrap();

        assert_eq!(
            response.body,
            "Luxury condo with ocean views. $950,000. DM for tours."
        );
        assert_eq!(response.usage, TokenUsage::default());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_provider_error() {
        let result = run_generation(&FailingProvider, "any prompt").await;
        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[tokio::test]
    async fn test_invalid_payload_fails_before_the_provider_is_called() {
        let provider = MockProvider::new("unused");
        let request: GenerateRequest = serde_json::from_value(json!({
            "sourceType": "property",
            "contentType": "social_twitter",
            "data": { "address": "1 Ocean Dr" }
        }))
        .unwrap();

        let result = parse_snapshot(request.source_type, request.data);
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = GenerateResponse {
            body: "text".to_string(),
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            },
            duration_ms: 1234,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["body"], "text");
        assert_eq!(json["durationMs"], 1234);
        assert_eq!(json["usage"]["promptTokens"], 10);
    }
}
