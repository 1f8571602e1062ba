//! Generation engine — validates provider configuration, renders the prompt,
//! and hands it to the Gemini client.

use crate::gemini::{GeminiClient, GenerationError};
use crate::generation::prompts::build_prompt;
use crate::generation::GenerationRequest;

/// Placeholder shipped in sample configs; treated the same as no key at all.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY_HERE";

/// Provider configuration, passed in explicitly per call site rather than
/// read from ambient state.
#[derive(Debug, Clone, Default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
}

impl GeminiConfig {
    /// The configured key, unless it is missing, blank, or the placeholder.
    fn usable_key(&self) -> Option<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() && key != API_KEY_PLACEHOLDER => Some(key),
            _ => None,
        }
    }
}

/// Drafts one email body for the request. The only side effect is the single
/// outbound provider call inside [`GeminiClient::generate`]; an unusable key
/// fails before the transport is ever touched.
pub async fn generate_email(
    llm: &GeminiClient,
    config: &GeminiConfig,
    request: &GenerationRequest,
) -> Result<String, GenerationError> {
    let api_key = config.usable_key().ok_or(GenerationError::Configuration)?;
    let prompt = build_prompt(request);
    llm.generate(&prompt, api_key).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::{GeminiTransport, WireResponse};
    use crate::generation::EmailStyle;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts calls and answers every one with a fixed 200 body.
    struct SpyTransport {
        calls: AtomicUsize,
    }

    impl SpyTransport {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GeminiTransport for SpyTransport {
        async fn post(&self, _url: &str, _body: &Value) -> Result<WireResponse, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WireResponse {
                status: 200,
                body: r#"{"candidates":[{"content":{"parts":[{"text":"drafted"}]}}]}"#.to_string(),
            })
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            recipient_profile_text: "Sam Park — Principal Engineer at Initech".to_string(),
            style: EmailStyle::Default,
            custom_instructions: None,
            sender: None,
        }
    }

    fn config(api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_touching_transport() {
        let spy = SpyTransport::new();
        let llm = GeminiClient::with_transport(spy.clone());

        let err = generate_email(&llm, &config(None), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Configuration));
        assert_eq!(spy.call_count(), 0, "no provider call may happen without a key");
    }

    #[tokio::test]
    async fn test_blank_key_fails_without_touching_transport() {
        let spy = SpyTransport::new();
        let llm = GeminiClient::with_transport(spy.clone());

        let err = generate_email(&llm, &config(Some("   ")), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Configuration));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_placeholder_key_fails_without_touching_transport() {
        let spy = SpyTransport::new();
        let llm = GeminiClient::with_transport(spy.clone());

        let err = generate_email(&llm, &config(Some(API_KEY_PLACEHOLDER)), &request())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Configuration));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_usable_key_makes_exactly_one_provider_call() {
        let spy = SpyTransport::new();
        let llm = GeminiClient::with_transport(spy.clone());

        let body = generate_email(&llm, &config(Some("real-key")), &request())
            .await
            .expect("a usable key must reach the provider");

        assert_eq!(body, "drafted");
        assert_eq!(spy.call_count(), 1);
    }
}
