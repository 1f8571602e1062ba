//! Gemini client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may talk to the Gemini API directly.
//! All provider interactions MUST go through this module.
//!
//! Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";
/// The model used for all generation calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
/// Upstream latency is unbounded; the client caps the round trip itself.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Returned in place of body text when a 2xx response carries no usable text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Failed to generate email";

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The API key is missing, blank, or still the sample placeholder.
    /// The provider is never contacted in this state.
    #[error("Gemini API key is not configured")]
    Configuration,

    #[error("Gemini API request failed: {status} - {body}")]
    Api { status: u16, body: String },

    /// The response never arrived or its body was not usable JSON.
    #[error("unusable Gemini response: {0}")]
    Parse(String),

    #[error("generation cancelled or timed out")]
    Cancelled,
}

/// One HTTP exchange with the provider, reduced to what the parser needs.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

/// Raw POST to the provider endpoint. A trait so tests can substitute canned
/// transports and call-counting spies; the only impl outside tests wraps
/// reqwest.
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    async fn post(&self, url: &str, body: &Value) -> Result<WireResponse, GenerationError>;
}

struct HttpTransport {
    client: Client,
}

#[async_trait]
impl GeminiTransport for HttpTransport {
    async fn post(&self, url: &str, body: &Value) -> Result<WireResponse, GenerationError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(wire_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(wire_error)?;

        Ok(WireResponse { status, body })
    }
}

/// The request URL carries the API key as a query parameter, and reqwest
/// errors render the URL. Strip it before the message can leave this module.
fn wire_error(e: reqwest::Error) -> GenerationError {
    classify_wire_failure(e.is_timeout(), e.without_url().to_string())
}

/// Timeouts surface as [`GenerationError::Cancelled`]; every other transport
/// failure reads as an unusable response.
fn classify_wire_failure(timed_out: bool, detail: String) -> GenerationError {
    if timed_out {
        return GenerationError::Cancelled;
    }
    GenerationError::Parse(detail)
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// First candidate's first part's text, if any non-empty text exists there.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

/// The single Gemini client used by all generation paths.
/// Stateless between calls; clone freely.
#[derive(Clone)]
pub struct GeminiClient {
    transport: Arc<dyn GeminiTransport>,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            transport: Arc::new(HttpTransport {
                client: Client::builder()
                    .timeout(REQUEST_TIMEOUT)
                    .build()
                    .expect("Failed to build HTTP client"),
            }),
        }
    }

    /// Swaps the wire for a scripted transport.
    #[cfg(test)]
    pub(crate) fn with_transport(transport: Arc<dyn GeminiTransport>) -> Self {
        Self { transport }
    }

    /// Sends one prompt to Gemini and returns the generated email body.
    /// Exactly one request per call — no retries, no streaming.
    pub async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, GenerationError> {
        let request_body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let url = format!("{GEMINI_API_URL}?key={api_key}");

        let response = self.transport.post(&url, &request_body).await?;

        if !(200..300).contains(&response.status) {
            return Err(GenerationError::Api {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response.body)
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        // A 2xx with no usable text degrades to a fixed placeholder rather
        // than an error; callers cannot tell a degraded response from a real
        // one. Kept for compatibility with existing clients.
        Ok(parsed
            .into_text()
            .unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string()))
    }
}
