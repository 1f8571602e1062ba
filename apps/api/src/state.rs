use sqlx::PgPool;

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::rate_limit::GuestRateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: GeminiClient,
    pub config: Config,
    /// Per-IP daily counter guarding the guest generation endpoint.
    pub guest_limiter: GuestRateLimiter,
}
