mod auth;
mod config;
mod db;
mod errors;
mod gemini;
mod generation;
mod history;
mod models;
mod profile;
mod rate_limit;
mod routes;
mod state;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::gemini::GeminiClient;
use crate::rate_limit::GuestRateLimiter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coldmail API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize Gemini client
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail until it is configured");
    }
    let llm = GeminiClient::new();
    info!("Gemini client initialized (model: {})", gemini::MODEL);

    // Build app state
    let state = AppState {
        db,
        llm,
        config: config.clone(),
        guest_limiter: GuestRateLimiter::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(extension_cors());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // ConnectInfo is required by the guest rate limiter.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// CORS policy for the browser extension and local development frontends.
///
/// Extension origins carry a per-install id, so exact-origin allow lists do
/// not work; prefix matching is the scheme's intended model.
fn extension_cors() -> CorsLayer {
    const ALLOWED_PREFIXES: [&[u8]; 4] = [
        b"chrome-extension://",
        b"http://localhost",
        b"http://127.0.0.1",
        b"https://localhost",
    ];

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            ALLOWED_PREFIXES
                .iter()
                .any(|prefix| origin.as_bytes().starts_with(prefix))
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
