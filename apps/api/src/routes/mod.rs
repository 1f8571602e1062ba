pub mod health;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::generation::handlers as generation_handlers;
use crate::history::handlers as history_handlers;
use crate::profile::handlers as profile_handlers;
use crate::rate_limit;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth_handlers::handle_register))
        .route("/api/auth/login", post(auth_handlers::handle_login))
        // Sender profile
        .route(
            "/api/profile",
            get(profile_handlers::handle_get_profile).post(profile_handlers::handle_save_profile),
        )
        // Email generation
        .route(
            "/api/email/generate",
            post(generation_handlers::handle_generate),
        )
        .route(
            "/api/email/generate/guest",
            post(generation_handlers::handle_generate_guest).route_layer(
                middleware::from_fn_with_state(state.clone(), rate_limit::guest_rate_limit),
            ),
        )
        // Email history
        .route("/api/history", get(history_handlers::handle_list_history))
        .route(
            "/api/history/:id",
            get(history_handlers::handle_get_history)
                .put(history_handlers::handle_update_email)
                .delete(history_handlers::handle_delete_history),
        )
        .route(
            "/api/history/:id/status",
            patch(history_handlers::handle_update_status),
        )
        .with_state(state)
}
