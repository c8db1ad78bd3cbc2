pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod models;

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use api::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_from_config(&state.config);

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Match lifecycle
        .route("/api/v1/match/start", post(api::matches::start_or_join))
        .route("/api/v1/match/place", post(api::matches::place_bots))
        .route("/api/v1/match/attack", post(api::matches::attack))
        .route(
            "/api/v1/match/cancel-inactive",
            post(api::matches::cancel_inactive),
        )
        .route(
            "/api/v1/match/{match_id}/state",
            get(api::matches::get_state),
        )
        .route(
            "/api/v1/match/{match_id}/boards",
            get(api::matches::get_boards),
        )
        .route(
            "/api/v1/match/player/{address}",
            get(api::matches::player_matches),
        )
        // Leaderboard
        .route("/api/v1/leaderboard/top", get(api::leaderboard::top_scores))
        .route(
            "/api/v1/leaderboard/{address}/wins",
            get(api::leaderboard::player_wins),
        )
        // Event polling
        .route("/api/v1/events", get(api::events::poll_events))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_from_config(config: &config::Config) -> CorsLayer {
    let raw = config.cors_allowed_origins.trim();
    if raw.is_empty() || raw == "*" {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if allowed.is_empty() {
        tracing::warn!("No valid CORS origins parsed; falling back to permissive");
        return CorsLayer::very_permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
