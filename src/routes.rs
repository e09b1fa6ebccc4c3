use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::usage::{get_daily_usage, health};
use crate::services::UsageService;

pub fn create_router(service: UsageService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/usage/daily", get(get_daily_usage))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
