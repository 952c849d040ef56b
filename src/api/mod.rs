use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::client::SearchClient;

pub mod handlers;
pub mod models;

pub fn create_router(client: Arc<SearchClient>, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/search", post(handlers::dashboard_handler))
        .route("/api/search/:mode", post(handlers::mode_search_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(client)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
