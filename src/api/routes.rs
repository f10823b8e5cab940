//! API Routes
//!
//! Configures the Axum router with all directory endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    bulk_create_handler, clear_cache_handler, count_handler, create_handler, health_handler,
    list_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/fetch-users` - List one page of records
/// - `POST /api/create-users` - Create one record
/// - `POST /api/create-bulk-users` - Generate and ingest many records
/// - `DELETE /api/clear-cache` - Drop every cached page
/// - `GET /api/users/count` - Total record count
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/fetch-users", get(list_handler))
        .route("/create-users", post(create_handler))
        .route("/create-bulk-users", post(bulk_create_handler))
        .route("/clear-cache", delete(clear_cache_handler))
        .route("/users/count", get(count_handler));

    Router::new()
        .nest("/api", api)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
