//! Route configuration for the log API.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{delete_record, get_record, health_check, ingest_record, list_records};
use crate::rate_limit::enforce_rate_limit;
use crate::state::ApiState;

/// Create the log API router.
///
/// Versioned routes under `/v1` are rate limited per client; the health
/// endpoint is not.
pub fn create_router(state: Arc<ApiState>) -> Router {
    let cors = build_cors_layer(state.config());

    let v1_routes = Router::new()
        // Ingestion and listing
        .route("/logs", post(ingest_record).get(list_records))
        // Point read and deletion
        .route("/logs/{id}", get(get_record).delete(delete_record))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_rate_limit,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/v1", v1_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &crate::config::ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
