use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::localities::handlers;
use crate::features::localities::services::LocalityService;

/// Read-only routes, no authentication required
pub fn public_routes(service: Arc<LocalityService>) -> Router {
    Router::new()
        .route("/api/localities", get(handlers::list_localities))
        .route("/api/localities/{id}", get(handlers::get_locality))
        .route(
            "/api/localities/{id}/children",
            get(handlers::list_locality_children),
        )
        .with_state(service)
}

/// Mutating routes, mounted behind the bearer token middleware
pub fn protected_routes(service: Arc<LocalityService>) -> Router {
    Router::new()
        .route("/api/localities", post(handlers::create_locality))
        .route(
            "/api/localities/{id}",
            patch(handlers::update_locality).delete(handlers::delete_locality),
        )
        .with_state(service)
}
