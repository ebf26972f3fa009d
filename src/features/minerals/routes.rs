use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::minerals::{handlers, services::MineralService};

/// Public read routes for the taxonomy
pub fn public_routes(service: Arc<MineralService>) -> Router {
    Router::new()
        .route("/api/minerals", get(handlers::list_minerals))
        .route("/api/minerals/{id}", get(handlers::get_mineral))
        .with_state(service)
}

/// Curation routes (admin only, checked per handler)
pub fn admin_routes(service: Arc<MineralService>) -> Router {
    Router::new()
        .route("/api/minerals", post(handlers::create_mineral))
        .route(
            "/api/minerals/{id}",
            patch(handlers::update_mineral).delete(handlers::delete_mineral),
        )
        .with_state(service)
}
