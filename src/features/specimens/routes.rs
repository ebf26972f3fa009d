use axum::{
    routing::{get, post},
    Router,
};

use crate::features::specimens::handlers::{self, SpecimenState};

/// Public browsing of specimens by locality
pub fn public_routes(state: SpecimenState) -> Router {
    Router::new()
        .route(
            "/api/localities/{id}/specimens",
            get(handlers::list_locality_specimens),
        )
        .with_state(state)
}

/// Collection management, mounted behind the bearer token middleware
pub fn protected_routes(state: SpecimenState) -> Router {
    Router::new()
        .route("/api/specimens", post(handlers::create_specimen))
        .route("/api/specimens", get(handlers::list_my_specimens))
        .route(
            "/api/specimens/{id}",
            get(handlers::get_specimen)
                .patch(handlers::update_specimen)
                .delete(handlers::delete_specimen),
        )
        .with_state(state)
}
