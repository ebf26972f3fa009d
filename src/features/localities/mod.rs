//! Locality hierarchy feature.
//!
//! Localities form an arbitrarily deep parent/child tree of geographic
//! places (country → state → district → mine). A root has no parent.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/localities` | - | List roots, children, all, or flat name search |
//! | GET | `/api/localities/{id}` | - | Locality with ancestors and full path |
//! | GET | `/api/localities/{id}/children` | - | Direct children |
//! | POST | `/api/localities` | user | Create |
//! | PATCH | `/api/localities/{id}` | user | Partial update (parent moves are cycle-checked) |
//! | DELETE | `/api/localities/{id}` | user | Delete a leaf that no specimen references |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod tree;

pub use services::LocalityService;
pub use store::PgLocalityStore;
