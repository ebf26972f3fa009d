//! Specimen collections.
//!
//! A specimen belongs to the account that catalogued it. Private specimens
//! are visible to their owner only; public ones can be browsed by locality,
//! optionally across the whole subtree below it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/specimens` | user | Caller's own specimens, paginated |
//! | GET | `/api/specimens/{id}` | user | Owner, or anyone if public |
//! | POST | `/api/specimens` | user | Catalogue a specimen |
//! | PATCH | `/api/specimens/{id}` | owner | Partial update |
//! | DELETE | `/api/specimens/{id}` | owner | Delete |
//! | GET | `/api/localities/{id}/specimens` | - | Public specimens at a locality |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SpecimenService;
