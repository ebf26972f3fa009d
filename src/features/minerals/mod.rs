//! Shared mineral taxonomy.
//!
//! Anyone can browse; only admins curate. A mineral that any specimen still
//! lists cannot be deleted.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MineralService;
