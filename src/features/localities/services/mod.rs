pub mod ancestor_resolver;
mod locality_service;

pub use locality_service::LocalityService;
