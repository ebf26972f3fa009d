pub mod auth;
pub mod localities;
pub mod minerals;
pub mod specimens;
