pub mod mineral_handler;

pub use mineral_handler::*;
