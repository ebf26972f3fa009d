mod locality_handler;

pub use locality_handler::*;
