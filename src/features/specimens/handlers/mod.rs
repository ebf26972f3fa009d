mod specimen_handler;

pub use specimen_handler::*;
