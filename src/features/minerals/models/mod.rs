mod mineral;

pub use mineral::Mineral;
