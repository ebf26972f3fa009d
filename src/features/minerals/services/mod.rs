mod mineral_service;

pub use mineral_service::MineralService;
