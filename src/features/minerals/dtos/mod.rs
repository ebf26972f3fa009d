pub mod mineral_dto;

pub use mineral_dto::{CreateMineralDto, MineralQueryParams, MineralResponseDto, UpdateMineralDto};
