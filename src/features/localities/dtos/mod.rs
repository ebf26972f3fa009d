mod locality_dto;

pub use locality_dto::{
    CreateLocalityDto, ListLocalitiesQuery, LocalityDetailDto, LocalityResponseDto,
    UpdateLocalityDto,
};
