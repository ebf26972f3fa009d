pub mod specimen_dto;

pub use specimen_dto::{
    CreateSpecimenDto, LocalitySpecimensQuery, SpecimenResponseDto, UpdateSpecimenDto,
};
