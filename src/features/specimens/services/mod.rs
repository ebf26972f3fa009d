mod specimen_service;

pub use specimen_service::SpecimenService;
