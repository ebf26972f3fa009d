mod specimen;

pub use specimen::Specimen;
