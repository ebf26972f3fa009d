pub mod constants;
pub mod nullable;
pub mod search;
pub mod test_helpers;
pub mod types;
pub mod validation;
