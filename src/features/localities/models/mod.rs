mod locality;

pub use locality::{Locality, LocalityWithAncestors, NewLocality};
