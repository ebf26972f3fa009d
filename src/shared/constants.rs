/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Upper bound on ancestor lookups for a single locality.
///
/// Reaching it means the chain is deeper than any real place hierarchy,
/// which in practice only happens when the parent links form a cycle.
pub const MAX_LOCALITY_DEPTH: usize = 50;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Back-office role: manages the mineral taxonomy
pub const ROLE_ADMIN: &str = "admin";
