//! Persistence seam for localities.
//!
//! The service layer only talks to [`LocalityStore`]; production wires in
//! [`PgLocalityStore`], tests use the in-memory store.

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::InMemoryLocalityStore;
pub use postgres::PgLocalityStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::localities::models::{Locality, NewLocality};

pub const DUPLICATE_SIBLING_MESSAGE: &str =
    "A locality with this name already exists under the same parent";
pub const MISSING_PARENT_MESSAGE: &str = "Parent locality does not exist";
pub const STILL_REFERENCED_MESSAGE: &str = "Locality is still referenced and cannot be deleted";

/// Which part of the tree a listing covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentFilter {
    /// Every locality regardless of position
    #[default]
    Any,
    /// Only localities without a parent
    Roots,
    /// Only direct children of the given locality
    ChildrenOf(Uuid),
}

/// Filtered select over the localities table. Results are always name-ascending.
#[derive(Debug, Clone, Default)]
pub struct LocalityQuery {
    pub parent: ParentFilter,
    /// Exact match on `kind`
    pub kind: Option<String>,
    /// Case-insensitive substring match on `name`; wildcards match literally
    pub name_contains: Option<String>,
}

#[async_trait]
pub trait LocalityStore: Send + Sync {
    /// Returns `Ok(None)` if no locality has this id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Locality>>;

    async fn list(&self, query: &LocalityQuery) -> Result<Vec<Locality>>;

    /// Fails with `Conflict` on a duplicate `(name, parent_id)` and with
    /// `BadRequest` when `parent_id` does not exist.
    async fn insert(&self, new: NewLocality) -> Result<Locality>;

    /// Overwrites the mutable columns of `locality.id`.
    ///
    /// Returns `Ok(None)` if the row does not exist; constraint failures as for `insert`.
    async fn update(&self, locality: &Locality) -> Result<Option<Locality>>;

    /// Returns `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn has_children(&self, id: Uuid) -> Result<bool>;

    async fn is_referenced_by_specimens(&self, id: Uuid) -> Result<bool>;
}
