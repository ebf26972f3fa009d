//! In-memory `LocalityStore` for tests.
//!
//! Mirrors the constraints the PostgreSQL schema enforces: sibling name
//! uniqueness, the parent foreign key, and `ON DELETE RESTRICT`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    LocalityQuery, LocalityStore, ParentFilter, DUPLICATE_SIBLING_MESSAGE,
    MISSING_PARENT_MESSAGE, STILL_REFERENCED_MESSAGE,
};
use crate::core::error::{AppError, Result};
use crate::features::localities::models::{Locality, NewLocality};

#[derive(Default)]
pub struct InMemoryLocalityStore {
    localities: RwLock<HashMap<Uuid, Locality>>,
    /// specimen id -> locality id
    specimen_refs: RwLock<HashMap<Uuid, Uuid>>,
    /// ids whose lookup fails as if the store were unreachable
    failing_lookups: RwLock<HashSet<Uuid>>,
}

impl InMemoryLocalityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a specimen pointing at `locality_id`; returns the specimen id
    pub async fn attach_specimen(&self, locality_id: Uuid) -> Uuid {
        let specimen_id = Uuid::new_v4();
        self.specimen_refs
            .write()
            .await
            .insert(specimen_id, locality_id);
        specimen_id
    }

    pub async fn detach_specimen(&self, specimen_id: Uuid) {
        self.specimen_refs.write().await.remove(&specimen_id);
    }

    /// Make `find_by_id(id)` return an error from now on
    pub async fn fail_lookups_for(&self, id: Uuid) {
        self.failing_lookups.write().await.insert(id);
    }

    /// Write a row as-is, skipping every constraint.
    ///
    /// Lets tests build corrupt data such as parent cycles.
    pub async fn put_raw(&self, locality: Locality) {
        self.localities
            .write()
            .await
            .insert(locality.id, locality);
    }

    fn sibling_name_taken(
        rows: &HashMap<Uuid, Locality>,
        name: &str,
        parent_id: Option<Uuid>,
        except: Option<Uuid>,
    ) -> bool {
        rows.values().any(|row| {
            Some(row.id) != except && row.parent_id == parent_id && row.name == name
        })
    }

    fn check_parent_exists(rows: &HashMap<Uuid, Locality>, parent_id: Option<Uuid>) -> Result<()> {
        match parent_id {
            Some(pid) if !rows.contains_key(&pid) => {
                Err(AppError::BadRequest(MISSING_PARENT_MESSAGE.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl LocalityStore for InMemoryLocalityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Locality>> {
        if self.failing_lookups.read().await.contains(&id) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.localities.read().await.get(&id).cloned())
    }

    async fn list(&self, query: &LocalityQuery) -> Result<Vec<Locality>> {
        let needle = query.name_contains.as_ref().map(|t| t.to_lowercase());
        let rows = self.localities.read().await;

        let mut matches: Vec<Locality> = rows
            .values()
            .filter(|row| match query.parent {
                ParentFilter::Any => true,
                ParentFilter::Roots => row.parent_id.is_none(),
                ParentFilter::ChildrenOf(pid) => row.parent_id == Some(pid),
            })
            .filter(|row| query.kind.as_ref().is_none_or(|k| &row.kind == k))
            .filter(|row| {
                needle
                    .as_ref()
                    .is_none_or(|n| row.name.to_lowercase().contains(n.as_str()))
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn insert(&self, new: NewLocality) -> Result<Locality> {
        let mut rows = self.localities.write().await;

        Self::check_parent_exists(&rows, new.parent_id)?;
        if Self::sibling_name_taken(&rows, &new.name, new.parent_id, None) {
            return Err(AppError::Conflict(DUPLICATE_SIBLING_MESSAGE.to_string()));
        }

        let now = Utc::now();
        let locality = Locality {
            id: Uuid::new_v4(),
            name: new.name,
            kind: new.kind,
            latitude: new.latitude,
            longitude: new.longitude,
            parent_id: new.parent_id,
            created_at: now,
            updated_at: now,
        };
        rows.insert(locality.id, locality.clone());
        Ok(locality)
    }

    async fn update(&self, locality: &Locality) -> Result<Option<Locality>> {
        let mut rows = self.localities.write().await;

        let Some(created_at) = rows.get(&locality.id).map(|row| row.created_at) else {
            return Ok(None);
        };

        Self::check_parent_exists(&rows, locality.parent_id)?;
        if Self::sibling_name_taken(&rows, &locality.name, locality.parent_id, Some(locality.id)) {
            return Err(AppError::Conflict(DUPLICATE_SIBLING_MESSAGE.to_string()));
        }

        let updated = Locality {
            created_at,
            updated_at: Utc::now(),
            ..locality.clone()
        };
        rows.insert(updated.id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.localities.write().await;

        let referenced = rows.values().any(|row| row.parent_id == Some(id))
            || self.specimen_refs.read().await.values().any(|l| *l == id);
        if referenced {
            return Err(AppError::Integrity(STILL_REFERENCED_MESSAGE.to_string()));
        }

        Ok(rows.remove(&id).is_some())
    }

    async fn has_children(&self, id: Uuid) -> Result<bool> {
        Ok(self
            .localities
            .read()
            .await
            .values()
            .any(|row| row.parent_id == Some(id)))
    }

    async fn is_referenced_by_specimens(&self, id: Uuid) -> Result<bool> {
        Ok(self.specimen_refs.read().await.values().any(|l| *l == id))
    }
}
