use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::localities::dtos::{
    CreateLocalityDto, ListLocalitiesQuery, UpdateLocalityDto,
};
use crate::features::localities::models::{Locality, LocalityWithAncestors, NewLocality};
use crate::features::localities::services::ancestor_resolver::{
    build_full_path, resolve_ancestors, would_create_cycle,
};
use crate::features::localities::store::{LocalityQuery, LocalityStore, ParentFilter};
use crate::features::localities::tree::LocalityTree;
use crate::shared::nullable;
use crate::shared::validation::{check_latitude, check_longitude, require_non_blank};

pub const HAS_CHILDREN_MESSAGE: &str = "Locality has children and cannot be deleted";
pub const REFERENCED_BY_SPECIMENS_MESSAGE: &str =
    "Locality is referenced by specimens and cannot be deleted";

/// Service for the locality hierarchy: tree navigation and guarded mutations
pub struct LocalityService {
    store: Arc<dyn LocalityStore>,
}

impl LocalityService {
    pub fn new(store: Arc<dyn LocalityStore>) -> Self {
        Self { store }
    }

    // ==================== Tree Navigation ====================

    /// Dispatch a collection query: search, then roots, then children, then everything
    pub async fn list(&self, params: &ListLocalitiesQuery) -> Result<Vec<Locality>> {
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let kind = params
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        let parent = if search.is_some() {
            ParentFilter::Any
        } else if params.roots {
            ParentFilter::Roots
        } else if let Some(parent_id) = params.parent_id {
            ParentFilter::ChildrenOf(parent_id)
        } else {
            ParentFilter::Any
        };

        if kind.is_none() {
            match (search, parent) {
                (Some(term), _) => return self.search(term).await,
                (None, ParentFilter::Roots) => return self.list_roots().await,
                (None, ParentFilter::ChildrenOf(parent_id)) => {
                    return self.list_children(parent_id).await
                }
                (None, ParentFilter::Any) => {}
            }
        }

        self.store
            .list(&LocalityQuery {
                parent,
                kind,
                name_contains: search.map(str::to_string),
            })
            .await
    }

    /// Top-level localities, name-ascending
    pub async fn list_roots(&self) -> Result<Vec<Locality>> {
        self.store
            .list(&LocalityQuery {
                parent: ParentFilter::Roots,
                ..Default::default()
            })
            .await
    }

    /// Direct children of `parent_id`, name-ascending. Unknown parents simply have none.
    pub async fn list_children(&self, parent_id: Uuid) -> Result<Vec<Locality>> {
        self.store
            .list(&LocalityQuery {
                parent: ParentFilter::ChildrenOf(parent_id),
                ..Default::default()
            })
            .await
    }

    /// Flat, case-insensitive name search across the whole tree
    pub async fn search(&self, query: &str) -> Result<Vec<Locality>> {
        self.store
            .list(&LocalityQuery {
                name_contains: Some(query.trim().to_string()),
                ..Default::default()
            })
            .await
    }

    /// A locality with its ancestors (nearest first) and leaf-first full path
    pub async fn get(&self, id: Uuid) -> Result<LocalityWithAncestors> {
        let locality = self.find_existing(id).await?;
        let ancestors = resolve_ancestors(self.store.as_ref(), locality.parent_id).await;
        let full_path = build_full_path(&locality, &ancestors);

        Ok(LocalityWithAncestors {
            locality,
            ancestors,
            full_path,
        })
    }

    pub async fn ensure_exists(&self, id: Uuid) -> Result<()> {
        self.find_existing(id).await.map(|_| ())
    }

    /// `id` and the ids of every locality below it
    pub async fn descendant_ids(&self, id: Uuid) -> Result<Vec<Uuid>> {
        let all = self.store.list(&LocalityQuery::default()).await?;
        let tree = LocalityTree::from_nodes(&all);

        if !tree.contains(id) {
            return Err(locality_not_found(id));
        }

        Ok(tree.subtree_ids(id))
    }

    // ==================== Mutations ====================

    pub async fn create(&self, dto: CreateLocalityDto) -> Result<Locality> {
        let name = require_non_blank("name", &dto.name)?;
        let kind = require_non_blank("kind", &dto.kind)?;
        check_latitude(dto.latitude)?;
        check_longitude(dto.longitude)?;

        // Sibling uniqueness is left to the store's constraint
        let locality = self
            .store
            .insert(NewLocality {
                name,
                kind,
                latitude: dto.latitude,
                longitude: dto.longitude,
                parent_id: dto.parent_id,
            })
            .await?;

        tracing::info!(
            "Locality created: id={}, name={}, parent_id={:?}",
            locality.id,
            locality.name,
            locality.parent_id
        );

        Ok(locality)
    }

    /// Apply the fields present in `dto`; everything else keeps its stored value
    pub async fn update(&self, id: Uuid, dto: UpdateLocalityDto) -> Result<Locality> {
        let current = self.find_existing(id).await?;

        let name = match dto.name {
            Some(ref name) => require_non_blank("name", name)?,
            None => current.name.clone(),
        };
        let kind = match dto.kind {
            Some(ref kind) => require_non_blank("kind", kind)?,
            None => current.kind.clone(),
        };

        let latitude = nullable::apply(current.latitude, dto.latitude);
        let longitude = nullable::apply(current.longitude, dto.longitude);
        check_latitude(latitude)?;
        check_longitude(longitude)?;

        let parent_id = nullable::apply(current.parent_id, dto.parent_id);
        if let Some(new_parent_id) = parent_id {
            if parent_id != current.parent_id
                && would_create_cycle(self.store.as_ref(), id, new_parent_id).await?
            {
                return Err(AppError::Validation(
                    "A locality cannot be moved below itself or one of its descendants"
                        .to_string(),
                ));
            }
        }

        let updated = self
            .store
            .update(&Locality {
                name,
                kind,
                latitude,
                longitude,
                parent_id,
                ..current
            })
            .await?
            .ok_or_else(|| locality_not_found(id))?;

        tracing::info!("Locality updated: id={}", updated.id);

        Ok(updated)
    }

    /// Delete a locality that has no children and no specimen references
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.store.has_children(id).await? {
            return Err(AppError::Integrity(HAS_CHILDREN_MESSAGE.to_string()));
        }

        if self.store.is_referenced_by_specimens(id).await? {
            return Err(AppError::Integrity(
                REFERENCED_BY_SPECIMENS_MESSAGE.to_string(),
            ));
        }

        if !self.store.delete(id).await? {
            return Err(locality_not_found(id));
        }

        tracing::info!("Locality deleted: id={}", id);

        Ok(())
    }

    async fn find_existing(&self, id: Uuid) -> Result<Locality> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| locality_not_found(id))
    }
}

fn locality_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Locality with id {} not found", id))
}
