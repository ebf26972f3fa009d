//! Walks parent links from a locality up to its root.

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::localities::models::Locality;
use crate::features::localities::store::LocalityStore;
use crate::shared::constants::MAX_LOCALITY_DEPTH;

/// Resolve the chain of ancestors starting at `parent_id`.
///
/// The result is ordered nearest-first (immediate parent, then its parent, up
/// to the root) and never contains the node that owns `parent_id`. A missing
/// row or a failed lookup ends the chain quietly, and at most
/// `MAX_LOCALITY_DEPTH` ancestors are returned, so a parent cycle cannot
/// stall the walk. One store lookup per level.
pub async fn resolve_ancestors(store: &dyn LocalityStore, parent_id: Option<Uuid>) -> Vec<Locality> {
    let mut ancestors: Vec<Locality> = Vec::new();
    let mut next = parent_id;

    while let Some(id) = next {
        if ancestors.len() >= MAX_LOCALITY_DEPTH {
            tracing::warn!(
                "Ancestor walk stopped at depth {} (next id {}); parent links may form a cycle",
                MAX_LOCALITY_DEPTH,
                id
            );
            break;
        }

        match store.find_by_id(id).await {
            Ok(Some(node)) => {
                next = node.parent_id;
                ancestors.push(node);
            }
            Ok(None) => {
                tracing::warn!("Ancestor {} does not exist; truncating path", id);
                break;
            }
            Err(e) => {
                tracing::warn!("Failed to load ancestor {}: {}; truncating path", id, e);
                break;
            }
        }
    }

    ancestors
}

/// Leaf-first, comma-joined names of `node` and its ancestors
pub fn build_full_path(node: &Locality, ancestors: &[Locality]) -> String {
    std::iter::once(node.name.as_str())
        .chain(ancestors.iter().map(|a| a.name.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether re-parenting `node_id` under `new_parent_id` would make the node its own ancestor.
///
/// Unlike [`resolve_ancestors`] this walk is strict: a failed lookup is
/// returned to the caller, and a chain that reaches `MAX_LOCALITY_DEPTH`
/// without ending at a root is rejected since it cannot be shown acyclic.
/// A missing row ends the walk; the store's foreign key reports it.
pub async fn would_create_cycle(
    store: &dyn LocalityStore,
    node_id: Uuid,
    new_parent_id: Uuid,
) -> Result<bool> {
    let mut next = Some(new_parent_id);
    let mut depth = 0;

    while let Some(id) = next {
        if id == node_id {
            return Ok(true);
        }

        if depth >= MAX_LOCALITY_DEPTH {
            tracing::warn!(
                "Cycle check for {} gave up at depth {} below {}",
                node_id,
                MAX_LOCALITY_DEPTH,
                new_parent_id
            );
            return Err(AppError::Validation(format!(
                "Ancestor chain of {} is deeper than {} levels",
                new_parent_id, MAX_LOCALITY_DEPTH
            )));
        }

        next = match store.find_by_id(id).await? {
            Some(node) => node.parent_id,
            None => None,
        };
        depth += 1;
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::localities::models::NewLocality;
    use crate::features::localities::store::InMemoryLocalityStore;
    use chrono::Utc;

    async fn add(store: &InMemoryLocalityStore, name: &str, parent_id: Option<Uuid>) -> Locality {
        store
            .insert(NewLocality {
                name: name.to_string(),
                kind: "region".to_string(),
                latitude: None,
                longitude: None,
                parent_id,
            })
            .await
            .unwrap()
    }

    /// Build a straight chain of `depth` nodes; returns them root first
    async fn chain(store: &InMemoryLocalityStore, depth: usize) -> Vec<Locality> {
        let mut nodes: Vec<Locality> = Vec::with_capacity(depth);
        for level in 0..depth {
            let parent_id = nodes.last().map(|n| n.id);
            nodes.push(add(store, &format!("Level {}", level), parent_id).await);
        }
        nodes
    }

    #[tokio::test]
    async fn test_root_has_no_ancestors() {
        let store = InMemoryLocalityStore::new();
        let brazil = add(&store, "Brazil", None).await;

        let ancestors = resolve_ancestors(&store, brazil.parent_id).await;
        assert!(ancestors.is_empty());
        assert_eq!(build_full_path(&brazil, &ancestors), "Brazil");
    }

    #[tokio::test]
    async fn test_chain_is_nearest_first() {
        let store = InMemoryLocalityStore::new();
        let england = add(&store, "England", None).await;
        let durham = add(&store, "County Durham", Some(england.id)).await;
        let weardale = add(&store, "Weardale", Some(durham.id)).await;
        let rogerley = add(&store, "Rogerley Mine", Some(weardale.id)).await;

        let ancestors = resolve_ancestors(&store, rogerley.parent_id).await;
        let ids: Vec<Uuid> = ancestors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![weardale.id, durham.id, england.id]);
        assert!(!ids.contains(&rogerley.id));
        assert_eq!(
            build_full_path(&rogerley, &ancestors),
            "Rogerley Mine, Weardale, County Durham, England"
        );
    }

    #[tokio::test]
    async fn test_full_chain_up_to_depth_limit() {
        let store = InMemoryLocalityStore::new();
        // 51 nodes: the deepest has exactly MAX_LOCALITY_DEPTH ancestors
        let nodes = chain(&store, MAX_LOCALITY_DEPTH + 1).await;
        let leaf = nodes.last().unwrap();

        let ancestors = resolve_ancestors(&store, leaf.parent_id).await;
        assert_eq!(ancestors.len(), nodes.len() - 1);
        assert_eq!(ancestors.last().unwrap().id, nodes[0].id);
    }

    #[tokio::test]
    async fn test_dangling_parent_yields_empty_chain() {
        let store = InMemoryLocalityStore::new();
        let ancestors = resolve_ancestors(&store, Some(Uuid::new_v4())).await;
        assert!(ancestors.is_empty());
    }

    #[tokio::test]
    async fn test_failed_lookup_truncates_silently() {
        let store = InMemoryLocalityStore::new();
        let nodes = chain(&store, 4).await;
        store.fail_lookups_for(nodes[1].id).await;

        let ancestors = resolve_ancestors(&store, nodes[3].parent_id).await;
        let ids: Vec<Uuid> = ancestors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![nodes[2].id]);
    }

    #[tokio::test]
    async fn test_cycle_stops_at_depth_limit() {
        let store = InMemoryLocalityStore::new();
        let now = Utc::now();
        let a_id = Uuid::new_v4();
        let b_id = Uuid::new_v4();
        for (id, name, parent) in [(a_id, "A", b_id), (b_id, "B", a_id)] {
            store
                .put_raw(Locality {
                    id,
                    name: name.to_string(),
                    kind: "region".to_string(),
                    latitude: None,
                    longitude: None,
                    parent_id: Some(parent),
                    created_at: now,
                    updated_at: now,
                })
                .await;
        }

        let ancestors = resolve_ancestors(&store, Some(b_id)).await;
        assert_eq!(ancestors.len(), MAX_LOCALITY_DEPTH);
        assert_eq!(ancestors[0].id, b_id);
        assert_eq!(ancestors[1].id, a_id);
    }

    #[tokio::test]
    async fn test_would_create_cycle() {
        let store = InMemoryLocalityStore::new();
        let nodes = chain(&store, 3).await;
        let (root, middle, leaf) = (&nodes[0], &nodes[1], &nodes[2]);

        assert!(would_create_cycle(&store, root.id, root.id).await.unwrap());
        assert!(would_create_cycle(&store, root.id, leaf.id).await.unwrap());
        assert!(would_create_cycle(&store, middle.id, leaf.id).await.unwrap());
        assert!(!would_create_cycle(&store, leaf.id, root.id).await.unwrap());

        let other_root = add(&store, "Elsewhere", None).await;
        assert!(!would_create_cycle(&store, root.id, other_root.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_cycle_check_propagates_failed_lookup() {
        let store = InMemoryLocalityStore::new();
        let nodes = chain(&store, 3).await;
        store.fail_lookups_for(nodes[1].id).await;

        let result = would_create_cycle(&store, nodes[0].id, nodes[2].id).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_cycle_check_rejects_unbounded_chain() {
        let store = InMemoryLocalityStore::new();
        let now = Utc::now();
        let a_id = Uuid::new_v4();
        let b_id = Uuid::new_v4();
        for (id, name, parent) in [(a_id, "A", b_id), (b_id, "B", a_id)] {
            store
                .put_raw(Locality {
                    id,
                    name: name.to_string(),
                    kind: "region".to_string(),
                    latitude: None,
                    longitude: None,
                    parent_id: Some(parent),
                    created_at: now,
                    updated_at: now,
                })
                .await;
        }
        let outsider = add(&store, "Outsider", None).await;

        let result = would_create_cycle(&store, outsider.id, a_id).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
