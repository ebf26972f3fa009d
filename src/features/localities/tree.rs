//! Whole-table adjacency map for subtree queries.
//!
//! One bulk load replaces a round trip per tree level when every node
//! below a locality is needed (e.g. aggregating specimens of a region).

use std::collections::{HashMap, HashSet, VecDeque};

use uuid::Uuid;

use crate::features::localities::models::Locality;

#[derive(Debug, Default)]
pub struct LocalityTree {
    children: HashMap<Uuid, Vec<Uuid>>,
    ids: HashSet<Uuid>,
}

impl LocalityTree {
    pub fn from_nodes(nodes: &[Locality]) -> Self {
        let mut tree = Self::default();
        for node in nodes {
            tree.ids.insert(node.id);
            if let Some(parent_id) = node.parent_id {
                tree.children.entry(parent_id).or_default().push(node.id);
            }
        }
        tree
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn children_of(&self, id: Uuid) -> &[Uuid] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `id` followed by every node below it, breadth-first.
    ///
    /// Each node is visited at most once, so corrupt parent cycles terminate.
    pub fn subtree_ids(&self, id: Uuid) -> Vec<Uuid> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut seen = HashSet::from([id]);
        let mut order = vec![id];
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for &child in self.children_of(current) {
                if seen.insert(child) {
                    order.push(child);
                    queue.push_back(child);
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn node(name: &str, parent_id: Option<Uuid>) -> Locality {
        Locality {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind: "region".to_string(),
            latitude: None,
            longitude: None,
            parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_subtree_is_breadth_first_and_excludes_siblings() {
        let england = node("England", None);
        let durham = node("County Durham", Some(england.id));
        let cornwall = node("Cornwall", Some(england.id));
        let weardale = node("Weardale", Some(durham.id));
        let rogerley = node("Rogerley Mine", Some(weardale.id));
        let brazil = node("Brazil", None);

        let tree = LocalityTree::from_nodes(&[
            england.clone(),
            durham.clone(),
            cornwall.clone(),
            weardale.clone(),
            rogerley.clone(),
            brazil.clone(),
        ]);

        assert_eq!(
            tree.subtree_ids(durham.id),
            vec![durham.id, weardale.id, rogerley.id]
        );

        let all = tree.subtree_ids(england.id);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], england.id);
        assert!(!all.contains(&brazil.id));

        assert_eq!(tree.subtree_ids(rogerley.id), vec![rogerley.id]);
    }

    #[test]
    fn test_unknown_id_has_empty_subtree() {
        let tree = LocalityTree::from_nodes(&[node("Brazil", None)]);
        assert!(tree.subtree_ids(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        let mut a = node("A", None);
        let b = node("B", Some(a.id));
        a.parent_id = Some(b.id);

        let tree = LocalityTree::from_nodes(&[a.clone(), b.clone()]);
        assert_eq!(tree.subtree_ids(a.id), vec![a.id, b.id]);
    }
}
