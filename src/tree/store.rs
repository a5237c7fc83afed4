//! Node store owned by one tree. Only the load steps below mutate its shape.

use super::node::{Children, NodeData, NodeId, TreeNode};
use super::TreeError;
use std::collections::{HashMap, HashSet};

/// Result of asking to start loading a node's children.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadGate {
    Start,
    AlreadyLoading,
    AlreadyLoaded,
}

/// Row of the flattened, currently visible tree.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: HashMap<NodeId, TreeNode>,
    roots: Vec<NodeId>,
}

impl NodeStore {
    /// Build a store from already-loaded top-level nodes.
    ///
    pub fn from_forest(data: Vec<NodeData>) -> Self {
        let mut store = NodeStore::default();
        for node in data {
            let id = node.id.clone();
            if store.insert(node, None) {
                store.roots.push(id);
            }
        }
        store
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(super) fn get_mut(&mut self, id: &str) -> Result<&mut TreeNode, TreeError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound { id: id.to_owned() })
    }

    /// Insert a node, returning false if the ID was already present.
    /// `parent` records where the node was first seen.
    ///
    fn insert(&mut self, data: NodeData, parent: Option<NodeId>) -> bool {
        if self.nodes.contains_key(&data.id) {
            log::warn!("Ignoring duplicate tree node '{}'.", data.id);
            return false;
        }
        self.nodes
            .insert(data.id.clone(), TreeNode::from_data(data, parent));
        true
    }

    /// Mark a node as loading unless a load is in flight or done.
    ///
    pub fn begin_load(&mut self, id: &str) -> Result<LoadGate, TreeError> {
        let node = self.get_mut(id)?;
        if node.is_loaded() {
            return Ok(LoadGate::AlreadyLoaded);
        }
        if node.loading {
            return Ok(LoadGate::AlreadyLoading);
        }
        node.loading = true;
        Ok(LoadGate::Start)
    }

    /// Attach fetched children to a loading node. Returns the IDs now listed
    /// under it.
    ///
    /// IDs name one unit across the whole hierarchy. A child that is already
    /// known (a user on two teams) is linked under this node as well and
    /// shares its loaded, expanded and checked state with the other listing.
    /// Children that would make the node its own descendant are skipped.
    ///
    pub fn merge_children(
        &mut self,
        id: &str,
        children: Vec<NodeData>,
    ) -> Result<Vec<NodeId>, TreeError> {
        if !self.get(id).map(|n| n.loading).unwrap_or(false) {
            return match self.get(id) {
                Some(_) => Err(TreeError::NotLoading { id: id.to_owned() }),
                None => Err(TreeError::NodeNotFound { id: id.to_owned() }),
            };
        }

        let mut added: Vec<NodeId> = Vec::with_capacity(children.len());
        for child in children {
            let child_id = child.id.clone();
            if added.contains(&child_id) {
                log::warn!("Ignoring repeated child '{}' under '{}'.", child_id, id);
                continue;
            }
            if self.nodes.contains_key(&child_id) {
                if child_id == id || self.loaded_descendants(&child_id).iter().any(|d| d == id) {
                    log::warn!("Ignoring child '{}' of '{}': it would nest inside itself.", child_id, id);
                    continue;
                }
                log::debug!("Linking known node '{}' under '{}'.", child_id, id);
            } else {
                self.insert(child, Some(id.to_owned()));
            }
            added.push(child_id);
        }

        let node = self.get_mut(id)?;
        node.loading = false;
        node.children = Children::Loaded(added.clone());
        Ok(added)
    }

    /// Leave a node retryable after a failed load.
    ///
    pub fn fail_load(&mut self, id: &str) -> Result<(), TreeError> {
        let node = self.get_mut(id)?;
        node.loading = false;
        node.expanded = false;
        node.children = Children::NotLoaded;
        Ok(())
    }

    /// All loaded descendants of a node, depth first, each listed once.
    ///
    pub fn loaded_descendants(&self, id: &str) -> Vec<NodeId> {
        let mut found = vec![];
        let mut seen = HashSet::new();
        let mut stack: Vec<&NodeId> = self
            .get(id)
            .map(|n| n.child_ids().iter().rev().collect())
            .unwrap_or_default();
        while let Some(child_id) = stack.pop() {
            if !seen.insert(child_id) {
                continue;
            }
            found.push(child_id.clone());
            if let Some(child) = self.get(child_id) {
                stack.extend(child.child_ids().iter().rev());
            }
        }
        found
    }

    /// Flatten the tree into the rows currently shown: roots, plus the
    /// children of every expanded and loaded node.
    ///
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = vec![];
        let mut stack: Vec<(&NodeId, usize)> = self.roots.iter().rev().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            rows.push(VisibleRow {
                id: id.clone(),
                depth,
            });
            if node.expanded {
                stack.extend(node.child_ids().iter().rev().map(|c| (c, depth + 1)));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn forest() -> NodeStore {
        NodeStore::from_forest(vec![
            NodeData::new("d1", "Finance", NodeKind::Department),
            NodeData::new("d2", "Operations", NodeKind::Department),
        ])
    }

    #[test]
    fn test_begin_load_gates_duplicates() {
        let mut store = forest();
        assert_eq!(store.begin_load("d1"), Ok(LoadGate::Start));
        assert_eq!(store.begin_load("d1"), Ok(LoadGate::AlreadyLoading));
        store
            .merge_children("d1", vec![NodeData::new("t1", "Payroll", NodeKind::Team)])
            .unwrap();
        assert_eq!(store.begin_load("d1"), Ok(LoadGate::AlreadyLoaded));
    }

    #[test]
    fn test_begin_load_unknown_node() {
        let mut store = forest();
        assert_eq!(
            store.begin_load("nope"),
            Err(TreeError::NodeNotFound {
                id: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_merge_requires_loading() {
        let mut store = forest();
        assert_eq!(
            store.merge_children("d1", vec![]),
            Err(TreeError::NotLoading {
                id: "d1".to_string()
            })
        );
    }

    #[test]
    fn test_merge_sets_parent_and_skips_repeats() {
        let mut store = forest();
        store.begin_load("d1").unwrap();
        let added = store
            .merge_children(
                "d1",
                vec![
                    NodeData::new("t1", "Payroll", NodeKind::Team),
                    NodeData::new("t1", "Payroll", NodeKind::Team),
                ],
            )
            .unwrap();
        assert_eq!(added, vec!["t1".to_string()]);
        assert_eq!(store.get("t1").unwrap().parent.as_deref(), Some("d1"));
        assert!(!store.get("d1").unwrap().loading);
    }

    #[test]
    fn test_member_of_two_teams_is_listed_under_both() {
        let mut store = forest();
        store.begin_load("d1").unwrap();
        store
            .merge_children(
                "d1",
                vec![
                    NodeData::new("t1", "Payroll", NodeKind::Team),
                    NodeData::new("t2", "Audit", NodeKind::Team),
                ],
            )
            .unwrap();
        for team in ["t1", "t2"] {
            store.begin_load(team).unwrap();
            let added = store
                .merge_children(team, vec![NodeData::new("u1", "Ada", NodeKind::User)])
                .unwrap();
            assert_eq!(added, vec!["u1".to_string()]);
        }

        assert_eq!(store.get("t2").unwrap().child_ids(), &["u1".to_string()]);
        assert_eq!(store.get("u1").unwrap().parent.as_deref(), Some("t1"));
        assert_eq!(store.loaded_descendants("d1"), vec!["t1", "u1", "t2"]);

        store.get_mut("d1").unwrap().expanded = true;
        store.get_mut("t2").unwrap().expanded = true;
        let ids: Vec<NodeId> = store.visible_rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["d1", "t1", "t2", "u1", "d2"]);
    }

    #[test]
    fn test_merge_refuses_ancestor_as_child() {
        let mut store = forest();
        store.begin_load("d1").unwrap();
        store
            .merge_children("d1", vec![NodeData::new("t1", "Payroll", NodeKind::Team)])
            .unwrap();
        store.begin_load("t1").unwrap();
        let added = store
            .merge_children(
                "t1",
                vec![
                    NodeData::new("d1", "Finance", NodeKind::Department),
                    NodeData::new("d2", "Operations", NodeKind::Department),
                ],
            )
            .unwrap();
        assert_eq!(added, vec!["d2".to_string()]);
    }

    #[test]
    fn test_fail_load_leaves_node_retryable() {
        let mut store = forest();
        store.begin_load("d1").unwrap();
        store.fail_load("d1").unwrap();
        let node = store.get("d1").unwrap();
        assert!(!node.loading);
        assert!(!node.is_loaded());
        assert_eq!(store.begin_load("d1"), Ok(LoadGate::Start));
    }

    #[test]
    fn test_visible_rows_and_descendants() {
        let mut store = forest();
        store.begin_load("d1").unwrap();
        store
            .merge_children(
                "d1",
                vec![
                    NodeData::new("t1", "Payroll", NodeKind::Team),
                    NodeData::new("t2", "Audit", NodeKind::Team),
                ],
            )
            .unwrap();
        store.begin_load("t1").unwrap();
        store
            .merge_children("t1", vec![NodeData::new("u1", "Ada", NodeKind::User)])
            .unwrap();

        let ids = |rows: Vec<VisibleRow>| rows.into_iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(store.visible_rows()), vec!["d1", "d2"]);

        store.get_mut("d1").unwrap().expanded = true;
        let rows = store.visible_rows();
        assert_eq!(ids(rows.clone()), vec!["d1", "t1", "t2", "d2"]);
        assert_eq!(rows[1].depth, 1);

        assert_eq!(store.loaded_descendants("d1"), vec!["t1", "u1", "t2"]);
        assert!(store.loaded_descendants("d2").is_empty());
    }
}
