//! Selection changes emitted by the tree and the set its owner keeps.

use super::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How checking a node affects its descendants.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Only the toggled node changes.
    #[default]
    Independent,
    /// The toggled state is copied to every descendant already loaded.
    LoadedDescendants,
    /// As `LoadedDescendants`, and children loaded later under a checked
    /// parent arrive checked.
    InheritOnLoad,
}

impl CascadePolicy {
    pub fn cascades(&self) -> bool {
        !matches!(self, CascadePolicy::Independent)
    }
}

/// One node's new checked state.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub id: NodeId,
    pub checked: bool,
}

/// Selected node IDs, kept by the feature that owns the tree. May name nodes
/// that are not loaded at the moment.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<NodeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = NodeId>) -> Self {
        SelectionSet {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn apply(&mut self, changes: &[SelectionChange]) {
        for change in changes {
            if change.checked {
                self.ids.insert(change.id.clone());
            } else {
                self.ids.remove(&change.id);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// IDs in ascending order, as submitted on save.
    ///
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.ids.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes() {
        let mut set = SelectionSet::from_ids(vec!["b".to_string()]);
        set.apply(&[
            SelectionChange {
                id: "a".to_string(),
                checked: true,
            },
            SelectionChange {
                id: "b".to_string(),
                checked: false,
            },
            SelectionChange {
                id: "c".to_string(),
                checked: false,
            },
        ]);
        assert_eq!(set.to_vec(), vec!["a".to_string()]);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_cascade_policy_from_yaml() {
        let policy: CascadePolicy = serde_yaml::from_str("inherit_on_load").unwrap();
        assert_eq!(policy, CascadePolicy::InheritOnLoad);
        assert!(policy.cascades());
        assert!(!CascadePolicy::default().cascades());
    }
}
