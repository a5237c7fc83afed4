//! Lazy-loading tree with checkbox selection.
//!
//! A node's children are fetched the first time it is expanded, through a
//! [`ChildLoader`]. The tree keeps its own checked flags so it can draw
//! checkboxes, but reports every change as a [`SelectionChange`] for the
//! owning feature to apply to its [`SelectionSet`]. There is no partial
//! reset: replace the whole `LazyTree` to start over.

mod error;
mod node;
mod selection;
mod store;

pub use error::TreeError;
pub use node::{Children, NodeData, NodeId, NodeKind, TreeNode};
pub use selection::{CascadePolicy, SelectionChange, SelectionSet};
pub use store::{LoadGate, NodeStore, VisibleRow};

use crate::api::ApiError;
use log::*;
use std::collections::HashSet;
use std::future::Future;

/// Fetches the children of a node from wherever the hierarchy lives.
///
pub trait ChildLoader {
    fn load_children(
        &self,
        parent: &TreeNode,
    ) -> impl Future<Output = Result<Vec<NodeData>, ApiError>> + Send;
}

/// Outcome of an expand request.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Expanded,
    Collapsed,
    /// Children must be fetched; the caller starts exactly one load.
    LoadRequested,
    /// A load is already in flight for this node.
    Pending,
    Leaf,
}

#[derive(Debug, Clone)]
pub struct LazyTree {
    store: NodeStore,
    checked: HashSet<NodeId>,
    cascade: CascadePolicy,
    cursor: usize,
}

impl LazyTree {
    pub fn new(
        data: Vec<NodeData>,
        default_checked_ids: impl IntoIterator<Item = NodeId>,
        cascade: CascadePolicy,
    ) -> Self {
        LazyTree {
            store: NodeStore::from_forest(data),
            checked: default_checked_ids.into_iter().collect(),
            cascade,
            cursor: 0,
        }
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.store.get(id)
    }

    pub fn cascade(&self) -> CascadePolicy {
        self.cascade
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.store.visible_rows()
    }

    /// Expand or collapse a node. An unloaded node is marked loading and
    /// expanded, and `LoadRequested` is returned once; further calls return
    /// `Pending` until [`LazyTree::complete_load`] runs.
    ///
    pub fn expand(&mut self, id: &str) -> Result<Expansion, TreeError> {
        let node = self.store.get(id).ok_or_else(|| TreeError::NodeNotFound {
            id: id.to_owned(),
        })?;
        if node.is_leaf() {
            return Ok(Expansion::Leaf);
        }

        match self.store.begin_load(id)? {
            LoadGate::AlreadyLoading => Ok(Expansion::Pending),
            LoadGate::Start => {
                debug!("Requesting children for tree node '{}'...", id);
                self.store.get_mut(id)?.expanded = true;
                Ok(Expansion::LoadRequested)
            }
            LoadGate::AlreadyLoaded => {
                let node = self.store.get_mut(id)?;
                node.expanded = !node.expanded;
                if node.expanded {
                    Ok(Expansion::Expanded)
                } else {
                    self.clamp_cursor();
                    Ok(Expansion::Collapsed)
                }
            }
        }
    }

    /// Merge the outcome of a child load. A failure leaves the node collapsed
    /// and retryable. Returns the selection changes caused by inheriting a
    /// checked parent's state.
    ///
    pub fn complete_load(
        &mut self,
        id: &str,
        result: Result<Vec<NodeData>, ApiError>,
    ) -> Vec<SelectionChange> {
        match result {
            Ok(children) => match self.store.merge_children(id, children) {
                Ok(added) => {
                    debug!("Merged {} children under tree node '{}'.", added.len(), id);
                    if self.cascade == CascadePolicy::InheritOnLoad && self.is_checked(id) {
                        return self.set_checked_all(added, true);
                    }
                    vec![]
                }
                Err(e) => {
                    warn!("Dropping children for tree node '{}': {}", id, e);
                    vec![]
                }
            },
            Err(e) => {
                debug!("Failed to load children for tree node '{}': {}", id, e);
                if let Err(e) = self.store.fail_load(id) {
                    warn!("Cannot reset tree node '{}': {}", id, e);
                }
                self.clamp_cursor();
                vec![]
            }
        }
    }

    /// Expand a node and, if needed, load its children with `loader`.
    ///
    pub async fn expand_with<L: ChildLoader>(
        &mut self,
        id: &str,
        loader: &L,
    ) -> Result<(Expansion, Vec<SelectionChange>), TreeError> {
        let expansion = self.expand(id)?;
        if expansion != Expansion::LoadRequested {
            return Ok((expansion, vec![]));
        }
        let node = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| TreeError::NodeNotFound { id: id.to_owned() })?;
        let result = loader.load_children(&node).await;
        Ok((expansion, self.complete_load(id, result)))
    }

    /// Flip a node's checked state. The first change always names the node
    /// itself; cascading policies append changes for loaded descendants whose
    /// state actually flips.
    ///
    pub fn toggle_check(&mut self, id: &str) -> Result<Vec<SelectionChange>, TreeError> {
        if self.store.get(id).is_none() {
            return Err(TreeError::NodeNotFound { id: id.to_owned() });
        }
        let checked = !self.is_checked(id);
        self.set_checked(id, checked);
        let mut changes = vec![SelectionChange {
            id: id.to_owned(),
            checked,
        }];
        if self.cascade.cascades() {
            let descendants = self.store.loaded_descendants(id);
            changes.extend(self.set_checked_all(descendants, checked));
        }
        Ok(changes)
    }

    fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        if checked {
            self.checked.insert(id.to_owned())
        } else {
            self.checked.remove(id)
        }
    }

    fn set_checked_all(&mut self, ids: Vec<NodeId>, checked: bool) -> Vec<SelectionChange> {
        ids.into_iter()
            .filter(|id| self.set_checked(id, checked))
            .map(|id| SelectionChange { id, checked })
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// ID of the row under the cursor.
    ///
    pub fn selected_id(&self) -> Option<NodeId> {
        self.visible_rows().get(self.cursor).map(|row| row.id.clone())
    }

    pub fn cursor_down(&mut self) {
        let rows = self.visible_rows().len();
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let rows = self.visible_rows().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }
}
