//! Assignment page: the org tree plus the selection it feeds.

use crate::tree::{CascadePolicy, LazyTree, NodeData, SelectionChange, SelectionSet};

/// Owns the authoritative selection for the org tree. The tree itself is
/// replaced wholesale (remounted) whenever its roots arrive or a save
/// succeeds; `mount` identifies the current instance so late child loads
/// for an older one can be recognised.
///
#[derive(Debug, Clone)]
pub struct AssignmentPage {
    tree: LazyTree,
    roots: Vec<NodeData>,
    selection: SelectionSet,
    cascade: CascadePolicy,
    mount: u64,
    saving: bool,
    loaded: bool,
}

impl AssignmentPage {
    pub fn new(cascade: CascadePolicy) -> Self {
        AssignmentPage {
            tree: LazyTree::new(vec![], vec![], cascade),
            roots: vec![],
            selection: SelectionSet::new(),
            cascade,
            mount: 0,
            saving: false,
            loaded: false,
        }
    }

    pub fn tree(&self) -> &LazyTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LazyTree {
        &mut self.tree
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn mount(&self) -> u64 {
        self.mount
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the tree with a fresh one over the stored roots, seeded with
    /// the current selection.
    ///
    pub fn remount(&mut self) {
        self.tree = LazyTree::new(self.roots.clone(), self.selection.to_vec(), self.cascade);
        self.mount += 1;
    }

    pub fn set_roots(&mut self, roots: Vec<NodeData>) {
        self.roots = roots;
        self.loaded = true;
        self.remount();
    }

    pub fn apply(&mut self, changes: &[SelectionChange]) {
        self.selection.apply(changes);
    }

    /// Begin a save, returning the IDs to submit. None while a save is
    /// already running.
    ///
    pub fn begin_save(&mut self) -> Option<Vec<String>> {
        if self.saving {
            return None;
        }
        self.saving = true;
        Some(self.selection.to_vec())
    }

    /// The backend accepted the selection: clear it and start over.
    ///
    pub fn save_succeeded(&mut self) {
        self.saving = false;
        self.selection.clear();
        self.remount();
    }

    /// The backend refused the selection; keep it for another attempt.
    ///
    pub fn save_failed(&mut self) {
        self.saving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn page() -> AssignmentPage {
        let mut page = AssignmentPage::new(CascadePolicy::Independent);
        page.set_roots(vec![
            NodeData::new("d1", "Finance", NodeKind::Department),
            NodeData::new("d2", "Operations", NodeKind::Department),
        ]);
        page
    }

    #[test]
    fn test_selection_follows_tree_changes() {
        let mut page = page();
        let changes = page.tree_mut().toggle_check("d2").unwrap();
        page.apply(&changes);
        assert!(page.selection().contains("d2"));
    }

    #[test]
    fn test_save_cycle() {
        let mut page = page();
        let changes = page.tree_mut().toggle_check("d1").unwrap();
        page.apply(&changes);
        let mount = page.mount();

        assert_eq!(page.begin_save(), Some(vec!["d1".to_string()]));
        assert_eq!(page.begin_save(), None);
        page.save_succeeded();

        assert!(page.selection().is_empty());
        assert!(!page.tree().is_checked("d1"));
        assert_eq!(page.mount(), mount + 1);
    }

    #[test]
    fn test_failed_save_keeps_selection() {
        let mut page = page();
        let changes = page.tree_mut().toggle_check("d1").unwrap();
        page.apply(&changes);
        page.begin_save();
        page.save_failed();
        assert!(page.selection().contains("d1"));
        assert!(!page.is_saving());
    }

    #[test]
    fn test_remount_keeps_selection_checked() {
        let mut page = page();
        let changes = page.tree_mut().toggle_check("d2").unwrap();
        page.apply(&changes);
        page.remount();
        assert!(page.tree().is_checked("d2"));
    }
}
