use serde::{Deserialize, Serialize};

pub type NodeId = String;

/// Kind of organizational unit a node stands for.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Department,
    Team,
    User,
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Users never have children, so they are created already loaded.
    ///
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::User)
    }
}

/// Node as sent by the backend.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl NodeData {
    pub fn new(id: &str, label: &str, kind: NodeKind) -> Self {
        NodeData {
            id: id.to_owned(),
            label: label.to_owned(),
            kind,
        }
    }
}

/// Children of a node: either not fetched yet, or the ordered child IDs.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    NotLoaded,
    Loaded(Vec<NodeId>),
}

/// Node held by the tree's store.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Children,
    pub loading: bool,
    pub expanded: bool,
}

impl TreeNode {
    pub(super) fn from_data(data: NodeData, parent: Option<NodeId>) -> Self {
        let children = if data.kind.is_leaf() {
            Children::Loaded(vec![])
        } else {
            Children::NotLoaded
        };
        TreeNode {
            id: data.id,
            label: data.label,
            kind: data.kind,
            parent,
            children,
            loading: false,
            expanded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.children, Children::Loaded(_))
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    pub fn child_ids(&self) -> &[NodeId] {
        match &self.children {
            Children::Loaded(ids) => ids,
            Children::NotLoaded => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_data_from_json() {
        let data: Vec<NodeData> = serde_json::from_str(
            r#"[
                {"id": "d1", "label": "Finance", "type": "department"},
                {"id": "u1", "label": "Ada", "type": "user"},
                {"id": "x1", "label": "Board", "type": "committee"}
            ]"#,
        )
        .unwrap();
        assert_eq!(data[0].kind, NodeKind::Department);
        assert_eq!(data[1].kind, NodeKind::User);
        assert_eq!(data[2].kind, NodeKind::Other);
    }

    #[test]
    fn test_leaf_nodes_start_loaded() {
        let user = TreeNode::from_data(NodeData::new("u1", "Ada", NodeKind::User), None);
        assert!(user.is_loaded());
        assert!(user.child_ids().is_empty());

        let team = TreeNode::from_data(NodeData::new("t1", "Payroll", NodeKind::Team), None);
        assert!(!team.is_loaded());
    }
}
