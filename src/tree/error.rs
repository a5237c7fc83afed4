//! Tree-specific error types.

/// Errors that can occur while operating on the node store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// Node is not in the store
    #[error("Tree node not found: {id}")]
    NodeNotFound { id: String },

    /// Children arrived for a node that was not waiting for them
    #[error("Tree node is not loading: {id}")]
    NotLoading { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_display() {
        let error = TreeError::NodeNotFound {
            id: "dep-1".to_string(),
        };
        assert!(error.to_string().contains("not found"));
        assert!(error.to_string().contains("dep-1"));

        let error = TreeError::NotLoading {
            id: "dep-2".to_string(),
        };
        assert!(error.to_string().contains("not loading"));
    }
}
