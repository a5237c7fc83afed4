//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No row under the cursor
    #[error("No row selected")]
    NoRowSelected,

    /// Network thread is gone
    #[error("Network channel closed: {0}")]
    NetworkUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::NoRowSelected;
        assert!(error.to_string().contains("No row selected"));

        let error = StateError::NetworkUnavailable("receiver dropped".to_string());
        assert!(error.to_string().contains("Network channel closed"));
        assert!(error.to_string().contains("receiver dropped"));
    }
}
