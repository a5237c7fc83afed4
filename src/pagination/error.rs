//! Pagination-specific error types.

/// Errors that can occur while changing pagination settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaginationError {
    /// Page size outside the offered options
    #[error("Unsupported page size {0}")]
    UnsupportedPageSize(usize),

    /// Keyset limit outside the offered options
    #[error("Unsupported keyset limit {0}")]
    UnsupportedLimit(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_error_display() {
        let error = PaginationError::UnsupportedPageSize(15);
        assert!(error.to_string().contains("page size"));
        assert!(error.to_string().contains("15"));

        let error = PaginationError::UnsupportedLimit(25);
        assert!(error.to_string().contains("keyset limit"));
        assert!(error.to_string().contains("25"));
    }
}
