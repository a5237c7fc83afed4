//! Application-wide error types.
//!
//! This module defines the top-level error type that the module-specific
//! errors convert into.

pub use crate::api::ApiError;
pub use crate::config::ConfigError;
pub use crate::pagination::PaginationError;
pub use crate::state::StateError;
pub use crate::tree::TreeError;

/// Main application error type.
///
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API errors
    #[error("Backend API error: {0}")]
    Api(#[from] ApiError),

    /// State management errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Tree errors
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Pagination errors
    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
