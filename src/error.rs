//! Error handling for the Quill API
//!
//! A single `thiserror`-derived hierarchy used across repositories and
//! resolvers. GraphQL resolvers propagate `ApiError` with `?`; the display
//! form becomes the error message in the response envelope, so storage
//! failures surface as field errors (with null propagation handled by the
//! executor) while sibling fields still resolve.

use thiserror::Error;

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Request validation failed
    #[error("validation error: {0}")]
    Validation(String),

    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
