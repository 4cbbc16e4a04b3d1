//! Error types for the access layer.

use factura_http::HttpError;
use thiserror::Error;

/// Result type for access-layer operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur while operating on remote resources.
///
/// Concurrency conflicts are not an error: conditional writes report them
/// as a [`crate::WriteOutcome::Conflict`] value with an explicit
/// resolution path.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was deleted; no further operations are possible.
    #[error("resource has been deleted")]
    Deleted,

    /// Transport-level or undeclared-status failure, propagated unchanged.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A declared status the operation has no defined handling for.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// Caller-supplied input was rejected before any request was built.
    #[error("invalid input: {0}")]
    Validation(String),
}
