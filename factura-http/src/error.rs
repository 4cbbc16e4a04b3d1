//! Error types for the wire layer.

use thiserror::Error;

/// Result type for wire operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors that can occur while talking to the API.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or TLS failure below the HTTP layer.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a status outside the declared set.
    #[error("api error (status {status}): {description}")]
    Api { status: u16, description: String },

    /// A wire value failed to parse.
    #[error("malformed {what}: {value:?}")]
    Parse { what: &'static str, value: String },

    /// A header the protocol requires was absent from a response.
    #[error("missing {0} header")]
    MissingHeader(&'static str),
}
