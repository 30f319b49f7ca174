//! Error types for YesPlan API operations.

use thiserror::Error;

/// Errors that can occur during YesPlan API operations.
#[derive(Debug, Error)]
pub enum YesplanError {
    /// Configuration is missing or incomplete.
    #[error("YesPlan configuration required: {0}")]
    ConfigMissing(String),

    /// Endpoint name cannot be used as a path segment.
    #[error("Invalid endpoint '{0}': expected a collection name like 'events'")]
    InvalidEndpoint(String),

    /// The API rejected the credential (HTTP 401).
    #[error("Authentication failed: {body}")]
    Unauthorized { body: String },

    /// The endpoint does not exist (HTTP 404).
    #[error("Endpoint not found: {endpoint}")]
    NotFound { endpoint: String },

    /// API request failed with some other status.
    #[error("YesPlan API error {status_code}: {message}")]
    ApiError { message: String, status_code: u16 },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Filesystem error while persisting results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for YesPlan operations.
pub type Result<T> = core::result::Result<T, YesplanError>;
