//! Error types for gdsearch.

use thiserror::Error;

/// Common error type for gdsearch.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The auth collaborator could not produce an access token.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The Drive list call failed.
    ///
    /// Carries the message reported by the API when one is available.
    #[error("drive API error: {0}")]
    Api(String),

    /// Validation error for caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// The bare message without the kind prefix.
    ///
    /// Chat frontends show this text to the user as-is.
    pub fn message(&self) -> String {
        match self {
            SearchError::Auth(msg)
            | SearchError::Api(msg)
            | SearchError::Validation(msg)
            | SearchError::Config(msg) => msg.clone(),
            SearchError::Io(e) => e.to_string(),
        }
    }
}

/// Result type alias for gdsearch operations.
pub type Result<T> = std::result::Result<T, SearchError>;
