//! Error types for REST API operations

use btce_auth::AuthError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (connection error or timeout); never retried
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP succeeded but the body is not a decodable JSON object
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The server returned a structured error, or a nonce mismatch
    /// persisted through the single allowed retry
    #[error("API error: {message}")]
    Remote {
        /// Error message from the server
        message: String,
        /// Full decoded response, for diagnostics
        response: serde_json::Value,
    },

    /// Invalid request parameters, rejected before any network call
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing API credentials for a private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential construction failed
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl RestError {
    /// Get the server's error message, if this is a remote error
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
