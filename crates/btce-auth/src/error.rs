//! Error types for authentication operations

/// Errors that can occur while building credentials
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
