//! Party domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum UserError {
    /// User with the given username was not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Request payload is missing required fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Hashing the credential failed
    #[error("Failed to hash password: {0}")]
    Credential(String),

    /// The write collides with an existing user
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store failure
    #[error("Store error: {0}")]
    Store(#[source] PortError),
}

impl UserError {
    /// Creates an InvalidInput error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        UserError::InvalidInput(message.into())
    }

    /// Classifies the error for response mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::UserNotFound(_) => ErrorKind::NotFound,
            UserError::InvalidInput(_) => ErrorKind::Input,
            UserError::Conflict(_) => ErrorKind::Conflict,
            UserError::Credential(_) | UserError::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<PortError> for UserError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { id, .. } => UserError::UserNotFound(id),
            PortError::Conflict { message } => UserError::Conflict(message),
            other => UserError::Store(other),
        }
    }
}
