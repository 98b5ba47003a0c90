//! Error classification shared across domains

use serde::Serialize;
use std::fmt;

/// Broad category of a failed operation
///
/// Every domain error reports one of these so the API layer can pick a
/// response status without knowing each domain's variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or incomplete request payload
    Input,
    /// A referenced record does not exist
    NotFound,
    /// A state-machine or business-rule precondition was violated
    Validation,
    /// The write collides with an existing record
    Conflict,
    /// The underlying store failed
    Store,
}

impl ErrorKind {
    /// Returns the snake_case label used in error responses
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Input => "input_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation_error",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Store => "store_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
