//! Contract domain errors

use thiserror::Error;

use core_kernel::{ContractTypeId, ErrorKind, PortError};
use domain_party::UserError;

/// Errors that can occur in the contract domain
#[derive(Debug, Error)]
pub enum ContractError {
    /// A referenced contract or contract type does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Contract type is no longer sold
    #[error("Contract type {0} is not active")]
    InactiveContractType(ContractTypeId),

    /// Start/end dates violate the contract type's duration bounds
    #[error("Invalid contract term: {0}")]
    InvalidTerm(String),

    /// Request payload is missing required fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The write collides with an existing record
    #[error("Conflict: {0}")]
    Conflict(String),

    /// User provisioning failed
    #[error(transparent)]
    User(#[from] UserError),

    /// Store failure
    #[error("Store error: {0}")]
    Store(#[source] PortError),
}

impl ContractError {
    /// Classifies the error for response mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::NotFound(_) => ErrorKind::NotFound,
            ContractError::InactiveContractType(_) | ContractError::InvalidTerm(_) => {
                ErrorKind::Validation
            }
            ContractError::InvalidInput(_) => ErrorKind::Input,
            ContractError::Conflict(_) => ErrorKind::Conflict,
            ContractError::User(e) => e.kind(),
            ContractError::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<PortError> for ContractError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { entity_type, id } => {
                ContractError::NotFound(format!("{} {}", entity_type, id))
            }
            PortError::Conflict { message } => ContractError::Conflict(message),
            other => ContractError::Store(other),
        }
    }
}
