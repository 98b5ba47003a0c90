//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ContractId, ErrorKind, PortError};

use crate::status::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// A referenced claim, contract, repair order or user does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Theft must be confirmed by the authorities first")]
    TheftNotConfirmed,

    #[error("Claim has already been processed (status {0})")]
    AlreadyProcessed(ClaimStatus),

    #[error("Stolen items cannot be repaired")]
    StolenItemRepair,

    #[error("Unknown status change to {0}")]
    UnknownStatusChange(ClaimStatus),

    #[error("Reimbursable amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Contract {0} is void")]
    ContractVoid(ContractId),

    /// Theft review requested for a claim that is not a new theft claim
    #[error("Claim is not a theft claim awaiting review")]
    NotUnderTheftReview,

    /// The write collides with an existing record
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store failure
    #[error("Store error: {0}")]
    Store(#[source] PortError),
}

impl ClaimError {
    /// Classifies the error for response mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::NotFound(_) => ErrorKind::NotFound,
            ClaimError::Conflict(_) => ErrorKind::Conflict,
            ClaimError::Store(_) => ErrorKind::Store,
            ClaimError::TheftNotConfirmed
            | ClaimError::AlreadyProcessed(_)
            | ClaimError::StolenItemRepair
            | ClaimError::UnknownStatusChange(_)
            | ClaimError::NegativeAmount(_)
            | ClaimError::ContractVoid(_)
            | ClaimError::NotUnderTheftReview => ErrorKind::Validation,
        }
    }
}

impl From<PortError> for ClaimError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { entity_type, id } => {
                ClaimError::NotFound(format!("{} {}", entity_type, id))
            }
            PortError::Conflict { message } => ClaimError::Conflict(message),
            other => ClaimError::Store(other),
        }
    }
}
