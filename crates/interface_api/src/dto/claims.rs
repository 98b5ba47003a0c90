//! Claim, theft review and repair order DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::{ClaimId, ContractId};
use domain_claims::{ClaimQuery, ClaimStatus, FileClaim, ProcessClaim, TheftReview};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListClaimsRequest {
    /// Status code filter; an unknown code lists everything
    pub status: Option<ClaimStatus>,
}

impl From<ListClaimsRequest> for ClaimQuery {
    fn from(request: ListClaimsRequest) -> Self {
        request
            .status
            .map(ClaimQuery::with_status)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FileClaimRequest {
    pub uuid: Option<ClaimId>,
    pub contract_uuid: ContractId,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_theft: bool,
}

impl From<FileClaimRequest> for FileClaim {
    fn from(request: FileClaimRequest) -> Self {
        FileClaim {
            uuid: request.uuid,
            contract_uuid: request.contract_uuid,
            date: request.date,
            description: request.description,
            is_theft: request.is_theft,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessClaimRequest {
    pub uuid: ClaimId,
    pub contract_uuid: ContractId,
    pub status: ClaimStatus,
    #[serde(default)]
    pub reimbursable: Decimal,
}

impl From<ProcessClaimRequest> for ProcessClaim {
    fn from(request: ProcessClaimRequest) -> Self {
        ProcessClaim {
            uuid: request.uuid,
            contract_uuid: request.contract_uuid,
            status: request.status,
            reimbursable: request.reimbursable,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessTheftClaimRequest {
    pub uuid: ClaimId,
    pub contract_uuid: ContractId,
    /// Verdict of the authorities; older clients send it as `is_theft`
    #[serde(alias = "is_theft")]
    pub confirmed: bool,
    pub file_reference: Option<String>,
}

impl From<ProcessTheftClaimRequest> for TheftReview {
    fn from(request: ProcessTheftClaimRequest) -> Self {
        TheftReview {
            uuid: request.uuid,
            contract_uuid: request.contract_uuid,
            confirmed: request.confirmed,
            file_reference: request.file_reference,
        }
    }
}

/// Body naming a repair order by its claim ID
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteRepairOrderRequest {
    pub uuid: ClaimId,
}
