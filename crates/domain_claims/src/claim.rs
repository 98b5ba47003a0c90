//! Claim records and requests

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ContractId};
use domain_contract::Item;

use crate::status::ClaimStatus;

/// A claim against a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub uuid: ClaimId,
    pub contract_uuid: ContractId,
    /// Date of the incident
    pub date: DateTime<Utc>,
    pub description: String,
    pub is_theft: bool,
    pub status: ClaimStatus,
    /// Amount paid out; zero unless reimbursed
    pub reimbursable: Decimal,
    /// Set once the repair order for this claim is ready
    pub repaired: bool,
    /// Police file reference recorded during theft review
    pub file_reference: Option<String>,
}

impl Claim {
    /// Creates a claim in `New`
    pub fn file(
        uuid: ClaimId,
        contract_uuid: ContractId,
        date: DateTime<Utc>,
        description: impl Into<String>,
        is_theft: bool,
    ) -> Self {
        Self {
            uuid,
            contract_uuid,
            date,
            description: description.into(),
            is_theft,
            status: ClaimStatus::New,
            reimbursable: Decimal::ZERO,
            repaired: false,
            file_reference: None,
        }
    }

    /// True for a theft claim still waiting for the authorities
    pub fn awaits_theft_review(&self) -> bool {
        self.is_theft && self.status == ClaimStatus::New
    }
}

/// Filter for listing claims
#[derive(Debug, Clone, Default)]
pub struct ClaimQuery {
    pub status: Option<ClaimStatus>,
    pub is_theft: Option<bool>,
    pub contract_uuid: Option<ContractId>,
}

impl ClaimQuery {
    /// Claims in one status; `Unknown` means no status filter
    pub fn with_status(status: ClaimStatus) -> Self {
        Self {
            status: status.is_known().then_some(status),
            ..Default::default()
        }
    }

    /// Theft claims waiting for review
    pub fn pending_theft() -> Self {
        Self {
            status: Some(ClaimStatus::New),
            is_theft: Some(true),
            ..Default::default()
        }
    }

    /// Claims filed against one contract
    pub fn for_contract(contract_uuid: ContractId) -> Self {
        Self {
            contract_uuid: Some(contract_uuid),
            ..Default::default()
        }
    }

    /// Returns true if the claim passes this filter
    pub fn matches(&self, claim: &Claim) -> bool {
        self.status.map_or(true, |s| claim.status == s)
            && self.is_theft.map_or(true, |t| claim.is_theft == t)
            && self.contract_uuid.map_or(true, |c| claim.contract_uuid == c)
    }
}

/// Request to file a claim
#[derive(Debug, Clone)]
pub struct FileClaim {
    /// Generated when absent
    pub uuid: Option<ClaimId>,
    pub contract_uuid: ContractId,
    pub date: DateTime<Utc>,
    pub description: String,
    pub is_theft: bool,
}

/// Request to move a claim to repair, reimbursement or rejection
#[derive(Debug, Clone)]
pub struct ProcessClaim {
    pub uuid: ClaimId,
    pub contract_uuid: ContractId,
    pub status: ClaimStatus,
    /// Only used for reimbursement
    pub reimbursable: Decimal,
}

/// Outcome of a police review of a theft claim
#[derive(Debug, Clone)]
pub struct TheftReview {
    pub uuid: ClaimId,
    pub contract_uuid: ContractId,
    /// True when the theft is confirmed
    pub confirmed: bool,
    pub file_reference: Option<String>,
}

/// A theft claim as shown to reviewing officers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheftClaimView {
    pub uuid: ClaimId,
    pub contract_uuid: ContractId,
    pub item: Item,
    pub description: String,
    /// Display name of the contract holder
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(is_theft: bool, status: ClaimStatus) -> Claim {
        let mut claim = Claim::file(ClaimId::new(), ContractId::new(), Utc::now(), "", is_theft);
        claim.status = status;
        claim
    }

    #[test]
    fn test_file_starts_new() {
        let claim = Claim::file(ClaimId::new(), ContractId::new(), Utc::now(), "cracked", false);
        assert_eq!(claim.status, ClaimStatus::New);
        assert!(claim.reimbursable.is_zero());
        assert!(!claim.repaired);
        assert!(claim.file_reference.is_none());
    }

    #[test]
    fn test_unknown_status_means_no_filter() {
        let query = ClaimQuery::with_status(ClaimStatus::Unknown);
        assert!(query.matches(&claim(false, ClaimStatus::Repair)));
        assert!(query.matches(&claim(true, ClaimStatus::New)));
    }

    #[test]
    fn test_pending_theft_query() {
        let query = ClaimQuery::pending_theft();
        assert!(query.matches(&claim(true, ClaimStatus::New)));
        assert!(!query.matches(&claim(false, ClaimStatus::New)));
        assert!(!query.matches(&claim(true, ClaimStatus::TheftConfirmed)));
    }

    #[test]
    fn test_claim_json_field_names() {
        let json = serde_json::to_value(claim(true, ClaimStatus::TheftConfirmed)).unwrap();
        assert_eq!(json["status"], "P");
        assert_eq!(json["is_theft"], true);
        assert!(json.get("contract_uuid").is_some());
        assert!(json.get("file_reference").is_some());
    }
}
