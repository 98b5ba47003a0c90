//! Contracts and insured items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ContractId, ContractTypeId};

/// The insured article, embedded in a contract and copied into repair orders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub description: String,
    pub serial_no: String,
}

/// A sold insurance contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub uuid: ContractId,
    /// Holder of the contract
    pub username: String,
    pub item: Item,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Terminated contracts accept no new claims
    pub void: bool,
    pub contract_type_uuid: ContractTypeId,
    /// Cached ids of the claims filed against this contract
    #[serde(default)]
    pub claim_index: Vec<ClaimId>,
}

impl Contract {
    /// Term length in whole days
    pub fn term_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Appends a claim id to the cached index, ignoring duplicates
    pub fn record_claim(&mut self, claim_id: ClaimId) {
        if !self.claim_index.contains(&claim_id) {
            self.claim_index.push(claim_id);
        }
    }

    /// Marks the contract as terminated
    pub fn mark_void(&mut self) {
        self.void = true;
    }
}

/// Filter for listing contracts
#[derive(Debug, Clone, Default)]
pub struct ContractQuery {
    pub username: Option<String>,
}

impl ContractQuery {
    /// Contracts held by one user
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    /// Returns true if the contract passes this filter
    pub fn matches(&self, contract: &Contract) -> bool {
        self.username
            .as_deref()
            .map_or(true, |username| contract.username == username)
    }
}

/// Request to sell a contract
#[derive(Debug, Clone)]
pub struct NewContract {
    /// Generated when absent
    pub uuid: Option<ContractId>,
    pub contract_type_uuid: ContractTypeId,
    pub username: String,
    /// Only used when the user does not exist yet
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub item: Item,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn contract() -> Contract {
        let start = Utc::now();
        Contract {
            uuid: ContractId::new(),
            username: "jdoe".to_string(),
            item: Item::default(),
            start_date: start,
            end_date: start + Duration::days(90),
            void: false,
            contract_type_uuid: ContractTypeId::new(),
            claim_index: vec![],
        }
    }

    #[test]
    fn test_term_days() {
        assert_eq!(contract().term_days(), 90);
    }

    #[test]
    fn test_record_claim_is_idempotent() {
        let mut c = contract();
        let id = ClaimId::new();
        c.record_claim(id);
        c.record_claim(id);
        assert_eq!(c.claim_index, vec![id]);
    }

    #[test]
    fn test_query_by_username() {
        let c = contract();
        assert!(ContractQuery::default().matches(&c));
        assert!(ContractQuery::by_username("jdoe").matches(&c));
        assert!(!ContractQuery::by_username("other").matches(&c));
    }

    #[test]
    fn test_claim_index_defaults_when_absent() {
        let mut json = serde_json::to_value(contract()).unwrap();
        json.as_object_mut().unwrap().remove("claim_index");
        let parsed: Contract = serde_json::from_value(json).unwrap();
        assert!(parsed.claim_index.is_empty());
    }
}
