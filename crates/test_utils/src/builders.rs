//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.
//!
//! Usernames default to random values from `fake` so that tests sharing a
//! database do not collide.

use chrono::{DateTime, Duration, Utc};
use core_kernel::{ClaimId, ContractId, ContractTypeId};
use domain_claims::{Claim, ClaimStatus, FileClaim};
use domain_contract::{Contract, ContractType, Item, NewContract};
use fake::faker::internet::en::Username;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;

use crate::fixtures::{EntityFixtures, StringFixtures, TemporalFixtures};

/// Returns a random username with a numeric suffix
pub fn unique_username() -> String {
    let name: String = Username().fake();
    let suffix: u32 = (1000..1_000_000).fake();
    format!("{}{}", name.to_lowercase(), suffix)
}

/// Builder for contract types
pub struct ContractTypeBuilder {
    contract_type: ContractType,
}

impl Default for ContractTypeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractTypeBuilder {
    /// Starts from the standard contract type with a fresh ID
    pub fn new() -> Self {
        Self {
            contract_type: ContractType {
                uuid: ContractTypeId::new(),
                ..EntityFixtures::contract_type()
            },
        }
    }

    /// Sets the shop type
    pub fn with_shop_type(mut self, shop_type: impl Into<String>) -> Self {
        self.contract_type.shop_type = shop_type.into();
        self
    }

    /// Sets whether new contracts may use the type
    pub fn active(mut self, active: bool) -> Self {
        self.contract_type.active = active;
        self
    }

    /// Sets the accepted term bounds in days
    pub fn with_term_days(mut self, min: i32, max: i32) -> Self {
        self.contract_type.min_duration_days = min;
        self.contract_type.max_duration_days = max;
        self
    }

    /// Builds the contract type
    pub fn build(self) -> ContractType {
        self.contract_type
    }
}

/// Builder for contract creation requests
pub struct NewContractBuilder {
    contract_type_uuid: ContractTypeId,
    uuid: Option<ContractId>,
    username: String,
    password: Option<String>,
    first_name: String,
    last_name: String,
    item: Item,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl NewContractBuilder {
    /// Creates a request for a one-year contract of the given type
    pub fn new(contract_type_uuid: ContractTypeId) -> Self {
        Self {
            contract_type_uuid,
            uuid: None,
            username: unique_username(),
            password: Some(StringFixtures::password().to_string()),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            item: EntityFixtures::item(),
            start_date: TemporalFixtures::contract_start(),
            end_date: TemporalFixtures::contract_end(),
        }
    }

    /// Sets a caller-chosen contract ID
    pub fn with_uuid(mut self, uuid: ContractId) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// Sets the holder's username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the holder's password; `None` provisions without one
    pub fn with_password(mut self, password: Option<&str>) -> Self {
        self.password = password.map(str::to_string);
        self
    }

    /// Sets the holder's names
    pub fn with_names(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Sets the term to `days` days from the standard start
    pub fn with_term_days(mut self, days: i64) -> Self {
        self.end_date = self.start_date + Duration::days(days);
        self
    }

    /// Builds the request
    pub fn build(self) -> NewContract {
        NewContract {
            uuid: self.uuid,
            contract_type_uuid: self.contract_type_uuid,
            username: self.username,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            item: self.item,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Builder for stored contracts, bypassing the contract service
pub struct ContractBuilder {
    contract: Contract,
}

impl ContractBuilder {
    /// Creates a live one-year contract of the given type held by `username`
    pub fn new(contract_type_uuid: ContractTypeId, username: impl Into<String>) -> Self {
        Self {
            contract: Contract {
                uuid: ContractId::new(),
                username: username.into(),
                item: EntityFixtures::item(),
                start_date: TemporalFixtures::contract_start(),
                end_date: TemporalFixtures::contract_end(),
                void: false,
                contract_type_uuid,
                claim_index: Vec::new(),
            },
        }
    }

    /// Marks the contract void
    pub fn void(mut self) -> Self {
        self.contract.void = true;
        self
    }

    /// Replaces the insured item
    pub fn with_item(mut self, item: Item) -> Self {
        self.contract.item = item;
        self
    }

    /// Builds the contract
    pub fn build(self) -> Contract {
        self.contract
    }
}

/// Builder for claims and claim filing requests
pub struct ClaimBuilder {
    uuid: ClaimId,
    contract_uuid: ContractId,
    date: DateTime<Utc>,
    description: String,
    is_theft: bool,
    status: ClaimStatus,
    reimbursable: Decimal,
}

impl ClaimBuilder {
    /// Creates a damage claim against the given contract
    pub fn new(contract_uuid: ContractId) -> Self {
        Self {
            uuid: ClaimId::new(),
            contract_uuid,
            date: TemporalFixtures::claim_date(),
            description: "Cracked frame after a fall".to_string(),
            is_theft: false,
            status: ClaimStatus::New,
            reimbursable: Decimal::ZERO,
        }
    }

    /// Sets the claim ID
    pub fn with_uuid(mut self, uuid: ClaimId) -> Self {
        self.uuid = uuid;
        self
    }

    /// Makes the claim a theft report
    pub fn theft(mut self) -> Self {
        self.is_theft = true;
        self.description = "Stolen from the station bike rack".to_string();
        self
    }

    /// Sets the date of damage
    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Sets the stored status
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the reimbursable amount
    pub fn with_reimbursable(mut self, amount: Decimal) -> Self {
        self.reimbursable = amount;
        self
    }

    /// Builds a filing request carrying the claim ID
    pub fn request(self) -> FileClaim {
        FileClaim {
            uuid: Some(self.uuid),
            contract_uuid: self.contract_uuid,
            date: self.date,
            description: self.description,
            is_theft: self.is_theft,
        }
    }

    /// Builds a stored claim
    pub fn build(self) -> Claim {
        let mut claim = Claim::file(
            self.uuid,
            self.contract_uuid,
            self.date,
            self.description,
            self.is_theft,
        );
        claim.status = self.status;
        claim.reimbursable = self.reimbursable;
        claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_usernames_differ() {
        let a = unique_username();
        let b = unique_username();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_contract_builder_term() {
        let request = NewContractBuilder::new(ContractTypeId::new())
            .with_term_days(90)
            .build();
        assert_eq!((request.end_date - request.start_date).num_days(), 90);
        assert!(request.password.is_some());
    }

    #[test]
    fn test_claim_builder_theft() {
        let claim = ClaimBuilder::new(ContractId::new()).theft().build();
        assert!(claim.is_theft);
        assert!(claim.awaits_theft_review());
    }
}
