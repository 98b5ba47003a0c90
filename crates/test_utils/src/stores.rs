//! In-memory Stores
//!
//! Wires the mock ports of every domain together and builds the services on
//! top of them. The claims mock shares its contract table with the contract
//! mock, so filing a claim updates the contract seen by the contract service.

use std::sync::Arc;

use domain_claims::{ClaimService, MockClaimsPort};
use domain_contract::{Contract, ContractPort, ContractService, ContractType, MockContractPort};
use domain_party::{Argon2Hasher, MockUserPort, User, UserPort, UserService};

use crate::builders::ContractBuilder;
use crate::fixtures::{EntityFixtures, StringFixtures};

/// The mock ports of every domain
#[derive(Clone)]
pub struct MockStores {
    pub users: Arc<MockUserPort>,
    pub contracts: Arc<MockContractPort>,
    pub claims: Arc<MockClaimsPort>,
}

impl Default for MockStores {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStores {
    /// Creates empty stores
    pub fn new() -> Self {
        let contracts = Arc::new(MockContractPort::new());
        Self {
            users: Arc::new(MockUserPort::new()),
            claims: Arc::new(MockClaimsPort::new(contracts.clone())),
            contracts,
        }
    }

    /// Creates stores holding the standard contract type
    pub async fn seeded() -> Self {
        let stores = Self::new();
        stores.seed_contract_type(EntityFixtures::contract_type()).await;
        stores
    }

    /// Stores a contract type
    pub async fn seed_contract_type(&self, contract_type: ContractType) -> ContractType {
        self.contracts
            .save_contract_type(&contract_type)
            .await
            .expect("mock store accepts contract types");
        contract_type
    }

    /// Stores the standard user (password hash not verifiable) and returns it
    pub async fn seed_user(&self, username: &str) -> User {
        let user = User::new(
            username,
            "unverifiable",
            StringFixtures::first_name(),
            StringFixtures::last_name(),
        );
        self.users.save_user(&user).await.expect("mock store accepts users");
        user
    }

    /// Stores a live contract of the standard type held by `username`
    pub async fn seed_contract(&self, username: &str) -> Contract {
        let contract = ContractBuilder::new(EntityFixtures::contract_type().uuid, username).build();
        self.contracts.insert_contract(contract.clone()).await;
        contract
    }

    /// User service backed by the mock user store
    pub fn user_service(&self) -> Arc<UserService> {
        Arc::new(UserService::new(self.users.clone(), Arc::new(Argon2Hasher::new())))
    }

    /// Contract service backed by the mock stores
    pub fn contract_service(&self) -> Arc<ContractService> {
        Arc::new(ContractService::new(self.contracts.clone(), self.user_service()))
    }

    /// Claim service backed by the mock stores
    pub fn claim_service(&self) -> Arc<ClaimService> {
        Arc::new(ClaimService::new(
            self.claims.clone(),
            self.contracts.clone(),
            self.users.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_contract::ContractPortExt;

    #[tokio::test]
    async fn test_claims_store_shares_contracts() {
        let stores = MockStores::seeded().await;
        let contract = stores.seed_contract("jdoe").await;

        let seen = stores.claims.contracts().get_contract(contract.uuid).await.unwrap();
        assert_eq!(seen.uuid, contract.uuid);
        assert_eq!(stores.contracts.contracts_of("jdoe").await.unwrap().len(), 1);
    }
}
