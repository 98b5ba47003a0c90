//! Contract Domain Ports
//!
//! One port covers both the contract type catalogue and sold contracts.
//! Implementations live in `infra_db` (PostgreSQL) and in [`mock`]
//! (in-memory, behind the `mock` feature).

use async_trait::async_trait;

use core_kernel::{ContractId, ContractTypeId, DomainPort, HealthCheckable, PortError};

use crate::contract::{Contract, ContractQuery};
use crate::contract_type::{ContractType, ContractTypeQuery};

/// Record store operations for contract types and contracts
#[async_trait]
pub trait ContractPort: DomainPort + HealthCheckable {
    // ========================================================================
    // Contract types
    // ========================================================================

    /// Retrieves a contract type by ID, or `PortError::NotFound`
    async fn get_contract_type(&self, id: ContractTypeId) -> Result<ContractType, PortError>;

    /// Inserts a contract type; `PortError::Conflict` if the ID is taken
    async fn create_contract_type(&self, contract_type: &ContractType) -> Result<(), PortError>;

    /// Writes the full contract type row
    async fn save_contract_type(&self, contract_type: &ContractType) -> Result<(), PortError>;

    /// Lists contract types passing the query
    async fn find_contract_types(
        &self,
        query: &ContractTypeQuery,
    ) -> Result<Vec<ContractType>, PortError>;

    // ========================================================================
    // Contracts
    // ========================================================================

    /// Retrieves a contract by ID, or `PortError::NotFound`
    async fn get_contract(&self, id: ContractId) -> Result<Contract, PortError>;

    /// Inserts a contract; `PortError::Conflict` if the ID is taken
    async fn create_contract(&self, contract: &Contract) -> Result<(), PortError>;

    /// Writes the full contract row, claim index included
    async fn save_contract(&self, contract: &Contract) -> Result<(), PortError>;

    /// Lists contracts passing the query
    async fn find_contracts(&self, query: &ContractQuery) -> Result<Vec<Contract>, PortError>;
}

/// Extension trait for ContractPort with convenience methods
#[async_trait]
pub trait ContractPortExt: ContractPort {
    /// Lists every contract held by a user
    async fn contracts_of(&self, username: &str) -> Result<Vec<Contract>, PortError> {
        self.find_contracts(&ContractQuery::by_username(username)).await
    }

    /// Returns true if the contract exists
    async fn contract_exists(&self, id: ContractId) -> Result<bool, PortError> {
        match self.get_contract(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// Blanket implementation for all ContractPort implementors
impl<T: ContractPort + ?Sized> ContractPortExt for T {}

/// Mock implementation of ContractPort for testing
///
/// Stores records in memory. The claims domain mock wraps this type so both
/// domains see the same contracts.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::HealthCheckResult;

    /// In-memory mock implementation of ContractPort
    #[derive(Debug, Default)]
    pub struct MockContractPort {
        contract_types: Arc<RwLock<HashMap<ContractTypeId, ContractType>>>,
        contracts: Arc<RwLock<HashMap<ContractId, Contract>>>,
    }

    impl MockContractPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with contract types for testing
        pub async fn with_contract_types(contract_types: Vec<ContractType>) -> Self {
            let port = Self::new();
            for contract_type in contract_types {
                port.contract_types
                    .write()
                    .await
                    .insert(contract_type.uuid, contract_type);
            }
            port
        }

        /// Inserts or replaces a contract directly
        pub async fn insert_contract(&self, contract: Contract) {
            self.contracts.write().await.insert(contract.uuid, contract);
        }

        /// Number of stored contracts
        pub async fn contract_count(&self) -> usize {
            self.contracts.read().await.len()
        }
    }

    impl DomainPort for MockContractPort {}

    #[async_trait]
    impl HealthCheckable for MockContractPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-contract-port".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ContractPort for MockContractPort {
        async fn get_contract_type(&self, id: ContractTypeId) -> Result<ContractType, PortError> {
            self.contract_types
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("ContractType", id))
        }

        async fn create_contract_type(&self, contract_type: &ContractType) -> Result<(), PortError> {
            let mut contract_types = self.contract_types.write().await;
            if contract_types.contains_key(&contract_type.uuid) {
                return Err(PortError::conflict(format!(
                    "contract type {} already exists",
                    contract_type.uuid
                )));
            }
            contract_types.insert(contract_type.uuid, contract_type.clone());
            Ok(())
        }

        async fn save_contract_type(&self, contract_type: &ContractType) -> Result<(), PortError> {
            self.contract_types
                .write()
                .await
                .insert(contract_type.uuid, contract_type.clone());
            Ok(())
        }

        async fn find_contract_types(
            &self,
            query: &ContractTypeQuery,
        ) -> Result<Vec<ContractType>, PortError> {
            let mut found: Vec<ContractType> = self
                .contract_types
                .read()
                .await
                .values()
                .filter(|ct| query.matches(ct))
                .cloned()
                .collect();
            found.sort_by_key(|ct| ct.uuid);
            Ok(found)
        }

        async fn get_contract(&self, id: ContractId) -> Result<Contract, PortError> {
            self.contracts
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Contract", id))
        }

        async fn create_contract(&self, contract: &Contract) -> Result<(), PortError> {
            let mut contracts = self.contracts.write().await;
            if contracts.contains_key(&contract.uuid) {
                return Err(PortError::conflict(format!(
                    "contract {} already exists",
                    contract.uuid
                )));
            }
            contracts.insert(contract.uuid, contract.clone());
            Ok(())
        }

        async fn save_contract(&self, contract: &Contract) -> Result<(), PortError> {
            self.contracts
                .write()
                .await
                .insert(contract.uuid, contract.clone());
            Ok(())
        }

        async fn find_contracts(&self, query: &ContractQuery) -> Result<Vec<Contract>, PortError> {
            let mut found: Vec<Contract> = self
                .contracts
                .read()
                .await
                .values()
                .filter(|c| query.matches(c))
                .cloned()
                .collect();
            found.sort_by_key(|c| c.uuid);
            Ok(found)
        }
    }
}
