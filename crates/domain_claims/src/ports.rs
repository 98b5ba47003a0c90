//! Claims Domain Ports
//!
//! [`ClaimsPort`] is the record store for claims and repair orders. Reads
//! and single-record writes go through it directly; anything that touches
//! several records opens a [`ContractSession`] with [`with_contract`].
//!
//! # Scoped contract sessions
//!
//! A session locks one contract for its lifetime. Writes made through the
//! session become visible together on [`ContractSession::commit`]; a session
//! dropped without commit discards them.
//!
//! ```rust,ignore
//! let claim = with_contract(port.as_ref(), contract_id, move |session| {
//!     Box::pin(async move {
//!         let mut claim = session.get_claim(claim_id).await?;
//!         claim.repaired = true;
//!         session.save_claim(&claim).await?;
//!         Ok::<_, ClaimError>(claim)
//!     })
//! })
//! .await?;
//! ```

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use core_kernel::{ClaimId, ContractId, DomainPort, HealthCheckable, PortError};
use domain_contract::Contract;

use crate::claim::{Claim, ClaimQuery};
use crate::error::ClaimError;
use crate::repair::{RepairOrder, RepairOrderQuery};

/// Record store operations for claims and repair orders
#[async_trait]
pub trait ClaimsPort: DomainPort + HealthCheckable {
    /// Locks a contract and opens a session on it
    ///
    /// # Returns
    ///
    /// `PortError::NotFound` if the contract does not exist
    async fn begin_contract(
        &self,
        contract_id: ContractId,
    ) -> Result<Box<dyn ContractSession>, PortError>;

    /// Retrieves a claim filed against the given contract
    async fn get_claim(&self, contract_id: ContractId, claim_id: ClaimId) -> Result<Claim, PortError>;

    /// Writes the full claim row
    async fn save_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// Lists claims passing the query, ordered by date then id
    async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError>;

    /// Retrieves the repair order of a claim
    async fn get_repair_order(&self, claim_id: ClaimId) -> Result<RepairOrder, PortError>;

    /// Writes the full repair order row
    async fn save_repair_order(&self, order: &RepairOrder) -> Result<(), PortError>;

    /// Lists repair orders passing the query
    async fn find_repair_orders(&self, query: &RepairOrderQuery) -> Result<Vec<RepairOrder>, PortError>;
}

/// Unit of work scoped to one locked contract
#[async_trait]
pub trait ContractSession: Send {
    /// The locked contract, reflecting writes made in this session
    fn contract(&self) -> &Contract;

    /// Writes the contract row
    async fn save_contract(&mut self, contract: &Contract) -> Result<(), PortError>;

    /// Retrieves a claim of this contract
    async fn get_claim(&mut self, claim_id: ClaimId) -> Result<Claim, PortError>;

    /// Inserts a claim; `PortError::Conflict` if the id is taken
    async fn insert_claim(&mut self, claim: &Claim) -> Result<(), PortError>;

    /// Writes a claim row
    async fn save_claim(&mut self, claim: &Claim) -> Result<(), PortError>;

    /// Inserts a repair order; `PortError::Conflict` if the claim already has one
    async fn insert_repair_order(&mut self, order: &RepairOrder) -> Result<(), PortError>;

    /// All claims whose contract is this one, ordered by date then id
    async fn claims(&mut self) -> Result<Vec<Claim>, PortError>;

    /// Makes every write of this session visible
    async fn commit(&mut self) -> Result<(), PortError>;
}

/// Future returned by the work closure of [`with_contract`]
pub type SessionFuture<'s, T> = Pin<Box<dyn Future<Output = Result<T, ClaimError>> + Send + 's>>;

/// Runs `work` inside a session on `contract_id` and commits it
///
/// The session is committed only when `work` succeeds. On error it is
/// dropped, which rolls back every write made through it.
pub async fn with_contract<T, F>(
    port: &dyn ClaimsPort,
    contract_id: ContractId,
    work: F,
) -> Result<T, ClaimError>
where
    T: Send,
    F: for<'s> FnOnce(&'s mut Box<dyn ContractSession>) -> SessionFuture<'s, T> + Send,
{
    let mut session = port.begin_contract(contract_id).await?;
    let value = work(&mut session).await?;
    session.commit().await?;
    Ok(value)
}

/// Mock implementation of ClaimsPort for testing
///
/// Contracts are read from and written to a shared [`MockContractPort`], so
/// the contract and claims domains see the same records. Sessions take a
/// per-contract lock and stage their writes until commit.
///
/// [`MockContractPort`]: domain_contract::MockContractPort
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
    use chrono::Utc;

    use core_kernel::HealthCheckResult;
    use domain_contract::{ContractPort, MockContractPort};

    type ClaimTable = Arc<RwLock<HashMap<ClaimId, Claim>>>;
    type RepairTable = Arc<RwLock<HashMap<ClaimId, RepairOrder>>>;

    fn sort_claims(claims: &mut [Claim]) {
        claims.sort_by(|a, b| a.date.cmp(&b.date).then(a.uuid.cmp(&b.uuid)));
    }

    /// In-memory mock implementation of ClaimsPort
    #[derive(Debug)]
    pub struct MockClaimsPort {
        contracts: Arc<MockContractPort>,
        claims: ClaimTable,
        repair_orders: RepairTable,
        locks: Arc<Mutex<HashMap<ContractId, Arc<Mutex<()>>>>>,
    }

    impl MockClaimsPort {
        /// Creates a mock port sharing contracts with `contracts`
        pub fn new(contracts: Arc<MockContractPort>) -> Self {
            Self {
                contracts,
                claims: Arc::default(),
                repair_orders: Arc::default(),
                locks: Arc::default(),
            }
        }

        /// The shared contract store
        pub fn contracts(&self) -> Arc<MockContractPort> {
            self.contracts.clone()
        }

        /// Inserts or replaces a claim directly, bypassing sessions
        pub async fn insert_claim(&self, claim: Claim) {
            self.claims.write().await.insert(claim.uuid, claim);
        }

        /// Number of stored claims
        pub async fn claim_count(&self) -> usize {
            self.claims.read().await.len()
        }

        /// Number of stored repair orders
        pub async fn repair_order_count(&self) -> usize {
            self.repair_orders.read().await.len()
        }

        /// Number of per-contract locks currently tracked
        pub async fn lock_count(&self) -> usize {
            self.locks.lock().await.len()
        }

        /// Returns the lock of a contract, dropping locks nobody holds or awaits
        async fn contract_lock(&self, contract_id: ContractId) -> Arc<Mutex<()>> {
            let mut locks = self.locks.lock().await;
            locks.retain(|id, lock| *id == contract_id || Arc::strong_count(lock) > 1);
            locks.entry(contract_id).or_default().clone()
        }
    }

    impl DomainPort for MockClaimsPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimsPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-claims-port".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimsPort for MockClaimsPort {
        async fn begin_contract(
            &self,
            contract_id: ContractId,
        ) -> Result<Box<dyn ContractSession>, PortError> {
            let guard = self.contract_lock(contract_id).await.lock_owned().await;
            let contract = self.contracts.get_contract(contract_id).await?;

            Ok(Box::new(MockContractSession {
                _guard: guard,
                contract,
                contract_changed: false,
                staged_claims: HashMap::new(),
                inserted_claims: HashSet::new(),
                staged_orders: Vec::new(),
                contracts: self.contracts.clone(),
                claims: self.claims.clone(),
                repair_orders: self.repair_orders.clone(),
            }))
        }

        async fn get_claim(&self, contract_id: ContractId, claim_id: ClaimId) -> Result<Claim, PortError> {
            self.claims
                .read()
                .await
                .get(&claim_id)
                .filter(|c| c.contract_uuid == contract_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", claim_id))
        }

        async fn save_claim(&self, claim: &Claim) -> Result<(), PortError> {
            self.claims.write().await.insert(claim.uuid, claim.clone());
            Ok(())
        }

        async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
            let mut found: Vec<Claim> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| query.matches(c))
                .cloned()
                .collect();
            sort_claims(&mut found);
            Ok(found)
        }

        async fn get_repair_order(&self, claim_id: ClaimId) -> Result<RepairOrder, PortError> {
            self.repair_orders
                .read()
                .await
                .get(&claim_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("RepairOrder", claim_id))
        }

        async fn save_repair_order(&self, order: &RepairOrder) -> Result<(), PortError> {
            self.repair_orders
                .write()
                .await
                .insert(order.claim_uuid, order.clone());
            Ok(())
        }

        async fn find_repair_orders(&self, query: &RepairOrderQuery) -> Result<Vec<RepairOrder>, PortError> {
            let mut found: Vec<RepairOrder> = self
                .repair_orders
                .read()
                .await
                .values()
                .filter(|o| query.matches(o))
                .cloned()
                .collect();
            found.sort_by_key(|o| o.claim_uuid);
            Ok(found)
        }
    }

    /// Session holding the contract lock and the staged writes
    struct MockContractSession {
        _guard: OwnedMutexGuard<()>,
        contract: Contract,
        contract_changed: bool,
        staged_claims: HashMap<ClaimId, Claim>,
        inserted_claims: HashSet<ClaimId>,
        staged_orders: Vec<RepairOrder>,
        contracts: Arc<MockContractPort>,
        claims: ClaimTable,
        repair_orders: RepairTable,
    }

    #[async_trait]
    impl ContractSession for MockContractSession {
        fn contract(&self) -> &Contract {
            &self.contract
        }

        async fn save_contract(&mut self, contract: &Contract) -> Result<(), PortError> {
            if contract.uuid != self.contract.uuid {
                return Err(PortError::internal("session can only write its own contract"));
            }
            self.contract = contract.clone();
            self.contract_changed = true;
            Ok(())
        }

        async fn get_claim(&mut self, claim_id: ClaimId) -> Result<Claim, PortError> {
            if let Some(claim) = self.staged_claims.get(&claim_id) {
                return Ok(claim.clone());
            }
            self.claims
                .read()
                .await
                .get(&claim_id)
                .filter(|c| c.contract_uuid == self.contract.uuid)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", claim_id))
        }

        async fn insert_claim(&mut self, claim: &Claim) -> Result<(), PortError> {
            let taken = self.staged_claims.contains_key(&claim.uuid)
                || self.claims.read().await.contains_key(&claim.uuid);
            if taken {
                return Err(PortError::conflict(format!("claim {} already exists", claim.uuid)));
            }
            self.inserted_claims.insert(claim.uuid);
            self.staged_claims.insert(claim.uuid, claim.clone());
            Ok(())
        }

        async fn save_claim(&mut self, claim: &Claim) -> Result<(), PortError> {
            self.staged_claims.insert(claim.uuid, claim.clone());
            Ok(())
        }

        async fn insert_repair_order(&mut self, order: &RepairOrder) -> Result<(), PortError> {
            let taken = self.staged_orders.iter().any(|o| o.claim_uuid == order.claim_uuid)
                || self.repair_orders.read().await.contains_key(&order.claim_uuid);
            if taken {
                return Err(PortError::conflict(format!(
                    "repair order for claim {} already exists",
                    order.claim_uuid
                )));
            }
            self.staged_orders.push(order.clone());
            Ok(())
        }

        async fn claims(&mut self) -> Result<Vec<Claim>, PortError> {
            let mut merged: HashMap<ClaimId, Claim> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.contract_uuid == self.contract.uuid)
                .map(|c| (c.uuid, c.clone()))
                .collect();
            for (id, claim) in &self.staged_claims {
                merged.insert(*id, claim.clone());
            }
            let mut claims: Vec<Claim> = merged.into_values().collect();
            sort_claims(&mut claims);
            Ok(claims)
        }

        async fn commit(&mut self) -> Result<(), PortError> {
            {
                let mut claims = self.claims.write().await;
                if let Some(id) = self.inserted_claims.iter().find(|id| claims.contains_key(*id)) {
                    return Err(PortError::conflict(format!("claim {} already exists", id)));
                }
                let mut orders = self.repair_orders.write().await;
                for (id, claim) in self.staged_claims.drain() {
                    claims.insert(id, claim);
                }
                for order in self.staged_orders.drain(..) {
                    orders.insert(order.claim_uuid, order);
                }
            }
            self.inserted_claims.clear();

            if self.contract_changed {
                self.contracts.save_contract(&self.contract).await?;
                self.contract_changed = false;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockClaimsPort;
    use std::sync::Arc;
    use chrono::{Duration, Utc};

    use core_kernel::ContractTypeId;
    use domain_contract::{ContractPort, Item, MockContractPort};

    async fn port_with_contract() -> (MockClaimsPort, ContractId) {
        let contracts = Arc::new(MockContractPort::new());
        let contract = Contract {
            uuid: ContractId::new(),
            username: "jdoe".to_string(),
            item: Item::default(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(30),
            void: false,
            contract_type_uuid: ContractTypeId::new(),
            claim_index: vec![],
        };
        let id = contract.uuid;
        contracts.insert_contract(contract).await;
        (MockClaimsPort::new(contracts), id)
    }

    #[tokio::test]
    async fn test_begin_unknown_contract_is_not_found() {
        let (port, _) = port_with_contract().await;
        let result = port.begin_contract(ContractId::new()).await;
        assert!(result.err().unwrap().is_not_found());
    }

    #[tokio::test]
    async fn test_uncommitted_session_discards_writes() {
        let (port, contract_id) = port_with_contract().await;
        {
            let mut session = port.begin_contract(contract_id).await.unwrap();
            let claim = Claim::file(ClaimId::new(), contract_id, Utc::now(), "", false);
            session.insert_claim(&claim).await.unwrap();
            let mut contract = session.contract().clone();
            contract.record_claim(claim.uuid);
            session.save_contract(&contract).await.unwrap();
        }
        assert_eq!(port.claim_count().await, 0);
        let contract = port.contracts().get_contract(contract_id).await.unwrap();
        assert!(contract.claim_index.is_empty());
    }

    #[tokio::test]
    async fn test_with_contract_commits_on_success() {
        let (port, contract_id) = port_with_contract().await;
        let claim = Claim::file(ClaimId::new(), contract_id, Utc::now(), "", false);
        let claim_id = claim.uuid;

        with_contract(&port, contract_id, move |session| {
            Box::pin(async move {
                session.insert_claim(&claim).await?;
                Ok::<_, ClaimError>(())
            })
        })
        .await
        .unwrap();

        assert!(port.get_claim(contract_id, claim_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_with_contract_rolls_back_on_error() {
        let (port, contract_id) = port_with_contract().await;
        let claim = Claim::file(ClaimId::new(), contract_id, Utc::now(), "", false);

        let result: Result<(), ClaimError> = with_contract(&port, contract_id, move |session| {
            Box::pin(async move {
                session.insert_claim(&claim).await?;
                Err::<(), _>(ClaimError::TheftNotConfirmed)
            })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(port.claim_count().await, 0);
    }

    #[tokio::test]
    async fn test_idle_contract_locks_are_pruned() {
        let (port, contract_id) = port_with_contract().await;

        for _ in 0..3 {
            drop(port.begin_contract(ContractId::new()).await.err());
        }
        let held = port.begin_contract(contract_id).await.unwrap();
        assert_eq!(port.lock_count().await, 1);

        drop(port.begin_contract(ContractId::new()).await.err());
        assert_eq!(port.lock_count().await, 2);
        drop(held);
    }

    #[tokio::test]
    async fn test_claim_of_other_contract_is_not_visible() {
        let (port, contract_id) = port_with_contract().await;
        let foreign = Claim::file(ClaimId::new(), ContractId::new(), Utc::now(), "", false);
        let foreign_id = foreign.uuid;
        port.insert_claim(foreign).await;

        let mut session = port.begin_contract(contract_id).await.unwrap();
        assert!(session.get_claim(foreign_id).await.unwrap_err().is_not_found());
        assert!(port.get_claim(contract_id, foreign_id).await.unwrap_err().is_not_found());
    }
}
