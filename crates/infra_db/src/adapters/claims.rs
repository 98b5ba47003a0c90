//! PostgreSQL Claims Adapter
//!
//! Implements [`ClaimsPort`] and the transactional [`ContractSession`].
//!
//! A session is one database transaction that starts by locking the
//! contract row with `SELECT ... FOR UPDATE`. Concurrent sessions on the same
//! contract therefore queue behind each other, while sessions on different
//! contracts proceed in parallel. Dropping a session without commit rolls the
//! transaction back.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument, warn};

use core_kernel::{
    ClaimId, ContractId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{
    Claim, ClaimQuery, ClaimStatus, ClaimsPort, ContractSession, RepairOrder, RepairOrderQuery,
};
use domain_contract::{Contract, Item};

use super::conflict_on_duplicate;
use super::contract::{contract_to_row, row_to_contract};
use crate::error::DatabaseError;
use crate::repositories::{
    ClaimFilter, ClaimRepository, ClaimRow, ContractRepository, RepairOrderRepository,
    RepairOrderRow,
};

/// PostgreSQL-backed implementation of the ClaimsPort trait
#[derive(Debug, Clone)]
pub struct PostgresClaimsAdapter {
    claims: ClaimRepository,
    repair_orders: RepairOrderRepository,
    pool: PgPool,
}

impl PostgresClaimsAdapter {
    /// Creates a new PostgreSQL claims adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            claims: ClaimRepository::new(pool.clone()),
            repair_orders: RepairOrderRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimsAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimsAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-claims-adapter").await
    }
}

#[async_trait]
impl ClaimsPort for PostgresClaimsAdapter {
    #[instrument(skip(self), fields(contract_id = %contract_id))]
    async fn begin_contract(
        &self,
        contract_id: ContractId,
    ) -> Result<Box<dyn ContractSession>, PortError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        let row = ContractRepository::lock(&mut *tx, *contract_id.as_uuid()).await?;
        debug!("Contract locked");

        Ok(Box::new(PostgresContractSession {
            tx: Some(tx),
            contract: row_to_contract(row),
        }))
    }

    #[instrument(skip(self), fields(contract_id = %contract_id, claim_id = %claim_id))]
    async fn get_claim(&self, contract_id: ContractId, claim_id: ClaimId) -> Result<Claim, PortError> {
        let row = self
            .claims
            .get(*contract_id.as_uuid(), *claim_id.as_uuid())
            .await?;
        Ok(row_to_claim(row))
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.uuid))]
    async fn save_claim(&self, claim: &Claim) -> Result<(), PortError> {
        Ok(self.claims.upsert(&claim_to_row(claim)).await?)
    }

    #[instrument(skip(self))]
    async fn find_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let rows = self.claims.find(&claim_filter(query)).await?;
        debug!(count = rows.len(), "Found claims");
        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    #[instrument(skip(self), fields(claim_id = %claim_id))]
    async fn get_repair_order(&self, claim_id: ClaimId) -> Result<RepairOrder, PortError> {
        let row = self.repair_orders.get_by_claim(*claim_id.as_uuid()).await?;
        Ok(row_to_repair_order(row))
    }

    #[instrument(skip(self, order), fields(claim_id = %order.claim_uuid))]
    async fn save_repair_order(&self, order: &RepairOrder) -> Result<(), PortError> {
        Ok(self.repair_orders.upsert(&repair_order_to_row(order)).await?)
    }

    #[instrument(skip(self))]
    async fn find_repair_orders(
        &self,
        query: &RepairOrderQuery,
    ) -> Result<Vec<RepairOrder>, PortError> {
        let rows = self.repair_orders.find(query.ready).await?;
        Ok(rows.into_iter().map(row_to_repair_order).collect())
    }
}

// ============================================================================
// Contract session
// ============================================================================

/// One transaction holding the row lock of a single contract
pub struct PostgresContractSession {
    tx: Option<Transaction<'static, Postgres>>,
    contract: Contract,
}

impl PostgresContractSession {
    fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>, PortError> {
        self.tx
            .as_mut()
            .ok_or_else(|| PortError::internal("contract session already committed"))
    }
}

impl Drop for PostgresContractSession {
    fn drop(&mut self) {
        if self.tx.is_some() {
            warn!(contract_id = %self.contract.uuid, "Contract session dropped without commit, rolling back");
        }
    }
}

#[async_trait]
impl ContractSession for PostgresContractSession {
    fn contract(&self) -> &Contract {
        &self.contract
    }

    async fn save_contract(&mut self, contract: &Contract) -> Result<(), PortError> {
        let tx = self.tx()?;
        ContractRepository::write(&mut **tx, &contract_to_row(contract), true).await?;
        self.contract = contract.clone();
        Ok(())
    }

    async fn get_claim(&mut self, claim_id: ClaimId) -> Result<Claim, PortError> {
        let contract_uuid = *self.contract.uuid.as_uuid();
        let tx = self.tx()?;
        let row = ClaimRepository::get_with(&mut **tx, contract_uuid, *claim_id.as_uuid()).await?;
        Ok(row_to_claim(row))
    }

    async fn insert_claim(&mut self, claim: &Claim) -> Result<(), PortError> {
        let tx = self.tx()?;
        ClaimRepository::write(&mut **tx, &claim_to_row(claim), false)
            .await
            .map_err(conflict_on_duplicate("claim", claim.uuid))
    }

    async fn save_claim(&mut self, claim: &Claim) -> Result<(), PortError> {
        let tx = self.tx()?;
        Ok(ClaimRepository::write(&mut **tx, &claim_to_row(claim), true).await?)
    }

    async fn insert_repair_order(&mut self, order: &RepairOrder) -> Result<(), PortError> {
        let tx = self.tx()?;
        RepairOrderRepository::write(&mut **tx, &repair_order_to_row(order), false)
            .await
            .map_err(conflict_on_duplicate("repair order for claim", order.claim_uuid))
    }

    async fn claims(&mut self) -> Result<Vec<Claim>, PortError> {
        let filter = ClaimFilter {
            contract_uuid: Some(*self.contract.uuid.as_uuid()),
            ..ClaimFilter::default()
        };
        let tx = self.tx()?;
        let rows = ClaimRepository::find_with(&mut **tx, &filter).await?;
        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    async fn commit(&mut self) -> Result<(), PortError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| PortError::internal("contract session already committed"))?;
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        debug!(contract_id = %self.contract.uuid, "Contract session committed");
        Ok(())
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn claim_filter(query: &ClaimQuery) -> ClaimFilter {
    ClaimFilter {
        status: query.status.map(|status| status.code().to_string()),
        is_theft: query.is_theft,
        contract_uuid: query.contract_uuid.map(|id| *id.as_uuid()),
    }
}

fn row_to_claim(row: ClaimRow) -> Claim {
    Claim {
        uuid: ClaimId::from_uuid(row.uuid),
        contract_uuid: ContractId::from_uuid(row.contract_uuid),
        date: row.date,
        description: row.description,
        is_theft: row.is_theft,
        status: ClaimStatus::from_code(&row.status),
        reimbursable: row.reimbursable,
        repaired: row.repaired,
        file_reference: row.file_reference,
    }
}

fn claim_to_row(claim: &Claim) -> ClaimRow {
    ClaimRow {
        uuid: *claim.uuid.as_uuid(),
        contract_uuid: *claim.contract_uuid.as_uuid(),
        date: claim.date,
        description: claim.description.clone(),
        is_theft: claim.is_theft,
        status: claim.status.code().to_string(),
        reimbursable: claim.reimbursable,
        repaired: claim.repaired,
        file_reference: claim.file_reference.clone(),
    }
}

fn row_to_repair_order(row: RepairOrderRow) -> RepairOrder {
    RepairOrder {
        claim_uuid: ClaimId::from_uuid(row.claim_uuid),
        contract_uuid: ContractId::from_uuid(row.contract_uuid),
        item: Item {
            id: row.item_id,
            brand: row.item_brand,
            model: row.item_model,
            price: row.item_price,
            description: row.item_description,
            serial_no: row.item_serial_no,
        },
        ready: row.ready,
    }
}

fn repair_order_to_row(order: &RepairOrder) -> RepairOrderRow {
    RepairOrderRow {
        claim_uuid: *order.claim_uuid.as_uuid(),
        contract_uuid: *order.contract_uuid.as_uuid(),
        item_id: order.item.id,
        item_brand: order.item.brand.clone(),
        item_model: order.item.model.clone(),
        item_price: order.item.price,
        item_description: order.item.description.clone(),
        item_serial_no: order.item.serial_no.clone(),
        ready: order.ready,
    }
}
