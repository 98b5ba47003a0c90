//! PostgreSQL Contract Adapter
//!
//! Serves both the contract type catalogue and sold contracts. The row
//! conversions here are shared with the claims adapter, which reads
//! contracts inside its sessions.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    ClaimId, ContractId, ContractTypeId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_contract::{Contract, ContractPort, ContractQuery, ContractType, ContractTypeQuery, Item};

use super::conflict_on_duplicate;
use crate::repositories::{ContractRepository, ContractRow, ContractTypeRepository, ContractTypeRow};

/// PostgreSQL-backed implementation of the ContractPort trait
#[derive(Debug, Clone)]
pub struct PostgresContractAdapter {
    contract_types: ContractTypeRepository,
    contracts: ContractRepository,
    pool: PgPool,
}

impl PostgresContractAdapter {
    /// Creates a new PostgreSQL contract adapter
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            contract_types: ContractTypeRepository::new(pool.clone()),
            contracts: ContractRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresContractAdapter {}

#[async_trait]
impl HealthCheckable for PostgresContractAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-contract-adapter").await
    }
}

#[async_trait]
impl ContractPort for PostgresContractAdapter {
    // ========================================================================
    // Contract types
    // ========================================================================

    #[instrument(skip(self), fields(contract_type_id = %id))]
    async fn get_contract_type(&self, id: ContractTypeId) -> Result<ContractType, PortError> {
        debug!("Fetching contract type");
        let row = self.contract_types.get_by_id(*id.as_uuid()).await?;
        Ok(row_to_contract_type(row))
    }

    #[instrument(skip(self, contract_type), fields(contract_type_id = %contract_type.uuid))]
    async fn create_contract_type(&self, contract_type: &ContractType) -> Result<(), PortError> {
        self.contract_types
            .insert(&contract_type_to_row(contract_type))
            .await
            .map_err(conflict_on_duplicate("contract type", contract_type.uuid))
    }

    #[instrument(skip(self, contract_type), fields(contract_type_id = %contract_type.uuid))]
    async fn save_contract_type(&self, contract_type: &ContractType) -> Result<(), PortError> {
        Ok(self.contract_types.upsert(&contract_type_to_row(contract_type)).await?)
    }

    #[instrument(skip(self))]
    async fn find_contract_types(
        &self,
        query: &ContractTypeQuery,
    ) -> Result<Vec<ContractType>, PortError> {
        let rows = self.contract_types.find(query.shop_type.as_deref()).await?;
        debug!(count = rows.len(), "Found contract types");
        Ok(rows.into_iter().map(row_to_contract_type).collect())
    }

    // ========================================================================
    // Contracts
    // ========================================================================

    #[instrument(skip(self), fields(contract_id = %id))]
    async fn get_contract(&self, id: ContractId) -> Result<Contract, PortError> {
        debug!("Fetching contract");
        let row = self.contracts.get_by_id(*id.as_uuid()).await?;
        Ok(row_to_contract(row))
    }

    #[instrument(skip(self, contract), fields(contract_id = %contract.uuid))]
    async fn create_contract(&self, contract: &Contract) -> Result<(), PortError> {
        self.contracts
            .insert(&contract_to_row(contract))
            .await
            .map_err(conflict_on_duplicate("contract", contract.uuid))
    }

    #[instrument(skip(self, contract), fields(contract_id = %contract.uuid))]
    async fn save_contract(&self, contract: &Contract) -> Result<(), PortError> {
        Ok(self.contracts.upsert(&contract_to_row(contract)).await?)
    }

    #[instrument(skip(self))]
    async fn find_contracts(&self, query: &ContractQuery) -> Result<Vec<Contract>, PortError> {
        let rows = self.contracts.find(query.username.as_deref()).await?;
        debug!(count = rows.len(), "Found contracts");
        Ok(rows.into_iter().map(row_to_contract).collect())
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn row_to_contract_type(row: ContractTypeRow) -> ContractType {
    ContractType {
        uuid: ContractTypeId::from_uuid(row.uuid),
        shop_type: row.shop_type,
        formula_per_day: row.formula_per_day,
        max_sum_insured: row.max_sum_insured,
        theft_insured: row.theft_insured,
        description: row.description,
        conditions: row.conditions,
        active: row.active,
        min_duration_days: row.min_duration_days,
        max_duration_days: row.max_duration_days,
    }
}

fn contract_type_to_row(contract_type: &ContractType) -> ContractTypeRow {
    ContractTypeRow {
        uuid: *contract_type.uuid.as_uuid(),
        shop_type: contract_type.shop_type.clone(),
        formula_per_day: contract_type.formula_per_day.clone(),
        max_sum_insured: contract_type.max_sum_insured,
        theft_insured: contract_type.theft_insured,
        description: contract_type.description.clone(),
        conditions: contract_type.conditions.clone(),
        active: contract_type.active,
        min_duration_days: contract_type.min_duration_days,
        max_duration_days: contract_type.max_duration_days,
    }
}

pub(crate) fn row_to_contract(row: ContractRow) -> Contract {
    Contract {
        uuid: ContractId::from_uuid(row.uuid),
        username: row.username,
        item: Item {
            id: row.item_id,
            brand: row.item_brand,
            model: row.item_model,
            price: row.item_price,
            description: row.item_description,
            serial_no: row.item_serial_no,
        },
        start_date: row.start_date,
        end_date: row.end_date,
        void: row.void,
        contract_type_uuid: ContractTypeId::from_uuid(row.contract_type_uuid),
        claim_index: row.claim_index.into_iter().map(ClaimId::from_uuid).collect(),
    }
}

pub(crate) fn contract_to_row(contract: &Contract) -> ContractRow {
    ContractRow {
        uuid: *contract.uuid.as_uuid(),
        username: contract.username.clone(),
        contract_type_uuid: *contract.contract_type_uuid.as_uuid(),
        item_id: contract.item.id,
        item_brand: contract.item.brand.clone(),
        item_model: contract.item.model.clone(),
        item_price: contract.item.price,
        item_description: contract.item.description.clone(),
        item_serial_no: contract.item.serial_no.clone(),
        start_date: contract.start_date,
        end_date: contract.end_date,
        void: contract.void,
        claim_index: contract.claim_index.iter().map(|id| *id.as_uuid()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_contract_row_keeps_item_and_index() {
        let start = Utc::now();
        let contract = Contract {
            uuid: ContractId::new(),
            username: "jdoe".to_string(),
            item: Item {
                id: 7,
                brand: "Acme".to_string(),
                model: "X1".to_string(),
                price: dec!(499.90),
                description: "Bike".to_string(),
                serial_no: "SN-7".to_string(),
            },
            start_date: start,
            end_date: start + Duration::days(365),
            void: false,
            contract_type_uuid: ContractTypeId::new(),
            claim_index: vec![ClaimId::new(), ClaimId::new()],
        };

        let row = contract_to_row(&contract);
        assert_eq!(row.item_serial_no, "SN-7");
        assert_eq!(row.claim_index.len(), 2);

        let back = row_to_contract(row);
        assert_eq!(back.uuid, contract.uuid);
        assert_eq!(back.item, contract.item);
        assert_eq!(back.claim_index, contract.claim_index);
    }
}
