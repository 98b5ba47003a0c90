//! Contract domain services
//!
//! `ContractService` runs the catalogue operations and contract sales.
//! Sales check everything that can fail on the contract type before the
//! user is provisioned, so a rejected sale leaves no user behind.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::{ContractId, ContractTypeId};
use domain_party::UserService;

use crate::contract::{Contract, ContractQuery, NewContract};
use crate::contract_type::{ContractType, ContractTypeQuery};
use crate::error::ContractError;
use crate::ports::ContractPort;

/// Service for the contract type catalogue and contract sales
pub struct ContractService {
    contracts: Arc<dyn ContractPort>,
    users: Arc<UserService>,
}

impl ContractService {
    /// Creates a new contract service
    ///
    /// # Arguments
    ///
    /// * `contracts` - Record store for contract types and contracts
    /// * `users` - User service used to provision contract holders
    pub fn new(contracts: Arc<dyn ContractPort>, users: Arc<UserService>) -> Self {
        Self { contracts, users }
    }

    // ========================================================================
    // Contract types
    // ========================================================================

    /// Lists contract types
    ///
    /// An empty query returns the whole catalogue. A shop type narrows it to
    /// active types whose shop type matches case-insensitively.
    #[instrument(skip(self))]
    pub async fn list_contract_types(
        &self,
        query: ContractTypeQuery,
    ) -> Result<Vec<ContractType>, ContractError> {
        Ok(self.contracts.find_contract_types(&query).await?)
    }

    /// Adds a product to the catalogue
    #[instrument(skip(self, contract_type), fields(contract_type_id = %contract_type.uuid))]
    pub async fn create_contract_type(
        &self,
        contract_type: ContractType,
    ) -> Result<ContractType, ContractError> {
        if contract_type.shop_type.trim().is_empty() {
            return Err(ContractError::InvalidInput("shop_type is required".to_string()));
        }

        self.contracts.create_contract_type(&contract_type).await?;
        info!("contract type created");
        Ok(contract_type)
    }

    /// Toggles whether a contract type can be sold
    #[instrument(skip(self))]
    pub async fn set_contract_type_active(
        &self,
        id: ContractTypeId,
        active: bool,
    ) -> Result<ContractType, ContractError> {
        let mut contract_type = self.contracts.get_contract_type(id).await?;
        contract_type.active = active;
        self.contracts.save_contract_type(&contract_type).await?;

        info!(active, "contract type availability changed");
        Ok(contract_type)
    }

    // ========================================================================
    // Contracts
    // ========================================================================

    /// Lists contracts as stored, optionally for one user
    #[instrument(skip(self))]
    pub async fn list_contracts(&self, query: ContractQuery) -> Result<Vec<Contract>, ContractError> {
        Ok(self.contracts.find_contracts(&query).await?)
    }

    /// Loads a single contract
    pub async fn get_contract(&self, id: ContractId) -> Result<Contract, ContractError> {
        Ok(self.contracts.get_contract(id).await?)
    }

    /// Sells a contract
    ///
    /// Checks, in order:
    /// 1. the contract type exists and is active
    /// 2. the term fits the contract type's duration bounds
    /// 3. the user exists, or can be created from the supplied password
    ///
    /// The contract starts out valid with an empty claim index.
    ///
    /// # Errors
    ///
    /// * `NotFound` - unknown contract type, or unknown user without a password
    /// * `InactiveContractType` / `InvalidTerm` - validation failures
    /// * `Conflict` - the contract id is already taken
    #[instrument(
        skip(self, request),
        fields(username = %request.username, contract_type_id = %request.contract_type_uuid)
    )]
    pub async fn create_contract(&self, request: NewContract) -> Result<Contract, ContractError> {
        if request.username.is_empty() {
            return Err(ContractError::InvalidInput("username is required".to_string()));
        }

        let contract_type = self
            .contracts
            .get_contract_type(request.contract_type_uuid)
            .await?;
        if !contract_type.active {
            warn!("sale attempted on inactive contract type");
            return Err(ContractError::InactiveContractType(contract_type.uuid));
        }

        contract_type
            .check_term(request.start_date, request.end_date)
            .map_err(ContractError::InvalidTerm)?;

        let user = self
            .users
            .provision(
                &request.username,
                request.password.as_deref(),
                &request.first_name,
                &request.last_name,
            )
            .await?;

        let contract = Contract {
            uuid: request.uuid.unwrap_or_else(ContractId::new_v7),
            username: user.username,
            item: request.item,
            start_date: request.start_date,
            end_date: request.end_date,
            void: false,
            contract_type_uuid: contract_type.uuid,
            claim_index: Vec::new(),
        };
        self.contracts.create_contract(&contract).await?;

        info!(contract_id = %contract.uuid, "contract created");
        Ok(contract)
    }
}
