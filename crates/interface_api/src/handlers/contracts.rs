//! Contract type and contract handlers

use axum::{extract::State, Json};

use domain_claims::Claim;
use domain_contract::{Contract, ContractType};

use crate::dto::contracts::*;
use crate::dto::MessageResponse;
use crate::extract::{OptionalPayload, Payload};
use crate::{error::ApiError, AppState};

/// Lists the contract type catalogue
pub async fn list_contract_types(
    State(state): State<AppState>,
    OptionalPayload(request): OptionalPayload<ListContractTypesRequest>,
) -> Result<Json<Vec<ContractType>>, ApiError> {
    let types = state.contracts.list_contract_types(request.into()).await?;
    Ok(Json(types))
}

/// Adds a contract type
pub async fn create_contract_type(
    State(state): State<AppState>,
    Payload(request): Payload<CreateContractTypeRequest>,
) -> Result<Json<ContractType>, ApiError> {
    let contract_type = state.contracts.create_contract_type(request.into()).await?;
    Ok(Json(contract_type))
}

/// Activates or deactivates a contract type
pub async fn set_contract_type_active(
    State(state): State<AppState>,
    Payload(request): Payload<SetContractTypeActiveRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .contracts
        .set_contract_type_active(request.uuid, request.active)
        .await?;
    Ok(Json(MessageResponse::success()))
}

/// Lists contracts, optionally for one user
pub async fn list_contracts(
    State(state): State<AppState>,
    OptionalPayload(request): OptionalPayload<ListContractsRequest>,
) -> Result<Json<Vec<Contract>>, ApiError> {
    let contracts = state.contracts.list_contracts(request.into()).await?;
    Ok(Json(contracts))
}

/// Sells a contract, provisioning its user when needed
pub async fn create_contract(
    State(state): State<AppState>,
    Payload(request): Payload<CreateContractRequest>,
) -> Result<Json<Contract>, ApiError> {
    let contract = state.contracts.create_contract(request.into()).await?;
    Ok(Json(contract))
}

/// Lists the claims filed against a contract
pub async fn contract_claims(
    State(state): State<AppState>,
    Payload(request): Payload<ContractRef>,
) -> Result<Json<Vec<Claim>>, ApiError> {
    let claims = state.claims.contract_claims(request.uuid).await?;
    Ok(Json(claims))
}

/// Recomputes a contract's claim index
pub async fn rebuild_claim_index(
    State(state): State<AppState>,
    Payload(request): Payload<ContractRef>,
) -> Result<Json<Contract>, ApiError> {
    let contract = state.claims.rebuild_claim_index(request.uuid).await?;
    Ok(Json(contract))
}
