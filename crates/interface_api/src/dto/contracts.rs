//! Contract type and contract DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::{ContractId, ContractTypeId};
use domain_contract::{ContractQuery, ContractType, ContractTypeQuery, Item, NewContract};

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListContractTypesRequest {
    /// Merchant filter; matches active types only
    pub shop_type: Option<String>,
}

impl From<ListContractTypesRequest> for ContractTypeQuery {
    fn from(request: ListContractTypesRequest) -> Self {
        ContractTypeQuery {
            shop_type: request.shop_type,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractTypeRequest {
    pub uuid: Option<ContractTypeId>,
    #[validate(length(min = 1, message = "shop_type is required"))]
    pub shop_type: String,
    #[serde(default)]
    pub formula_per_day: String,
    pub max_sum_insured: Decimal,
    #[serde(default)]
    pub theft_insured: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub conditions: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub min_duration_days: i32,
    #[serde(default)]
    pub max_duration_days: i32,
}

impl From<CreateContractTypeRequest> for ContractType {
    fn from(request: CreateContractTypeRequest) -> Self {
        ContractType {
            uuid: request.uuid.unwrap_or_else(ContractTypeId::new_v7),
            shop_type: request.shop_type,
            formula_per_day: request.formula_per_day,
            max_sum_insured: request.max_sum_insured,
            theft_insured: request.theft_insured,
            description: request.description,
            conditions: request.conditions,
            active: request.active,
            min_duration_days: request.min_duration_days,
            max_duration_days: request.max_duration_days,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetContractTypeActiveRequest {
    pub uuid: ContractTypeId,
    pub active: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListContractsRequest {
    pub username: Option<String>,
}

impl From<ListContractsRequest> for ContractQuery {
    fn from(request: ListContractsRequest) -> Self {
        ContractQuery {
            username: request.username.filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub uuid: Option<ContractId>,
    pub contract_type_uuid: ContractTypeId,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Only used when the user does not exist yet
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub item: Item,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<CreateContractRequest> for NewContract {
    fn from(request: CreateContractRequest) -> Self {
        NewContract {
            uuid: request.uuid,
            contract_type_uuid: request.contract_type_uuid,
            username: request.username,
            password: request.password.filter(|p| !p.is_empty()),
            first_name: request.first_name,
            last_name: request.last_name,
            item: request.item,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

/// Body naming a single contract
#[derive(Debug, Deserialize, Validate)]
pub struct ContractRef {
    pub uuid: ContractId,
}
