//! Repair orders
//!
//! A repair order is created when a claim is approved for physical repair.
//! There is at most one order per claim, keyed by the claim id.

use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ContractId};
use domain_contract::{Contract, Item};

/// Work order for the repair shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairOrder {
    pub claim_uuid: ClaimId,
    pub contract_uuid: ContractId,
    /// Copy of the insured item at the time of approval
    pub item: Item,
    pub ready: bool,
}

impl RepairOrder {
    /// Opens an order for a claim, copying the item from its contract
    pub fn open(claim_uuid: ClaimId, contract: &Contract) -> Self {
        Self {
            claim_uuid,
            contract_uuid: contract.uuid,
            item: contract.item.clone(),
            ready: false,
        }
    }

    /// Projection shown in the repair shop's work list
    pub fn view(&self) -> RepairOrderView {
        RepairOrderView {
            uuid: self.claim_uuid,
            claim_uuid: self.claim_uuid,
            contract_uuid: self.contract_uuid,
            item: self.item.clone(),
        }
    }
}

/// Filter for listing repair orders
#[derive(Debug, Clone, Default)]
pub struct RepairOrderQuery {
    pub ready: Option<bool>,
}

impl RepairOrderQuery {
    /// Orders the repair shop still has to work on
    pub fn open_orders() -> Self {
        Self { ready: Some(false) }
    }

    pub fn matches(&self, order: &RepairOrder) -> bool {
        self.ready.map_or(true, |ready| order.ready == ready)
    }
}

/// A repair order as listed for the repair shop
///
/// `uuid` repeats the claim id; orders have no identity of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairOrderView {
    pub uuid: ClaimId,
    pub claim_uuid: ClaimId,
    pub contract_uuid: ContractId,
    pub item: Item,
}
