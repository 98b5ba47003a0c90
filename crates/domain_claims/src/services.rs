//! Claims domain services
//!
//! `ClaimService` orchestrates the lifecycle: it opens contract sessions,
//! applies the rules from [`crate::lifecycle`] and writes the resulting
//! records. Read-only listings go straight to the ports.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use core_kernel::{ClaimId, ContractId};
use domain_contract::{Contract, ContractPort};
use domain_party::UserPort;

use crate::claim::{Claim, ClaimQuery, FileClaim, ProcessClaim, TheftClaimView, TheftReview};
use crate::error::ClaimError;
use crate::lifecycle;
use crate::ports::{with_contract, ClaimsPort, ContractSession};
use crate::repair::{RepairOrder, RepairOrderQuery, RepairOrderView};

/// Service for claims, theft review and repair orders
pub struct ClaimService {
    claims: Arc<dyn ClaimsPort>,
    contracts: Arc<dyn ContractPort>,
    users: Arc<dyn UserPort>,
}

impl ClaimService {
    /// Creates a new claim service
    ///
    /// # Arguments
    ///
    /// * `claims` - Record store for claims and repair orders
    /// * `contracts` - Record store for contracts, used by read-only projections
    /// * `users` - Record store for users, used to name theft claimants
    pub fn new(
        claims: Arc<dyn ClaimsPort>,
        contracts: Arc<dyn ContractPort>,
        users: Arc<dyn UserPort>,
    ) -> Self {
        Self {
            claims,
            contracts,
            users,
        }
    }

    // ========================================================================
    // Claims
    // ========================================================================

    /// Lists claims passing the query
    #[instrument(skip(self))]
    pub async fn list_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.claims.find_claims(&query).await?)
    }

    /// Files a new claim against a contract
    ///
    /// The claim starts in `New` and its id is appended to the contract's
    /// claim index in the same session.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the contract does not exist; nothing is written
    /// * `ContractVoid` - the contract has been terminated
    /// * `Conflict` - the claim id is already taken
    #[instrument(skip(self, request), fields(contract_id = %request.contract_uuid))]
    pub async fn file_claim(&self, request: FileClaim) -> Result<Claim, ClaimError> {
        let contract_id = request.contract_uuid;
        let claim = with_contract(self.claims.as_ref(), contract_id, move |session| {
            Box::pin(file_in_session(session, request))
        })
        .await?;

        info!(claim_id = %claim.uuid, is_theft = claim.is_theft, "claim filed");
        Ok(claim)
    }

    /// Moves a claim to repair, reimbursement or rejection
    ///
    /// Approving a repair opens a repair order for the contract's item.
    /// Reimbursing a confirmed theft voids the contract. All writes commit
    /// together.
    #[instrument(
        skip(self, request),
        fields(claim_id = %request.uuid, contract_id = %request.contract_uuid, target = %request.status)
    )]
    pub async fn process_claim(&self, request: ProcessClaim) -> Result<Claim, ClaimError> {
        let contract_id = request.contract_uuid;
        let claim = with_contract(self.claims.as_ref(), contract_id, move |session| {
            Box::pin(process_in_session(session, request))
        })
        .await?;

        info!(status = %claim.status, "claim processed");
        Ok(claim)
    }

    // ========================================================================
    // Theft review
    // ========================================================================

    /// Lists theft claims awaiting review, with the item and holder name
    ///
    /// A claim whose contract or holder cannot be found fails the whole call.
    #[instrument(skip(self))]
    pub async fn list_theft_claims(&self) -> Result<Vec<TheftClaimView>, ClaimError> {
        let claims = self.claims.find_claims(&ClaimQuery::pending_theft()).await?;

        let mut views = Vec::with_capacity(claims.len());
        for claim in claims {
            let contract = self.contracts.get_contract(claim.contract_uuid).await?;
            let user = self.users.get_user(&contract.username).await?;
            views.push(TheftClaimView {
                uuid: claim.uuid,
                contract_uuid: claim.contract_uuid,
                item: contract.item,
                description: claim.description,
                name: user.display_name(),
            });
        }
        Ok(views)
    }

    /// Records the authorities' verdict on a theft claim
    #[instrument(
        skip(self, review),
        fields(claim_id = %review.uuid, confirmed = review.confirmed)
    )]
    pub async fn process_theft_claim(&self, review: TheftReview) -> Result<Claim, ClaimError> {
        let contract_id = review.contract_uuid;
        let claim = with_contract(self.claims.as_ref(), contract_id, move |session| {
            Box::pin(review_in_session(session, review))
        })
        .await?;

        info!(status = %claim.status, "theft claim reviewed");
        Ok(claim)
    }

    // ========================================================================
    // Repair orders
    // ========================================================================

    /// Lists repair orders that are not ready yet
    #[instrument(skip(self))]
    pub async fn list_repair_orders(&self) -> Result<Vec<RepairOrderView>, ClaimError> {
        let orders = self
            .claims
            .find_repair_orders(&RepairOrderQuery::open_orders())
            .await?;
        Ok(orders.iter().map(RepairOrder::view).collect())
    }

    /// Marks a repair order ready and flags its claim as repaired
    ///
    /// The claim update is best effort: a missing claim does not fail the
    /// call, any other store error does.
    #[instrument(skip(self))]
    pub async fn complete_repair_order(&self, claim_id: ClaimId) -> Result<RepairOrder, ClaimError> {
        let mut order = self.claims.get_repair_order(claim_id).await?;
        order.ready = true;
        self.claims.save_repair_order(&order).await?;
        info!("repair order ready");

        match self.claims.get_claim(order.contract_uuid, order.claim_uuid).await {
            Ok(mut claim) => {
                claim.repaired = true;
                self.claims.save_claim(&claim).await?;
            }
            Err(e) if e.is_not_found() => {
                debug!("no claim for completed repair order, skipping");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(order)
    }

    // ========================================================================
    // Claim index
    // ========================================================================

    /// Claims of a contract, read from the claims themselves
    #[instrument(skip(self))]
    pub async fn contract_claims(&self, contract_id: ContractId) -> Result<Vec<Claim>, ClaimError> {
        self.contracts.get_contract(contract_id).await?;
        Ok(self
            .claims
            .find_claims(&ClaimQuery::for_contract(contract_id))
            .await?)
    }

    /// Recomputes a contract's cached claim index from its claims
    #[instrument(skip(self))]
    pub async fn rebuild_claim_index(&self, contract_id: ContractId) -> Result<Contract, ClaimError> {
        let contract = with_contract(self.claims.as_ref(), contract_id, move |session| {
            Box::pin(rebuild_in_session(session))
        })
        .await?;

        info!(claims = contract.claim_index.len(), "claim index rebuilt");
        Ok(contract)
    }
}

async fn file_in_session(
    session: &mut Box<dyn ContractSession>,
    request: FileClaim,
) -> Result<Claim, ClaimError> {
    let mut contract = session.contract().clone();
    lifecycle::ensure_fileable(&contract)?;

    let claim = Claim::file(
        request.uuid.unwrap_or_else(ClaimId::new_v7),
        contract.uuid,
        request.date,
        request.description,
        request.is_theft,
    );
    session.insert_claim(&claim).await?;

    contract.record_claim(claim.uuid);
    session.save_contract(&contract).await?;
    Ok(claim)
}

async fn process_in_session(
    session: &mut Box<dyn ContractSession>,
    request: ProcessClaim,
) -> Result<Claim, ClaimError> {
    let mut claim = session.get_claim(request.uuid).await?;
    let mut contract = session.contract().clone();

    let effects = lifecycle::process(&mut claim, &contract, request.status, request.reimbursable)?;

    if let Some(order) = &effects.repair_order {
        session.insert_repair_order(order).await?;
    }
    if effects.void_contract {
        contract.mark_void();
        session.save_contract(&contract).await?;
    }
    session.save_claim(&claim).await?;
    Ok(claim)
}

async fn review_in_session(
    session: &mut Box<dyn ContractSession>,
    review: TheftReview,
) -> Result<Claim, ClaimError> {
    let mut claim = session.get_claim(review.uuid).await?;
    lifecycle::review_theft(&mut claim, review.confirmed, review.file_reference)?;
    session.save_claim(&claim).await?;
    Ok(claim)
}

async fn rebuild_in_session(session: &mut Box<dyn ContractSession>) -> Result<Contract, ClaimError> {
    let claims = session.claims().await?;
    let mut contract = session.contract().clone();
    contract.claim_index = claims.iter().map(|c| c.uuid).collect();
    session.save_contract(&contract).await?;
    Ok(contract)
}
