//! Claim lifecycle rules
//!
//! Pure functions deciding what a transition does. They never touch the
//! store: the caller applies the returned effects inside a contract session.
//! A rejected transition leaves the claim untouched.

use rust_decimal::Decimal;

use domain_contract::Contract;

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::repair::RepairOrder;
use crate::status::ClaimStatus;

/// Records a processed transition produces besides the claim itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// Repair order to create
    pub repair_order: Option<RepairOrder>,
    /// The contract must be voided
    pub void_contract: bool,
}

/// Checks that a contract accepts a new claim
pub fn ensure_fileable(contract: &Contract) -> Result<(), ClaimError> {
    if contract.void {
        return Err(ClaimError::ContractVoid(contract.uuid));
    }
    Ok(())
}

/// Checks that a claim may leave its current status via `process`
///
/// A theft claim in `New` must be reviewed first; apart from that only `New`
/// claims and confirmed thefts can be processed.
pub fn ensure_processable(claim: &Claim) -> Result<(), ClaimError> {
    if claim.awaits_theft_review() {
        return Err(ClaimError::TheftNotConfirmed);
    }
    let confirmed_theft = claim.is_theft && claim.status == ClaimStatus::TheftConfirmed;
    if claim.status != ClaimStatus::New && !confirmed_theft {
        return Err(ClaimError::AlreadyProcessed(claim.status));
    }
    Ok(())
}

/// Moves a claim to `target`
///
/// `contract` is the claim's own contract; it supplies the item copied into
/// a repair order. `amount` is only read for reimbursement.
pub fn process(
    claim: &mut Claim,
    contract: &Contract,
    target: ClaimStatus,
    amount: Decimal,
) -> Result<Effects, ClaimError> {
    ensure_processable(claim)?;

    let (reimbursable, effects) = match target {
        ClaimStatus::Repair => {
            if claim.is_theft {
                return Err(ClaimError::StolenItemRepair);
            }
            let order = RepairOrder::open(claim.uuid, contract);
            (
                Decimal::ZERO,
                Effects {
                    repair_order: Some(order),
                    void_contract: false,
                },
            )
        }
        ClaimStatus::Reimbursement => {
            if amount < Decimal::ZERO {
                return Err(ClaimError::NegativeAmount(amount));
            }
            (
                amount,
                Effects {
                    repair_order: None,
                    void_contract: claim.is_theft,
                },
            )
        }
        ClaimStatus::Rejected => (Decimal::ZERO, Effects::default()),
        other => return Err(ClaimError::UnknownStatusChange(other)),
    };

    claim.status = target;
    claim.reimbursable = reimbursable;
    Ok(effects)
}

/// Records the authorities' verdict on a theft claim
///
/// The file reference is stored whatever the verdict.
pub fn review_theft(
    claim: &mut Claim,
    confirmed: bool,
    file_reference: Option<String>,
) -> Result<(), ClaimError> {
    if !claim.awaits_theft_review() {
        return Err(ClaimError::NotUnderTheftReview);
    }

    claim.status = if confirmed {
        ClaimStatus::TheftConfirmed
    } else {
        ClaimStatus::Rejected
    };
    claim.file_reference = file_reference;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    use core_kernel::{ClaimId, ContractId, ContractTypeId};
    use domain_contract::Item;

    fn contract() -> Contract {
        Contract {
            uuid: ContractId::new(),
            username: "jdoe".to_string(),
            item: Item {
                id: 7,
                brand: "Apple".to_string(),
                model: "iPhone 15".to_string(),
                price: dec!(999),
                description: "phone".to_string(),
                serial_no: "SN-7".to_string(),
            },
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(365),
            void: false,
            contract_type_uuid: ContractTypeId::new(),
            claim_index: vec![],
        }
    }

    fn claim(contract: &Contract, is_theft: bool, status: ClaimStatus) -> Claim {
        let mut claim = Claim::file(ClaimId::new(), contract.uuid, Utc::now(), "", is_theft);
        claim.status = status;
        claim
    }

    #[test]
    fn test_repair_opens_order_with_contract_item() {
        let contract = contract();
        let mut claim = claim(&contract, false, ClaimStatus::New);

        let effects = process(&mut claim, &contract, ClaimStatus::Repair, dec!(50)).unwrap();

        assert_eq!(claim.status, ClaimStatus::Repair);
        assert_eq!(claim.reimbursable, Decimal::ZERO);
        let order = effects.repair_order.unwrap();
        assert_eq!(order.item, contract.item);
        assert_eq!(order.claim_uuid, claim.uuid);
        assert!(!order.ready);
        assert!(!effects.void_contract);
    }

    #[test]
    fn test_theft_reimbursement_voids_contract() {
        let contract = contract();
        let mut claim = claim(&contract, true, ClaimStatus::TheftConfirmed);

        let effects = process(&mut claim, &contract, ClaimStatus::Reimbursement, dec!(800)).unwrap();

        assert_eq!(claim.reimbursable, dec!(800));
        assert!(effects.void_contract);
        assert!(effects.repair_order.is_none());
    }

    #[test]
    fn test_ordinary_reimbursement_keeps_contract() {
        let contract = contract();
        let mut claim = claim(&contract, false, ClaimStatus::New);

        let effects = process(&mut claim, &contract, ClaimStatus::Reimbursement, dec!(120)).unwrap();
        assert!(!effects.void_contract);
    }

    #[test]
    fn test_rejected_zeroes_amount() {
        let contract = contract();
        let mut claim = claim(&contract, false, ClaimStatus::New);

        process(&mut claim, &contract, ClaimStatus::Rejected, dec!(120)).unwrap();
        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert!(claim.reimbursable.is_zero());
    }

    #[test]
    fn test_rule_order() {
        let contract = contract();

        let mut new_theft = claim(&contract, true, ClaimStatus::New);
        let err = process(&mut new_theft, &contract, ClaimStatus::Repair, dec!(0)).unwrap_err();
        assert!(matches!(err, ClaimError::TheftNotConfirmed));

        let mut done = claim(&contract, false, ClaimStatus::Repair);
        let err = process(&mut done, &contract, ClaimStatus::Rejected, dec!(0)).unwrap_err();
        assert!(matches!(err, ClaimError::AlreadyProcessed(ClaimStatus::Repair)));

        let mut confirmed = claim(&contract, true, ClaimStatus::TheftConfirmed);
        let err = process(&mut confirmed, &contract, ClaimStatus::Repair, dec!(0)).unwrap_err();
        assert!(matches!(err, ClaimError::StolenItemRepair));

        for target in [ClaimStatus::New, ClaimStatus::TheftConfirmed, ClaimStatus::Unknown] {
            let mut fresh = claim(&contract, false, ClaimStatus::New);
            let err = process(&mut fresh, &contract, target, dec!(0)).unwrap_err();
            assert!(matches!(err, ClaimError::UnknownStatusChange(_)));
        }
    }

    #[test]
    fn test_rejected_transition_leaves_claim_untouched() {
        let contract = contract();
        let mut claim = claim(&contract, false, ClaimStatus::New);
        let before = claim.clone();

        let err = process(&mut claim, &contract, ClaimStatus::Reimbursement, dec!(-1)).unwrap_err();
        assert!(matches!(err, ClaimError::NegativeAmount(_)));
        assert_eq!(claim, before);
    }

    #[test]
    fn test_review_theft() {
        let contract = contract();

        let mut confirmed = claim(&contract, true, ClaimStatus::New);
        review_theft(&mut confirmed, true, Some("PD-1".to_string())).unwrap();
        assert_eq!(confirmed.status, ClaimStatus::TheftConfirmed);
        assert_eq!(confirmed.file_reference.as_deref(), Some("PD-1"));

        let mut refused = claim(&contract, true, ClaimStatus::New);
        review_theft(&mut refused, false, Some("PD-2".to_string())).unwrap();
        assert_eq!(refused.status, ClaimStatus::Rejected);
        assert_eq!(refused.file_reference.as_deref(), Some("PD-2"));

        let mut ordinary = claim(&contract, false, ClaimStatus::New);
        assert!(review_theft(&mut ordinary, true, None).is_err());
    }

    #[test]
    fn test_void_contract_is_not_fileable() {
        let mut contract = contract();
        assert!(ensure_fileable(&contract).is_ok());
        contract.mark_void();
        assert!(matches!(ensure_fileable(&contract), Err(ClaimError::ContractVoid(_))));
    }
}
