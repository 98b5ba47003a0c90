//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than bare `assert_eq!`.

use core_kernel::ErrorKind;
use domain_claims::{Claim, ClaimStatus};
use domain_contract::Contract;

/// Asserts that a claim carries the expected status
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} has status {:?}, expected {:?}",
        claim.uuid, claim.status, expected
    );
}

/// Asserts that claims are ordered by date, ties broken by ID
pub fn assert_claims_ordered(claims: &[Claim]) {
    for pair in claims.windows(2) {
        let ordered = (pair[0].date, pair[0].uuid) <= (pair[1].date, pair[1].uuid);
        assert!(
            ordered,
            "Claims out of order: {} ({}) before {} ({})",
            pair[0].uuid, pair[0].date, pair[1].uuid, pair[1].date
        );
    }
}

/// Asserts that a contract's claim index lists exactly the given claims
///
/// Order is ignored; duplicates in the index fail the assertion.
pub fn assert_claim_index(contract: &Contract, claims: &[Claim]) {
    let mut indexed: Vec<_> = contract.claim_index.clone();
    indexed.sort();
    let before = indexed.len();
    indexed.dedup();
    assert_eq!(before, indexed.len(), "Claim index of {} has duplicates", contract.uuid);

    let mut expected: Vec<_> = claims.iter().map(|c| c.uuid).collect();
    expected.sort();
    assert_eq!(indexed, expected, "Claim index of {} does not match its claims", contract.uuid);
}

/// Asserts that an operation failed with the expected error kind
///
/// # Panics
///
/// Panics on success or on a different kind
pub fn assert_error_kind<T: std::fmt::Debug>(result: Result<T, ErrorKind>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("Expected {:?} error, got Ok({:?})", expected, value),
        Err(kind) => assert_eq!(kind, expected, "Expected {:?} error, got {:?}", expected, kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ClaimBuilder;
    use chrono::Duration;
    use core_kernel::ContractId;

    #[test]
    fn test_claims_ordered_accepts_sorted() {
        let contract_id = ContractId::new();
        let first = ClaimBuilder::new(contract_id).build();
        let later = ClaimBuilder::new(contract_id)
            .on(first.date + Duration::days(1))
            .build();

        assert_claims_ordered(&[first, later]);
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn test_claims_ordered_rejects_unsorted() {
        let contract_id = ContractId::new();
        let first = ClaimBuilder::new(contract_id).build();
        let later = ClaimBuilder::new(contract_id)
            .on(first.date + Duration::days(1))
            .build();

        assert_claims_ordered(&[later, first]);
    }

    #[test]
    fn test_error_kind_matches() {
        assert_error_kind::<()>(Err(ErrorKind::NotFound), ErrorKind::NotFound);
    }
}
