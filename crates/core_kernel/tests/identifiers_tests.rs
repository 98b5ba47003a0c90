//! Unit tests for the identifiers module
//!
//! Tests cover creation, parsing, conversion, and display formatting of
//! the contract-type, contract and claim identifiers.

use core_kernel::{ClaimId, ContractId, ContractTypeId};
use proptest::prelude::*;
use uuid::Uuid;

mod contract_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ContractId::new();
        let id2 = ContractId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ContractId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ContractId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ContractId::prefix(), "CON");
        assert_eq!(ContractTypeId::prefix(), "CTY");
        assert_eq!(ClaimId::prefix(), "CLM");
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ContractId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("CON-not-a-uuid".parse::<ContractId>().is_err());
    }
}

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let id = ClaimId::new();
        assert!(id.to_string().starts_with("CLM-"));
    }

    #[test]
    fn test_json_deserializes_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id: ClaimId = serde_json::from_str(&format!("\"{}\"", uuid)).unwrap();
        assert_eq!(*id.as_uuid(), uuid);
    }
}

proptest! {
    #[test]
    fn prop_display_then_parse_preserves_claim_id(bytes in any::<[u8; 16]>()) {
        let id = ClaimId::from_uuid(Uuid::from_bytes(bytes));
        let parsed: ClaimId = id.to_string().parse().unwrap();
        prop_assert_eq!(id, parsed);
    }
}
