//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the shop insurance entities.
//! These fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{ClaimId, ContractId, ContractTypeId};
use domain_contract::{ContractType, Item};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard contract start (Jan 1, 2024)
    pub fn contract_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Standard contract end, one year after the start
    pub fn contract_end() -> DateTime<Utc> {
        Self::contract_start() + Duration::days(365)
    }

    /// Standard date of damage
    pub fn claim_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic contract type ID for testing
    pub fn contract_type_id() -> ContractTypeId {
        ContractTypeId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic contract ID for testing
    pub fn contract_id() -> ContractId {
        ContractId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic claim ID for testing
    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }
}

/// Fixture for decimal test data
pub struct DecimalFixtures;

impl DecimalFixtures {
    /// Retail price of the standard item
    pub fn item_price() -> Decimal {
        dec!(1299.00)
    }

    /// Standard reimbursement
    pub fn reimbursement() -> Decimal {
        dec!(250.00)
    }

    /// Maximum sum insured of the standard contract type
    pub fn max_sum_insured() -> Decimal {
        dec!(5000.00)
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Test username
    pub fn username() -> &'static str {
        "jdoe"
    }

    /// Test password
    pub fn password() -> &'static str {
        "correct horse battery staple"
    }

    /// Test first name
    pub fn first_name() -> &'static str {
        "John"
    }

    /// Test last name
    pub fn last_name() -> &'static str {
        "Doe"
    }

    /// Standard shop type
    pub fn shop_type() -> &'static str {
        "Bike Shop"
    }
}

/// Fixture for whole entities
pub struct EntityFixtures;

impl EntityFixtures {
    /// A bicycle sold by the standard shop
    pub fn item() -> Item {
        Item {
            id: 1,
            brand: "Canyon".to_string(),
            model: "Grail CF".to_string(),
            price: DecimalFixtures::item_price(),
            description: "Gravel bike".to_string(),
            serial_no: "CYN-2024-0001".to_string(),
        }
    }

    /// An active contract type accepting terms of 30 to 730 days
    pub fn contract_type() -> ContractType {
        ContractType {
            uuid: IdFixtures::contract_type_id(),
            shop_type: StringFixtures::shop_type().to_string(),
            formula_per_day: "price * 0.0005".to_string(),
            max_sum_insured: DecimalFixtures::max_sum_insured(),
            theft_insured: true,
            description: "Bicycle damage and theft cover".to_string(),
            conditions: "Frame and components, excluding wear".to_string(),
            active: true,
            min_duration_days: 30,
            max_duration_days: 730,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporal_fixtures_ordering() {
        let start = TemporalFixtures::contract_start();
        let claim = TemporalFixtures::claim_date();
        let end = TemporalFixtures::contract_end();

        assert!(start < claim);
        assert!(claim < end);
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        assert_eq!(IdFixtures::contract_id(), IdFixtures::contract_id());
        assert_ne!(*IdFixtures::contract_id().as_uuid(), *IdFixtures::claim_id().as_uuid());
    }

    #[test]
    fn test_standard_term_fits_standard_type() {
        let checked = EntityFixtures::contract_type()
            .check_term(TemporalFixtures::contract_start(), TemporalFixtures::contract_end());
        assert!(checked.is_ok());
    }
}
