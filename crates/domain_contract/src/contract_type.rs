//! Contract type catalogue

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ContractTypeId;

/// An insurance product a shop can sell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractType {
    pub uuid: ContractTypeId,
    /// Kind of shop the product is sold in, e.g. "Bikes"
    pub shop_type: String,
    /// Premium formula expression, kept verbatim
    pub formula_per_day: String,
    pub max_sum_insured: Decimal,
    pub theft_insured: bool,
    pub description: String,
    pub conditions: String,
    pub active: bool,
    /// Shortest allowed term in days, 0 for no bound
    pub min_duration_days: i32,
    /// Longest allowed term in days, 0 for no bound
    pub max_duration_days: i32,
}

impl ContractType {
    /// Checks a contract term against the duration bounds
    ///
    /// The end must lie strictly after the start. The bounds apply to the
    /// term in whole days; a bound of zero or less is treated as absent.
    /// Returns the violated rule as a message.
    pub fn check_term(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), String> {
        if end <= start {
            return Err("end date must be after start date".to_string());
        }
        let days = (end - start).num_days();
        if self.min_duration_days > 0 && days < i64::from(self.min_duration_days) {
            return Err(format!(
                "term of {} days is shorter than the minimum of {} days",
                days, self.min_duration_days
            ));
        }
        if self.max_duration_days > 0 && days > i64::from(self.max_duration_days) {
            return Err(format!(
                "term of {} days exceeds the maximum of {} days",
                days, self.max_duration_days
            ));
        }
        Ok(())
    }
}

/// Filter for listing contract types
///
/// With no shop type every type is returned, inactive ones included. A shop
/// type narrows the result to active types whose shop type contains it,
/// ignoring case.
#[derive(Debug, Clone, Default)]
pub struct ContractTypeQuery {
    pub shop_type: Option<String>,
}

impl ContractTypeQuery {
    /// Query used by merchants browsing what their shop may sell
    pub fn for_shop(shop_type: impl Into<String>) -> Self {
        Self {
            shop_type: Some(shop_type.into()),
        }
    }

    /// Returns true if the contract type passes this filter
    pub fn matches(&self, contract_type: &ContractType) -> bool {
        match &self.shop_type {
            None => true,
            Some(shop_type) => {
                contract_type.active
                    && contract_type
                        .shop_type
                        .to_lowercase()
                        .contains(&shop_type.to_lowercase())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn check(ct: &ContractType, term: Duration) -> Result<(), String> {
        ct.check_term(start(), start() + term)
    }

    fn bikes(min: i32, max: i32) -> ContractType {
        ContractType {
            uuid: ContractTypeId::new(),
            shop_type: "Bikes".to_string(),
            formula_per_day: "price * 0.01".to_string(),
            max_sum_insured: dec!(5000),
            theft_insured: true,
            description: String::new(),
            conditions: String::new(),
            active: true,
            min_duration_days: min,
            max_duration_days: max,
        }
    }

    #[test]
    fn test_check_term_without_bounds() {
        let ct = bikes(0, 0);
        assert!(check(&ct, Duration::days(1)).is_ok());
        assert!(check(&ct, Duration::days(10_000)).is_ok());
        assert!(check(&ct, Duration::zero()).is_err());
        assert!(check(&ct, Duration::hours(-1)).is_err());
    }

    #[test]
    fn test_check_term_accepts_sub_day_term() {
        assert!(check(&bikes(0, 0), Duration::hours(12)).is_ok());
        assert!(check(&bikes(0, 30), Duration::seconds(1)).is_ok());
        assert!(check(&bikes(1, 0), Duration::hours(12)).is_err());
    }

    #[test]
    fn test_check_term_with_bounds() {
        let ct = bikes(30, 365);
        assert!(check(&ct, Duration::days(29)).is_err());
        assert!(check(&ct, Duration::days(30)).is_ok());
        assert!(check(&ct, Duration::days(365) + Duration::hours(23)).is_ok());
        assert!(check(&ct, Duration::days(366)).is_err());
    }

    #[test]
    fn test_query_matches_case_insensitively() {
        let ct = bikes(0, 0);
        assert!(ContractTypeQuery::for_shop("bik").matches(&ct));
        assert!(ContractTypeQuery::for_shop("BIKES").matches(&ct));
        assert!(!ContractTypeQuery::for_shop("phones").matches(&ct));
    }

    #[test]
    fn test_query_skips_inactive_only_when_filtering() {
        let mut ct = bikes(0, 0);
        ct.active = false;
        assert!(ContractTypeQuery::default().matches(&ct));
        assert!(!ContractTypeQuery::for_shop("bikes").matches(&ct));
    }
}
