//! Integration tests for the contract domain

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{ContractId, ContractTypeId, ErrorKind};
use domain_contract::{
    ContractError, ContractPort, ContractQuery, ContractService, ContractType, ContractTypeQuery,
    Item, MockContractPort, NewContract,
};
use domain_party::{Argon2Hasher, MockUserPort, User, UserPort, UserService};

fn contract_type(shop_type: &str, active: bool) -> ContractType {
    ContractType {
        uuid: ContractTypeId::new(),
        shop_type: shop_type.to_string(),
        formula_per_day: "price * 0.002".to_string(),
        max_sum_insured: dec!(2500),
        theft_insured: true,
        description: format!("{} cover", shop_type),
        conditions: "standard".to_string(),
        active,
        min_duration_days: 30,
        max_duration_days: 730,
    }
}

fn item() -> Item {
    Item {
        id: 1,
        brand: "Trek".to_string(),
        model: "Domane".to_string(),
        price: dec!(1899.00),
        description: "Road bike".to_string(),
        serial_no: "WTU123".to_string(),
    }
}

fn sale(contract_type_uuid: ContractTypeId, username: &str, password: Option<&str>, days: i64) -> NewContract {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    NewContract {
        uuid: None,
        contract_type_uuid,
        username: username.to_string(),
        password: password.map(str::to_string),
        first_name: "Jane".to_string(),
        last_name: "Roe".to_string(),
        item: item(),
        start_date: start,
        end_date: start + Duration::days(days),
    }
}

struct Fixture {
    contracts: Arc<MockContractPort>,
    users: Arc<MockUserPort>,
    service: ContractService,
}

async fn fixture(types: Vec<ContractType>) -> Fixture {
    let contracts = Arc::new(MockContractPort::with_contract_types(types).await);
    let users = Arc::new(MockUserPort::new());
    let user_service = Arc::new(UserService::new(users.clone(), Arc::new(Argon2Hasher::new())));
    let service = ContractService::new(contracts.clone(), user_service);
    Fixture { contracts, users, service }
}

// ============================================================================
// Contract type catalogue
// ============================================================================

#[tokio::test]
async fn test_empty_filter_lists_all_types_including_inactive() {
    let f = fixture(vec![
        contract_type("Bikes", true),
        contract_type("Phones", false),
        contract_type("E-Bikes", true),
    ])
    .await;

    let all = f.service.list_contract_types(ContractTypeQuery::default()).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_shop_filter_returns_active_case_insensitive_matches() {
    let f = fixture(vec![
        contract_type("Bikes", true),
        contract_type("E-BIKES", true),
        contract_type("bikes outlet", false),
        contract_type("Phones", true),
    ])
    .await;

    let found = f
        .service
        .list_contract_types(ContractTypeQuery::for_shop("bikes"))
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|ct| ct.active));
    assert!(found.iter().all(|ct| ct.shop_type.to_lowercase().contains("bikes")));
}

#[tokio::test]
async fn test_set_contract_type_active() {
    let ct = contract_type("Bikes", true);
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;

    let updated = f.service.set_contract_type_active(id, false).await.unwrap();
    assert!(!updated.active);
    assert!(!f.contracts.get_contract_type(id).await.unwrap().active);
}

#[tokio::test]
async fn test_set_contract_type_active_unknown_is_not_found() {
    let f = fixture(vec![]).await;
    let err = f
        .service
        .set_contract_type_active(ContractTypeId::new(), true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_create_contract_type_twice_conflicts() {
    let f = fixture(vec![]).await;
    let ct = contract_type("Bikes", true);

    f.service.create_contract_type(ct.clone()).await.unwrap();
    let err = f.service.create_contract_type(ct).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

// ============================================================================
// Contract sales
// ============================================================================

#[tokio::test]
async fn test_create_contract_provisions_new_user() {
    let ct = contract_type("Bikes", true);
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;

    let contract = f
        .service
        .create_contract(sale(id, "jroe", Some("pw"), 365))
        .await
        .unwrap();

    assert!(!contract.void);
    assert!(contract.claim_index.is_empty());
    assert_eq!(contract.item, item());
    assert_eq!(f.users.get_user("jroe").await.unwrap().first_name, "Jane");
    assert_eq!(f.contracts.get_contract(contract.uuid).await.unwrap(), contract);
}

#[tokio::test]
async fn test_create_contract_keeps_existing_user() {
    let ct = contract_type("Bikes", true);
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;
    f.users.create_user(&User::new("jroe", "h", "Joan", "Rowe")).await.unwrap();

    f.service.create_contract(sale(id, "jroe", None, 365)).await.unwrap();

    let user = f.users.get_user("jroe").await.unwrap();
    assert_eq!(user.first_name, "Joan");
    assert_eq!(user.password_hash, "h");
}

#[tokio::test]
async fn test_create_contract_uses_given_id() {
    let ct = contract_type("Bikes", true);
    let type_id = ct.uuid;
    let f = fixture(vec![ct]).await;
    let contract_id = ContractId::new();

    let mut request = sale(type_id, "jroe", Some("pw"), 365);
    request.uuid = Some(contract_id);
    let contract = f.service.create_contract(request).await.unwrap();
    assert_eq!(contract.uuid, contract_id);
}

#[tokio::test]
async fn test_create_contract_unknown_user_without_password() {
    let ct = contract_type("Bikes", true);
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;

    let err = f.service.create_contract(sale(id, "ghost", None, 365)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(f.contracts.contract_count().await, 0);
}

#[tokio::test]
async fn test_create_contract_unknown_type_creates_nothing() {
    let f = fixture(vec![]).await;

    let err = f
        .service
        .create_contract(sale(ContractTypeId::new(), "jroe", Some("pw"), 365))
        .await
        .unwrap_err();

    assert!(matches!(err, ContractError::NotFound(_)));
    assert_eq!(f.users.len().await, 0);
    assert_eq!(f.contracts.contract_count().await, 0);
}

#[tokio::test]
async fn test_create_contract_inactive_type_is_rejected() {
    let ct = contract_type("Bikes", false);
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;

    let err = f.service.create_contract(sale(id, "jroe", Some("pw"), 365)).await.unwrap_err();
    assert!(matches!(err, ContractError::InactiveContractType(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(f.users.len().await, 0);
}

#[tokio::test]
async fn test_create_contract_term_out_of_bounds() {
    let ct = contract_type("Bikes", true);
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;

    for days in [-1, 0, 10, 731] {
        let err = f
            .service
            .create_contract(sale(id, "jroe", Some("pw"), days))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::InvalidTerm(_)), "days = {}", days);
    }
    assert_eq!(f.users.len().await, 0);
}

#[tokio::test]
async fn test_create_contract_sub_day_term_without_bounds() {
    let mut ct = contract_type("Rentals", true);
    ct.min_duration_days = 0;
    ct.max_duration_days = 0;
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;

    let mut request = sale(id, "jroe", Some("pw"), 0);
    request.end_date = request.start_date + Duration::hours(12);
    let contract = f.service.create_contract(request).await.unwrap();

    assert_eq!(contract.term_days(), 0);
    assert!(f.contracts.get_contract(contract.uuid).await.is_ok());
}

#[tokio::test]
async fn test_list_contracts_by_username() {
    let ct = contract_type("Bikes", true);
    let id = ct.uuid;
    let f = fixture(vec![ct]).await;

    f.service.create_contract(sale(id, "a", Some("pw"), 100)).await.unwrap();
    f.service.create_contract(sale(id, "a", None, 200)).await.unwrap();
    f.service.create_contract(sale(id, "b", Some("pw"), 300)).await.unwrap();

    let all = f.service.list_contracts(ContractQuery::default()).await.unwrap();
    let mine = f.service.list_contracts(ContractQuery::by_username("a")).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(mine.len(), 2);
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn prop_shop_filter_never_returns_inactive(shop in "[A-Za-z]{1,12}", needle in "[A-Za-z]{0,4}") {
        let ct = contract_type(&shop, false);
        prop_assert!(!ContractTypeQuery::for_shop(needle).matches(&ct));
    }

    #[test]
    fn prop_shop_filter_ignores_case(shop in "[A-Za-z]{1,12}") {
        let ct = contract_type(&shop, true);
        prop_assert!(ContractTypeQuery::for_shop(shop.to_uppercase()).matches(&ct));
        prop_assert!(ContractTypeQuery::for_shop(shop.to_lowercase()).matches(&ct));
    }
}
