//! Integration tests for the party domain

use std::sync::Arc;

use core_kernel::ErrorKind;
use domain_party::{Argon2Hasher, MockUserPort, NewUser, User, UserError, UserService};

fn service_with(port: MockUserPort) -> UserService {
    UserService::new(Arc::new(port), Arc::new(Argon2Hasher::new()))
}

fn new_user(username: &str, password: &str, first: &str, last: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: password.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

// ============================================================================
// createUser
// ============================================================================

#[tokio::test]
async fn test_create_user_twice_returns_first_stored_names() {
    let service = service_with(MockUserPort::new());

    let first = service
        .create_user(new_user("jdoe", "pw1", "John", "Doe"))
        .await
        .unwrap();
    let second = service
        .create_user(new_user("jdoe", "pw2", "Jack", "Dane"))
        .await
        .unwrap();

    assert_eq!(first.first_name, "John");
    assert_eq!(second.first_name, "John");
    assert_eq!(second.last_name, "Doe");
    // The first credential is kept as well
    assert!(service.authenticate("jdoe", "pw1").await.unwrap());
    assert!(!service.authenticate("jdoe", "pw2").await.unwrap());
}

#[tokio::test]
async fn test_create_user_stores_hash_not_plaintext() {
    let service = service_with(MockUserPort::new());
    let user = service
        .create_user(new_user("jdoe", "secret", "John", "Doe"))
        .await
        .unwrap();

    assert_ne!(user.password_hash, "secret");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_create_user_requires_username() {
    let service = service_with(MockUserPort::new());
    let err = service
        .create_user(new_user("", "pw", "A", "B"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[tokio::test]
async fn test_create_user_requires_password_for_new_user() {
    let service = service_with(MockUserPort::new());
    let err = service
        .create_user(new_user("jdoe", "", "A", "B"))
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::InvalidInput(_)));
}

// ============================================================================
// provision
// ============================================================================

#[tokio::test]
async fn test_provision_existing_user_is_untouched() {
    let port = MockUserPort::with_users(vec![User::new("jdoe", "h", "John", "Doe")]).await;
    let service = service_with(port);

    let user = service
        .provision("jdoe", Some("other"), "X", "Y")
        .await
        .unwrap();
    assert_eq!(user.first_name, "John");
    assert_eq!(user.password_hash, "h");
}

#[tokio::test]
async fn test_provision_absent_user_without_password_is_not_found() {
    let service = service_with(MockUserPort::new());
    let err = service.provision("ghost", None, "", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_provision_absent_user_with_password_creates() {
    let service = service_with(MockUserPort::new());
    let user = service
        .provision("new", Some("pw"), "Nina", "West")
        .await
        .unwrap();
    assert_eq!(user.display_name(), "Nina West");
    assert!(service.authenticate("new", "pw").await.unwrap());
}

// ============================================================================
// authenticate / info / password
// ============================================================================

#[tokio::test]
async fn test_authenticate_unknown_user_is_false() {
    let service = service_with(MockUserPort::new());
    assert!(!service.authenticate("nobody", "pw").await.unwrap());
}

#[tokio::test]
async fn test_user_info() {
    let service = service_with(MockUserPort::new());
    service
        .create_user(new_user("jdoe", "pw", "John", "Doe"))
        .await
        .unwrap();

    let info = service.user_info("jdoe").await.unwrap().unwrap();
    assert_eq!(info.first_name, "John");
    assert!(service.user_info("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_password() {
    let service = service_with(MockUserPort::new());
    service
        .create_user(new_user("jdoe", "old", "John", "Doe"))
        .await
        .unwrap();

    assert!(service.update_password("jdoe", "new").await.unwrap());
    assert!(service.authenticate("jdoe", "new").await.unwrap());
    assert!(!service.authenticate("jdoe", "old").await.unwrap());
}

#[tokio::test]
async fn test_update_password_errors() {
    let service = service_with(MockUserPort::new());

    let err = service.update_password("jdoe", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);

    let err = service.update_password("ghost", "pw").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
