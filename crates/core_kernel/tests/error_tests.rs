//! Tests for core_kernel error types

use core_kernel::{ErrorKind, PortError};

#[test]
fn test_error_kind_labels() {
    assert_eq!(ErrorKind::Input.as_str(), "input_error");
    assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
    assert_eq!(ErrorKind::Validation.as_str(), "validation_error");
    assert_eq!(ErrorKind::Conflict.as_str(), "conflict");
    assert_eq!(ErrorKind::Store.as_str(), "store_error");
}

#[test]
fn test_port_error_messages() {
    let error = PortError::not_found("Claim", "CLM-1");
    assert_eq!(error.to_string(), "Not found: Claim with id CLM-1");

    let error = PortError::connection("pool closed");
    assert!(error.to_string().contains("pool closed"));
    assert!(!error.is_not_found());
}
