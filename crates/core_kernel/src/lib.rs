//! Core Kernel - Foundational types shared by every crate of the shop insurance system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for contract types, contracts and claims
//! - The port error type and marker traits for the ports and adapters pattern
//! - A shared error classification used to map domain errors onto responses

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{ContractTypeId, ContractId, ClaimId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::ErrorKind;
