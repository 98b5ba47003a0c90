//! Contract Domain
//!
//! This crate covers what a shop sells: contract types (the catalogue of
//! insurance products a shop may offer) and contracts (one insured item for
//! one user under one contract type).
//!
//! # Key Concepts
//!
//! - **ContractType**: reference product with duration bounds and a theft
//!   coverage flag; only its `active` flag changes after creation
//! - **Contract**: the sale itself, carrying an embedded [`Item`] and a
//!   cached list of its claim ids
//! - **Void**: a terminated contract; it accepts no new claims
//!
//! # Example
//!
//! ```rust,ignore
//! let service = ContractService::new(contracts, users);
//! let contract = service.create_contract(request).await?;
//! assert!(!contract.void);
//! ```

pub mod contract_type;
pub mod contract;
pub mod error;
pub mod ports;
pub mod services;

pub use contract_type::{ContractType, ContractTypeQuery};
pub use contract::{Contract, ContractQuery, Item, NewContract};
pub use error::ContractError;
pub use ports::{ContractPort, ContractPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockContractPort;
pub use services::ContractService;
