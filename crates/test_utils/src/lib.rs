//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! shop insurance test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `stores`: In-memory ports wired into services
//! - `database`: PostgreSQL test container management
//! - `assertions`: Custom assertion helpers for domain types

pub mod fixtures;
pub mod builders;
pub mod stores;
pub mod database;
pub mod assertions;

pub use fixtures::*;
pub use builders::*;
pub use stores::*;
pub use database::*;
pub use assertions::*;
