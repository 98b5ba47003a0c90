//! Repository implementations for domain entities
//!
//! Repositories own the SQL. Every query is a runtime-checked `sqlx` query
//! mapped onto a `FromRow` row struct; the adapters translate rows into
//! domain types.
//!
//! Query functions are generic over [`sqlx::PgExecutor`] so the same SQL
//! runs against the pool or inside a contract session's transaction.

pub mod contract_types;
pub mod contracts;
pub mod users;
pub mod claims;
pub mod repair_orders;

pub use contract_types::{ContractTypeRepository, ContractTypeRow};
pub use contracts::{ContractRepository, ContractRow};
pub use users::{UserRepository, UserRow};
pub use claims::{ClaimRepository, ClaimRow, ClaimFilter};
pub use repair_orders::{RepairOrderRepository, RepairOrderRow};
