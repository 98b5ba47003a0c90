//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and repository row types
//! - Reports database failures as `PortError`
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresContractAdapter;
//! use domain_contract::ContractPort;
//!
//! let adapter = PostgresContractAdapter::new(pool);
//! let contract = adapter.get_contract(contract_id).await?;
//! ```

pub mod user;
pub mod contract;
pub mod claims;

pub use user::PostgresUserAdapter;
pub use contract::PostgresContractAdapter;
pub use claims::{PostgresClaimsAdapter, PostgresContractSession};

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult, PortError};

use crate::error::DatabaseError;

/// Maps a duplicate key to a port conflict naming the entity
pub(crate) fn conflict_on_duplicate(
    entity: &str,
    id: impl std::fmt::Display,
) -> impl FnOnce(DatabaseError) -> PortError {
    let message = format!("{entity} {id} already exists");
    move |e| match e {
        DatabaseError::DuplicateEntry(_) => PortError::conflict(message),
        e => e.into(),
    }
}

/// Checks database connectivity with a `SELECT 1` round trip
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        },
        Err(e) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(format!("Database error: {}", e)),
            checked_at: Utc::now(),
        },
    }
}
