//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the shop insurance system using SQLx.
//!
//! # Layout
//!
//! - [`repositories`] own the SQL and map rows with `FromRow`
//! - [`adapters`] implement the domain ports on top of the repositories
//! - [`pool`] builds the connection pool and applies the embedded migrations
//!
//! Claims work that spans several records runs in a
//! [`PostgresContractSession`]: one transaction holding the row lock of the
//! contract it was opened on.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresClaimsAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/shop_insurance")).await?;
//! run_migrations(&pool).await?;
//! let claims = PostgresClaimsAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use adapters::{
    PostgresClaimsAdapter, PostgresContractAdapter, PostgresContractSession, PostgresUserAdapter,
};
