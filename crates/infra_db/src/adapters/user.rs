//! PostgreSQL User Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_party::{User, UserPort};

use crate::repositories::{UserRepository, UserRow};

/// PostgreSQL-backed implementation of the UserPort trait
#[derive(Debug, Clone)]
pub struct PostgresUserAdapter {
    repository: UserRepository,
    pool: PgPool,
}

impl PostgresUserAdapter {
    /// Creates a new PostgreSQL user adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresUserAdapter {}

#[async_trait]
impl HealthCheckable for PostgresUserAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-user-adapter").await
    }
}

#[async_trait]
impl UserPort for PostgresUserAdapter {
    #[instrument(skip(self))]
    async fn get_user(&self, username: &str) -> Result<User, PortError> {
        debug!("Fetching user");
        let row = self.repository.get_by_username(username).await?;
        Ok(row_to_user(row))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create_user(&self, user: &User) -> Result<(), PortError> {
        self.repository
            .insert(&user_to_row(user))
            .await
            .map_err(super::conflict_on_duplicate("user", &user.username))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn save_user(&self, user: &User) -> Result<(), PortError> {
        Ok(self.repository.upsert(&user_to_row(user)).await?)
    }
}

fn row_to_user(row: UserRow) -> User {
    User::new(row.username, row.password_hash, row.first_name, row.last_name)
}

fn user_to_row(user: &User) -> UserRow {
    UserRow {
        username: user.username.clone(),
        password_hash: user.password_hash.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}
