//! User repository

use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// Database row for `users`
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Repository for user accounts
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<UserRow, DatabaseError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT username, password_hash, first_name, last_name FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("User", username))
    }

    /// Inserts a user; a taken username is a duplicate entry
    pub async fn insert(&self, row: &UserRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (username, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&row.username)
        .bind(&row.password_hash)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Writes the full row, inserting it when absent
    pub async fn upsert(&self, row: &UserRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (username, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (username) DO UPDATE SET \
                 password_hash = EXCLUDED.password_hash, \
                 first_name = EXCLUDED.first_name, \
                 last_name = EXCLUDED.last_name",
        )
        .bind(&row.username)
        .bind(&row.password_hash)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
