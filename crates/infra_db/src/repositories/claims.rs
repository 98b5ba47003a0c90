//! Claim repository

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for `claims`
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub uuid: Uuid,
    pub contract_uuid: Uuid,
    pub date: DateTime<Utc>,
    pub description: String,
    pub is_theft: bool,
    pub status: String,
    pub reimbursable: Decimal,
    pub repaired: bool,
    pub file_reference: Option<String>,
}

/// Optional filters for claim listings; `None` leaves a column unfiltered
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub status: Option<String>,
    pub is_theft: Option<bool>,
    pub contract_uuid: Option<Uuid>,
}

const COLUMNS: &str = "uuid, contract_uuid, date, description, is_theft, status, \
                       reimbursable, repaired, file_reference";

/// Repository for claims
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim filed against the given contract
    pub async fn get(&self, contract_uuid: Uuid, uuid: Uuid) -> Result<ClaimRow, DatabaseError> {
        Self::get_with(&self.pool, contract_uuid, uuid).await
    }

    /// Lists claims passing the filter, ordered by date then id
    pub async fn find(&self, filter: &ClaimFilter) -> Result<Vec<ClaimRow>, DatabaseError> {
        Self::find_with(&self.pool, filter).await
    }

    /// Writes the full row, inserting it when absent
    pub async fn upsert(&self, row: &ClaimRow) -> Result<(), DatabaseError> {
        Self::write(&self.pool, row, true).await
    }

    /// Retrieves a claim through any executor
    pub async fn get_with<'e, E: PgExecutor<'e>>(
        executor: E,
        contract_uuid: Uuid,
        uuid: Uuid,
    ) -> Result<ClaimRow, DatabaseError> {
        sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {COLUMNS} FROM claims WHERE uuid = $1 AND contract_uuid = $2"
        ))
        .bind(uuid)
        .bind(contract_uuid)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Claim", uuid))
    }

    /// Lists claims through any executor
    pub async fn find_with<'e, E: PgExecutor<'e>>(
        executor: E,
        filter: &ClaimFilter,
    ) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {COLUMNS} FROM claims \
             WHERE ($1::varchar IS NULL OR status = $1) \
               AND ($2::boolean IS NULL OR is_theft = $2) \
               AND ($3::uuid IS NULL OR contract_uuid = $3) \
             ORDER BY date, uuid"
        ))
        .bind(filter.status.as_deref())
        .bind(filter.is_theft)
        .bind(filter.contract_uuid)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Writes a claim row through any executor
    ///
    /// Without `replace`, an existing id is reported as a duplicate entry.
    pub async fn write<'e, E: PgExecutor<'e>>(
        executor: E,
        row: &ClaimRow,
        replace: bool,
    ) -> Result<(), DatabaseError> {
        let on_conflict = if replace {
            "ON CONFLICT (uuid) DO UPDATE SET \
                 contract_uuid = EXCLUDED.contract_uuid, date = EXCLUDED.date, \
                 description = EXCLUDED.description, is_theft = EXCLUDED.is_theft, \
                 status = EXCLUDED.status, reimbursable = EXCLUDED.reimbursable, \
                 repaired = EXCLUDED.repaired, file_reference = EXCLUDED.file_reference"
        } else {
            ""
        };

        sqlx::query(&format!(
            "INSERT INTO claims ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) {on_conflict}"
        ))
        .bind(row.uuid)
        .bind(row.contract_uuid)
        .bind(row.date)
        .bind(&row.description)
        .bind(row.is_theft)
        .bind(&row.status)
        .bind(row.reimbursable)
        .bind(row.repaired)
        .bind(row.file_reference.as_deref())
        .execute(executor)
        .await?;
        Ok(())
    }
}
