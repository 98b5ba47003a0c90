//! Contract repository
//!
//! The insured item is stored inline on the contract row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for `contracts`
#[derive(Debug, Clone, FromRow)]
pub struct ContractRow {
    pub uuid: Uuid,
    pub username: String,
    pub contract_type_uuid: Uuid,
    pub item_id: i32,
    pub item_brand: String,
    pub item_model: String,
    pub item_price: Decimal,
    pub item_description: String,
    pub item_serial_no: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub void: bool,
    pub claim_index: Vec<Uuid>,
}

const COLUMNS: &str = "uuid, username, contract_type_uuid, item_id, item_brand, item_model, \
                       item_price, item_description, item_serial_no, start_date, end_date, \
                       void, claim_index";

/// Repository for contracts
#[derive(Debug, Clone)]
pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a contract by its identifier
    pub async fn get_by_id(&self, uuid: Uuid) -> Result<ContractRow, DatabaseError> {
        sqlx::query_as::<_, ContractRow>(&format!("SELECT {COLUMNS} FROM contracts WHERE uuid = $1"))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Contract", uuid))
    }

    /// Lists contracts, optionally restricted to one holder
    pub async fn find(&self, username: Option<&str>) -> Result<Vec<ContractRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ContractRow>(&format!(
            "SELECT {COLUMNS} FROM contracts \
             WHERE $1::varchar IS NULL OR username = $1 \
             ORDER BY uuid"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts a contract; a taken id is a duplicate entry
    pub async fn insert(&self, row: &ContractRow) -> Result<(), DatabaseError> {
        Self::write(&self.pool, row, false).await
    }

    /// Writes the full row, inserting it when absent
    pub async fn upsert(&self, row: &ContractRow) -> Result<(), DatabaseError> {
        Self::write(&self.pool, row, true).await
    }

    /// Reads a contract and holds a row lock on it until the transaction ends
    pub async fn lock<'e, E: PgExecutor<'e>>(
        executor: E,
        uuid: Uuid,
    ) -> Result<ContractRow, DatabaseError> {
        sqlx::query_as::<_, ContractRow>(&format!(
            "SELECT {COLUMNS} FROM contracts WHERE uuid = $1 FOR UPDATE"
        ))
        .bind(uuid)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Contract", uuid))
    }

    /// Writes a contract row through any executor
    pub async fn write<'e, E: PgExecutor<'e>>(
        executor: E,
        row: &ContractRow,
        replace: bool,
    ) -> Result<(), DatabaseError> {
        let on_conflict = if replace {
            "ON CONFLICT (uuid) DO UPDATE SET \
                 username = EXCLUDED.username, contract_type_uuid = EXCLUDED.contract_type_uuid, \
                 item_id = EXCLUDED.item_id, item_brand = EXCLUDED.item_brand, \
                 item_model = EXCLUDED.item_model, item_price = EXCLUDED.item_price, \
                 item_description = EXCLUDED.item_description, \
                 item_serial_no = EXCLUDED.item_serial_no, start_date = EXCLUDED.start_date, \
                 end_date = EXCLUDED.end_date, void = EXCLUDED.void, \
                 claim_index = EXCLUDED.claim_index"
        } else {
            ""
        };

        sqlx::query(&format!(
            "INSERT INTO contracts ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) {on_conflict}"
        ))
        .bind(row.uuid)
        .bind(&row.username)
        .bind(row.contract_type_uuid)
        .bind(row.item_id)
        .bind(&row.item_brand)
        .bind(&row.item_model)
        .bind(row.item_price)
        .bind(&row.item_description)
        .bind(&row.item_serial_no)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(row.void)
        .bind(&row.claim_index)
        .execute(executor)
        .await?;
        Ok(())
    }
}
