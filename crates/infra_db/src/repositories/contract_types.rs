//! Contract type repository

use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for `contract_types`
#[derive(Debug, Clone, FromRow)]
pub struct ContractTypeRow {
    pub uuid: Uuid,
    pub shop_type: String,
    pub formula_per_day: String,
    pub max_sum_insured: Decimal,
    pub theft_insured: bool,
    pub description: String,
    pub conditions: String,
    pub active: bool,
    pub min_duration_days: i32,
    pub max_duration_days: i32,
}

const COLUMNS: &str = "uuid, shop_type, formula_per_day, max_sum_insured, theft_insured, \
                       description, conditions, active, min_duration_days, max_duration_days";

/// Repository for the contract type catalogue
#[derive(Debug, Clone)]
pub struct ContractTypeRepository {
    pool: PgPool,
}

impl ContractTypeRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a contract type by its identifier
    pub async fn get_by_id(&self, uuid: Uuid) -> Result<ContractTypeRow, DatabaseError> {
        sqlx::query_as::<_, ContractTypeRow>(&format!(
            "SELECT {COLUMNS} FROM contract_types WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("ContractType", uuid))
    }

    /// Lists contract types
    ///
    /// With a shop type, only active types whose shop type contains it
    /// (case-insensitive) are returned.
    pub async fn find(&self, shop_type: Option<&str>) -> Result<Vec<ContractTypeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ContractTypeRow>(&format!(
            "SELECT {COLUMNS} FROM contract_types \
             WHERE $1::text IS NULL OR (active AND strpos(lower(shop_type), lower($1)) > 0) \
             ORDER BY uuid"
        ))
        .bind(shop_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts a contract type; a taken id is a duplicate entry
    pub async fn insert(&self, row: &ContractTypeRow) -> Result<(), DatabaseError> {
        Self::write(&self.pool, row, false).await
    }

    /// Writes the full row, inserting it when absent
    pub async fn upsert(&self, row: &ContractTypeRow) -> Result<(), DatabaseError> {
        Self::write(&self.pool, row, true).await
    }

    async fn write<'e, E: PgExecutor<'e>>(
        executor: E,
        row: &ContractTypeRow,
        replace: bool,
    ) -> Result<(), DatabaseError> {
        let on_conflict = if replace {
            "ON CONFLICT (uuid) DO UPDATE SET \
                 shop_type = EXCLUDED.shop_type, formula_per_day = EXCLUDED.formula_per_day, \
                 max_sum_insured = EXCLUDED.max_sum_insured, theft_insured = EXCLUDED.theft_insured, \
                 description = EXCLUDED.description, conditions = EXCLUDED.conditions, \
                 active = EXCLUDED.active, min_duration_days = EXCLUDED.min_duration_days, \
                 max_duration_days = EXCLUDED.max_duration_days"
        } else {
            ""
        };

        sqlx::query(&format!(
            "INSERT INTO contract_types ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) {on_conflict}"
        ))
        .bind(row.uuid)
        .bind(&row.shop_type)
        .bind(&row.formula_per_day)
        .bind(row.max_sum_insured)
        .bind(row.theft_insured)
        .bind(&row.description)
        .bind(&row.conditions)
        .bind(row.active)
        .bind(row.min_duration_days)
        .bind(row.max_duration_days)
        .execute(executor)
        .await?;
        Ok(())
    }
}
