//! Repair order repository

use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for `repair_orders`
#[derive(Debug, Clone, FromRow)]
pub struct RepairOrderRow {
    pub claim_uuid: Uuid,
    pub contract_uuid: Uuid,
    pub item_id: i32,
    pub item_brand: String,
    pub item_model: String,
    pub item_price: Decimal,
    pub item_description: String,
    pub item_serial_no: String,
    pub ready: bool,
}

const COLUMNS: &str = "claim_uuid, contract_uuid, item_id, item_brand, item_model, item_price, \
                       item_description, item_serial_no, ready";

/// Repository for repair orders
#[derive(Debug, Clone)]
pub struct RepairOrderRepository {
    pool: PgPool,
}

impl RepairOrderRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves the repair order of a claim
    pub async fn get_by_claim(&self, claim_uuid: Uuid) -> Result<RepairOrderRow, DatabaseError> {
        sqlx::query_as::<_, RepairOrderRow>(&format!(
            "SELECT {COLUMNS} FROM repair_orders WHERE claim_uuid = $1"
        ))
        .bind(claim_uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("RepairOrder", claim_uuid))
    }

    /// Lists repair orders, optionally by readiness
    pub async fn find(&self, ready: Option<bool>) -> Result<Vec<RepairOrderRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, RepairOrderRow>(&format!(
            "SELECT {COLUMNS} FROM repair_orders \
             WHERE $1::boolean IS NULL OR ready = $1 \
             ORDER BY claim_uuid"
        ))
        .bind(ready)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Writes the full row, inserting it when absent
    pub async fn upsert(&self, row: &RepairOrderRow) -> Result<(), DatabaseError> {
        Self::write(&self.pool, row, true).await
    }

    /// Writes a repair order row through any executor
    ///
    /// Without `replace`, a second order for the same claim is a duplicate entry.
    pub async fn write<'e, E: PgExecutor<'e>>(
        executor: E,
        row: &RepairOrderRow,
        replace: bool,
    ) -> Result<(), DatabaseError> {
        let on_conflict = if replace {
            "ON CONFLICT (claim_uuid) DO UPDATE SET \
                 contract_uuid = EXCLUDED.contract_uuid, item_id = EXCLUDED.item_id, \
                 item_brand = EXCLUDED.item_brand, item_model = EXCLUDED.item_model, \
                 item_price = EXCLUDED.item_price, item_description = EXCLUDED.item_description, \
                 item_serial_no = EXCLUDED.item_serial_no, ready = EXCLUDED.ready"
        } else {
            ""
        };

        sqlx::query(&format!(
            "INSERT INTO repair_orders ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) {on_conflict}"
        ))
        .bind(row.claim_uuid)
        .bind(row.contract_uuid)
        .bind(row.item_id)
        .bind(&row.item_brand)
        .bind(&row.item_model)
        .bind(row.item_price)
        .bind(&row.item_description)
        .bind(&row.item_serial_no)
        .bind(row.ready)
        .execute(executor)
        .await?;
        Ok(())
    }
}
