//! Transfer Database Layer
//!
//! PostgreSQL-backed [`TransferStore`]. Ids come from a `BIGSERIAL`, so
//! concurrent inserts never collide; each insert is a single statement and
//! either lands completely or not at all.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use super::store::{StoreError, TransferStore};
use super::types::{NewTransfer, Page, PageRequest, Transfer, TransferId};
use crate::money;

pub const CREATE_TRANSFERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transfers (
    id                  BIGSERIAL PRIMARY KEY,
    source_account      VARCHAR(20)    NOT NULL,
    destination_account VARCHAR(20)    NOT NULL,
    amount              NUMERIC(15, 2) NOT NULL,
    fee                 NUMERIC(15, 2) NOT NULL,
    transfer_date       DATE           NOT NULL,
    scheduling_date     DATE           NOT NULL
)
"#;

pub const CREATE_TRANSFER_DATE_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_transfers_transfer_date
    ON transfers (transfer_date, id)
"#;

/// Connection pool settings
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// PostgreSQL transfer store
pub struct PgTransferStore {
    pool: PgPool,
}

impl PgTransferStore {
    /// Open a connection pool
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(database_url)
            .await?;

        tracing::info!(
            max_connections = settings.max_connections,
            "PostgreSQL connection pool established"
        );
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `transfers` table and its listing index if missing
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        tracing::info!("Initializing transfers schema...");
        sqlx::query(CREATE_TRANSFERS_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(CREATE_TRANSFER_DATE_INDEX)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_transfer(row: &PgRow) -> Result<Transfer, StoreError> {
        let id: i64 = row.try_get("id")?;
        let amount: Decimal = row.try_get("amount")?;
        let fee: Decimal = row.try_get("fee")?;
        if fee.is_sign_negative() {
            return Err(StoreError::Corrupt(format!(
                "transfer {} has a negative fee: {}",
                id, fee
            )));
        }

        Ok(Transfer {
            id: TransferId::new(id),
            source_account: row.try_get("source_account")?,
            destination_account: row.try_get("destination_account")?,
            amount: money::to_storage_scale(amount),
            fee: money::to_storage_scale(fee),
            transfer_date: row.try_get::<NaiveDate, _>("transfer_date")?,
            scheduling_date: row.try_get::<NaiveDate, _>("scheduling_date")?,
        })
    }
}

#[async_trait]
impl TransferStore for PgTransferStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn save(&self, transfer: NewTransfer) -> Result<Transfer, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO transfers
                (source_account, destination_account, amount, fee, transfer_date, scheduling_date)
            VALUES
                ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&transfer.source_account)
        .bind(&transfer.destination_account)
        .bind(transfer.amount)
        .bind(transfer.fee)
        .bind(transfer.transfer_date)
        .bind(transfer.scheduling_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(transfer.with_id(TransferId::new(id)))
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Transfer>, StoreError> {
        let total = self.count().await?;
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let rows = sqlx::query(
            r#"
            SELECT id, source_account, destination_account, amount, fee,
                   transfer_date, scheduling_date
            FROM transfers
            ORDER BY transfer_date ASC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(request.size() as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut content = Vec::with_capacity(rows.len());
        for row in &rows {
            content.push(Self::row_to_transfer(row)?);
        }

        Ok(Page::new(content, request, total))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transfers")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
