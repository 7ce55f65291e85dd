//! Transfer store seam
//!
//! The scheduler only talks to this trait. Implementations must:
//! 1. assign a unique id atomically on every `save`
//! 2. make a saved record visible to the next `find_page` of the same caller
//! 3. order pages by `transfer_date ASC, id ASC`
//!
//! A failed `save` must not leave a partial record behind.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{NewTransfer, Page, PageRequest, Transfer};

/// Store failures. None of them are retried here.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait TransferStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Persist a new transfer and return it with its assigned id
    async fn save(&self, transfer: NewTransfer) -> Result<Transfer, StoreError>;

    /// One page of transfers ordered by transfer date, then id
    async fn find_page(&self, request: PageRequest) -> Result<Page<Transfer>, StoreError>;

    /// Number of stored transfers
    async fn count(&self) -> Result<u64, StoreError>;

    /// Cheap liveness probe
    async fn health_check(&self) -> Result<(), StoreError>;
}
