//! In-process transfer store
//!
//! Keeps transfers in a `BTreeMap` keyed by `(transfer_date, id)`, which is
//! exactly the listing order, so a page is a skip/take over the map.
//! Used when no PostgreSQL URL is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::store::{StoreError, TransferStore};
use super::types::{NewTransfer, Page, PageRequest, Transfer, TransferId};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<(NaiveDate, TransferId), Transfer>,
}

/// Ordered in-memory transfer store
#[derive(Debug, Default)]
pub struct InMemoryTransferStore {
    inner: RwLock<Inner>,
}

impl InMemoryTransferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transfers
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

#[async_trait]
impl TransferStore for InMemoryTransferStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, transfer: NewTransfer) -> Result<Transfer, StoreError> {
        let mut inner = self.inner.write().await;
        let next = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Unavailable("transfer id space exhausted".into()))?;
        inner.last_id = next;

        let record = transfer.with_id(TransferId::new(next));
        inner
            .rows
            .insert((record.transfer_date, record.id), record.clone());
        Ok(record)
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Transfer>, StoreError> {
        let inner = self.inner.read().await;
        let total = inner.rows.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content: Vec<Transfer> = inner
            .rows
            .values()
            .skip(skip)
            .take(request.size() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.rows.len() as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
