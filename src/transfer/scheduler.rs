//! Transfer scheduling workflow
//!
//! ```text
//! request ─▶ validate ─▶ lead days ─▶ fee band ─▶ store.save ─▶ Transfer
//!               │                        │            │
//!          Validation             NoFeeApplicable   Store
//! ```
//!
//! Nothing is written unless a fee applies. Store failures are returned as
//! they are; there is no retry.

use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::error::TransferError;
use super::store::TransferStore;
use super::types::{NewTransfer, Page, PageRequest, Transfer, TransferRequest};
use super::validation::validate_request;
use crate::fee;
use crate::money;

/// Schedules and lists transfers on top of a [`TransferStore`]
#[derive(Clone)]
pub struct TransferScheduler {
    store: Arc<dyn TransferStore>,
    clock: Arc<dyn Clock>,
}

impl TransferScheduler {
    /// Scheduler using the host's local date
    pub fn new(store: Arc<dyn TransferStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn TransferStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn TransferStore> {
        &self.store
    }

    /// Validate, price and persist a transfer request.
    pub async fn schedule(&self, request: TransferRequest) -> Result<Transfer, TransferError> {
        let today = self.clock.today();

        let validated = validate_request(&request, today).map_err(|e| {
            tracing::warn!(errors = %e, "Transfer request rejected by validation");
            e
        })?;

        let lead_days = fee::lead_days(today, validated.transfer_date());
        let fee = fee::calculate_fee(validated.amount(), lead_days).ok_or_else(|| {
            tracing::warn!(
                lead_days,
                transfer_date = %validated.transfer_date(),
                "No fee applicable, transfer not scheduled"
            );
            TransferError::NoFeeApplicable { lead_days }
        })?;

        let record = NewTransfer::new(validated, money::to_storage_scale(fee), today);
        let saved = self.store.save(record).await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Failed to persist transfer");
            e
        })?;

        tracing::info!(
            transfer_id = %saved.id,
            lead_days,
            amount = %saved.amount,
            fee = %saved.fee,
            transfer_date = %saved.transfer_date,
            "Transfer scheduled"
        );
        Ok(saved)
    }

    /// One page of scheduled transfers, ordered by transfer date then id.
    ///
    /// An empty page is returned both for an empty store and for a page past
    /// the end; callers cannot tell the two apart from the content alone.
    pub async fn list(&self, request: PageRequest) -> Result<Page<Transfer>, TransferError> {
        let page = self.store.find_page(request).await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "Failed to list transfers");
            e
        })?;
        tracing::debug!(
            page = request.page(),
            size = request.size(),
            returned = page.content.len(),
            total = page.total_elements,
            "Listed transfers"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::clock::FixedClock;
    use crate::transfer::memory::InMemoryTransferStore;
    use crate::transfer::store::StoreError;
    use crate::transfer::types::TransferId;
    use crate::transfer::validation::fields;
    use async_trait::async_trait;
    use chrono::{Days, NaiveDate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn in_days(days: u64) -> NaiveDate {
        today().checked_add_days(Days::new(days)).unwrap()
    }

    struct Harness {
        scheduler: TransferScheduler,
        store: Arc<InMemoryTransferStore>,
    }

    impl Harness {
        fn new() -> Self {
            let store = Arc::new(InMemoryTransferStore::new());
            let scheduler = TransferScheduler::with_clock(store.clone(), Arc::new(FixedClock(today())));
            Self { scheduler, store }
        }

        async fn schedule(&self, amount: Decimal, date: NaiveDate) -> Result<Transfer, TransferError> {
            self.scheduler
                .schedule(TransferRequest::new("ACC-1", "ACC-2", amount, date))
                .await
        }
    }

    /// Store that fails every write and counts attempts
    #[derive(Default)]
    struct FailingStore {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl TransferStore for FailingStore {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn save(&self, _transfer: NewTransfer) -> Result<Transfer, StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn find_page(&self, _request: PageRequest) -> Result<Page<Transfer>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn count(&self) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    // ========================================================================
    // schedule
    // ========================================================================

    #[tokio::test]
    async fn test_same_day_transfer_is_priced_and_saved() {
        let h = Harness::new();
        let transfer = h.schedule(dec!(1000.00), today()).await.unwrap();

        assert_eq!(transfer.id, TransferId::new(1));
        assert_eq!(transfer.fee, dec!(28.00));
        assert_eq!(transfer.fee.to_string(), "28.00");
        assert_eq!(transfer.scheduling_date, today());
        assert_eq!(transfer.transfer_date, today());
        assert_eq!(h.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_fifteen_days_uses_rate_band() {
        let h = Harness::new();
        let transfer = h.schedule(dec!(500.00), in_days(15)).await.unwrap();
        assert_eq!(transfer.fee.to_string(), "41.00");
        assert_eq!(transfer.amount.to_string(), "500.00");
    }

    #[tokio::test]
    async fn test_fee_matches_calculator_at_every_lead_day() {
        let h = Harness::new();
        let amount = dec!(1234.56);
        for days in 0..=50u64 {
            let transfer = h.schedule(amount, in_days(days)).await.unwrap();
            let expected = fee::calculate_fee(amount, days as i64).unwrap();
            assert_eq!(transfer.fee, money::to_storage_scale(expected), "days={}", days);
        }
        assert_eq!(h.store.len().await, 51);
    }

    #[tokio::test]
    async fn test_fee_rounded_to_storage_scale() {
        let h = Harness::new();
        // 123.45 * 0.082 = 10.1229
        let transfer = h.schedule(dec!(123.45), in_days(12)).await.unwrap();
        assert_eq!(transfer.fee.to_string(), "10.12");
    }

    #[tokio::test]
    async fn test_sixty_days_rejected_without_write() {
        let h = Harness::new();
        let err = h.schedule(dec!(200.00), in_days(60)).await.unwrap_err();
        assert!(matches!(err, TransferError::NoFeeApplicable { lead_days: 60 }));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_fifty_one_days_rejected() {
        let h = Harness::new();
        let err = h.schedule(dec!(200.00), in_days(51)).await.unwrap_err();
        assert!(matches!(err, TransferError::NoFeeApplicable { lead_days: 51 }));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_past_date_is_validation_error() {
        let h = Harness::new();
        let yesterday = today().pred_opt().unwrap();
        let err = h.schedule(dec!(200.00), yesterday).await.unwrap_err();
        match err {
            TransferError::Validation(errors) => {
                assert_eq!(
                    errors.get(fields::TRANSFER_DATE),
                    Some("Transfer date cannot be in the past")
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_store() {
        let store = Arc::new(FailingStore::default());
        let scheduler = TransferScheduler::with_clock(store.clone(), Arc::new(FixedClock(today())));

        let err = scheduler
            .schedule(TransferRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Validation(_)));

        let err = scheduler
            .schedule(TransferRequest::new("A", "B", dec!(10.00), in_days(90)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::NoFeeApplicable { .. }));

        assert_eq!(store.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let store = Arc::new(FailingStore::default());
        let scheduler = TransferScheduler::with_clock(store.clone(), Arc::new(FixedClock(today())));

        let err = scheduler
            .schedule(TransferRequest::new("A", "B", dec!(10.00), in_days(3)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Store(StoreError::Unavailable(_))));
        assert_eq!(err.http_status(), 500);
        assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
    }

    // ========================================================================
    // list
    // ========================================================================

    #[tokio::test]
    async fn test_list_empty_store() {
        let h = Harness::new();
        let page = h
            .scheduler
            .list(PageRequest::new(0, 10).unwrap())
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn test_pages_concatenate_to_sorted_sequence() {
        let h = Harness::new();
        let offsets = [30u64, 2, 17, 0, 45, 2, 9, 30, 50, 1, 17];
        for days in offsets {
            h.schedule(dec!(100.00), in_days(days)).await.unwrap();
        }

        let mut all = Vec::new();
        let mut page_no = 0;
        loop {
            let page = h
                .scheduler
                .list(PageRequest::new(page_no, 4).unwrap())
                .await
                .unwrap();
            if page.is_empty() {
                break;
            }
            assert_eq!(page.total_elements, offsets.len() as u64);
            all.extend(page.content);
            page_no += 1;
        }
        assert_eq!(page_no, 3);
        assert_eq!(all.len(), offsets.len());

        for pair in all.windows(2) {
            let a = (pair[0].transfer_date, pair[0].id);
            let b = (pair[1].transfer_date, pair[1].id);
            assert!(a < b, "{:?} should sort before {:?}", a, b);
        }

        let mut ids: Vec<i64> = all.iter().map(|t| t.id.get()).collect();
        ids.sort();
        assert_eq!(ids, (1..=offsets.len() as i64).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_list_store_failure_is_propagated() {
        let scheduler = TransferScheduler::with_clock(
            Arc::new(FailingStore::default()),
            Arc::new(FixedClock(today())),
        );
        let err = scheduler
            .list(PageRequest::new(0, 10).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Store(_)));
    }
}
