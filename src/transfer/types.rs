//! Transfer domain types
//!
//! - [`TransferRequest`]: unvalidated input, every field optional
//! - [`ValidatedTransfer`]: input that passed the precondition check
//! - [`NewTransfer`]: priced record waiting for an id from the store
//! - [`Transfer`]: persisted record
//! - [`PageRequest`] / [`Page`]: ordered pagination

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Identifier
// ============================================================================

/// Store-assigned transfer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(i64);

impl TransferId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Input
// ============================================================================

/// Transfer request as received from a caller.
///
/// Fields are optional so that a missing field is reported by validation
/// together with every other failing field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferRequest {
    pub source_account: Option<String>,
    pub destination_account: Option<String>,
    pub amount: Option<Decimal>,
    pub transfer_date: Option<NaiveDate>,
}

impl TransferRequest {
    /// Build a fully populated request
    pub fn new(
        source_account: impl Into<String>,
        destination_account: impl Into<String>,
        amount: Decimal,
        transfer_date: NaiveDate,
    ) -> Self {
        Self {
            source_account: Some(source_account.into()),
            destination_account: Some(destination_account.into()),
            amount: Some(amount),
            transfer_date: Some(transfer_date),
        }
    }
}

/// Request that passed [`super::validation::validate_request`].
///
/// Fields are private so the only way to get one is through validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransfer {
    source_account: String,
    destination_account: String,
    amount: Decimal,
    transfer_date: NaiveDate,
}

impl ValidatedTransfer {
    pub(crate) fn new(
        source_account: String,
        destination_account: String,
        amount: Decimal,
        transfer_date: NaiveDate,
    ) -> Self {
        Self {
            source_account,
            destination_account,
            amount,
            transfer_date,
        }
    }

    pub fn source_account(&self) -> &str {
        &self.source_account
    }

    pub fn destination_account(&self) -> &str {
        &self.destination_account
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn transfer_date(&self) -> NaiveDate {
        self.transfer_date
    }
}

// ============================================================================
// Records
// ============================================================================

/// A priced transfer ready to be persisted (no id yet)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransfer {
    pub source_account: String,
    pub destination_account: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub transfer_date: NaiveDate,
    pub scheduling_date: NaiveDate,
}

impl NewTransfer {
    /// Attach the fee and scheduling date to a validated request.
    pub fn new(request: ValidatedTransfer, fee: Decimal, scheduling_date: NaiveDate) -> Self {
        Self {
            source_account: request.source_account,
            destination_account: request.destination_account,
            amount: request.amount,
            fee,
            transfer_date: request.transfer_date,
            scheduling_date,
        }
    }

    /// Promote to a persisted record once the store assigned an id.
    pub fn with_id(self, id: TransferId) -> Transfer {
        Transfer {
            id,
            source_account: self.source_account,
            destination_account: self.destination_account,
            amount: self.amount,
            fee: self.fee,
            transfer_date: self.transfer_date,
            scheduling_date: self.scheduling_date,
        }
    }
}

/// Persisted scheduled transfer. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[schema(value_type = i64, example = 1)]
    pub id: TransferId,
    #[schema(example = "ACC-0001")]
    pub source_account: String,
    #[schema(example = "ACC-0002")]
    pub destination_account: String,
    #[schema(value_type = String, example = "1000.00")]
    pub amount: Decimal,
    #[schema(value_type = String, example = "28.00")]
    pub fee: Decimal,
    pub transfer_date: NaiveDate,
    pub scheduling_date: NaiveDate,
}

// ============================================================================
// Pagination
// ============================================================================

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Returns `None` for a zero page size.
    pub fn new(page: u32, size: u32) -> Option<Self> {
        (size > 0).then_some(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// One page of an ordered result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            total_elements,
            page: request.page(),
            size: request.size(),
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size as u64)
    }

    /// No rows on this page, whether the set is empty or the page is past the end.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.page as u64 + 1 >= self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_rejects_zero_size() {
        assert!(PageRequest::new(0, 0).is_none());
        assert!(PageRequest::new(3, 1).is_some());
    }

    #[test]
    fn test_page_request_offset_does_not_overflow() {
        let req = PageRequest::new(u32::MAX, u32::MAX).unwrap();
        assert_eq!(req.offset(), u32::MAX as u64 * u32::MAX as u64);
    }

    #[test]
    fn test_page_metadata() {
        let req = PageRequest::new(1, 10).unwrap();
        let page = Page::new(vec![1, 2, 3], req, 13);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.is_first());
        assert!(page.is_last());
        assert!(!page.is_empty());

        let first = Page::new(vec![0; 10], PageRequest::new(0, 10).unwrap(), 13);
        assert!(first.is_first());
        assert!(!first.is_last());
    }

    #[test]
    fn test_empty_page_past_the_end() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(5, 10).unwrap(), 13);
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 2);
        assert!(page.is_last());
    }

    #[test]
    fn test_empty_store_page() {
        let page: Page<u8> = Page::new(vec![], PageRequest::new(0, 10).unwrap(), 0);
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn test_transfer_serializes_camel_case() {
        let transfer = Transfer {
            id: TransferId::new(7),
            source_account: "A".into(),
            destination_account: "B".into(),
            amount: Decimal::new(100000, 2),
            fee: Decimal::new(2800, 2),
            transfer_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            scheduling_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        };
        let json = serde_json::to_value(&transfer).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["sourceAccount"], "A");
        assert_eq!(json["destinationAccount"], "B");
        assert_eq!(json["amount"], "1000.00");
        assert_eq!(json["fee"], "28.00");
        assert_eq!(json["transferDate"], "2025-01-10");
        assert_eq!(json["schedulingDate"], "2025-01-10");
    }
}
