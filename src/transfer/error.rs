//! Transfer Error Types
//!
//! Three classes, each surfaced differently at the API:
//! - validation failures (field level, 400)
//! - business-rule rejection when no fee band applies (400)
//! - store failures (500, details only in logs)

use thiserror::Error;

use super::store::StoreError;
use super::validation::ValidationErrors;

/// Transfer scheduling errors
#[derive(Error, Debug)]
pub enum TransferError {
    // === Validation Errors ===
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    // === Business Rule Errors ===
    #[error("No fee applicable for a lead time of {lead_days} days")]
    NoFeeApplicable { lead_days: i64 },

    // === System Errors ===
    #[error("Transfer store error: {0}")]
    Store(#[from] StoreError),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::Validation(_) => "INVALID_PARAMETER",
            TransferError::NoFeeApplicable { .. } => "NO_FEE_APPLICABLE",
            TransferError::Store(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::Validation(_) | TransferError::NoFeeApplicable { .. } => 400,
            TransferError::Store(_) => 500,
        }
    }

    /// True for failures the caller can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }
}
