//! Transfer Scheduling
//!
//! Accepts requests to move money between two accounts on a future date,
//! prices them by lead time and records them. Money is never moved here.
//!
//! # Flow
//!
//! ```text
//! TransferRequest ─▶ validation ─▶ fee ─▶ TransferStore ─▶ Transfer
//! ```
//!
//! # Invariants
//!
//! 1. A transfer is only stored with a fee from the band table
//! 2. Records are written once and never updated
//! 3. Listing order is `transfer_date ASC, id ASC`

pub mod clock;
pub mod db;
pub mod error;
pub mod memory;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::PgTransferStore;
pub use error::TransferError;
pub use memory::InMemoryTransferStore;
pub use scheduler::TransferScheduler;
pub use store::{StoreError, TransferStore};
pub use types::{
    NewTransfer, Page, PageRequest, Transfer, TransferId, TransferRequest, ValidatedTransfer,
};
pub use validation::{FieldError, ValidationErrors, validate_request};
