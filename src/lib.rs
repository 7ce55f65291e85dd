//! Transfer Scheduler
//!
//! Books account-to-account transfers for a future date and charges a fee
//! that depends on how far ahead the transfer is booked.
//!
//! # Modules
//!
//! - [`money`] - Amount scale and range rules
//! - [`fee`] - Lead-time fee bands
//! - [`transfer`] - Validation, scheduling workflow and storage
//! - [`gateway`] - HTTP API (axum) and OpenAPI docs
//! - [`config`] - YAML application config
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod fee;
pub mod gateway;
pub mod logging;
pub mod money;
pub mod transfer;

// Convenient re-exports at crate root
pub use fee::{MAX_LEAD_DAYS, calculate_fee, lead_days};
pub use transfer::{
    InMemoryTransferStore, PgTransferStore, Transfer, TransferError, TransferRequest,
    TransferScheduler, TransferStore,
};
