//! Gateway types module
//!
//! ## Input Types
//! - [`StrictDecimal`]: Format-validated decimal for API input
//! - [`ScheduleTransferBody`]: Transfer request body
//! - [`ListTransfersQuery`]: Pagination query
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`PageResponse<T>`]: Pagination envelope
//! - [`ApiError`]: Error envelope with HTTP status
//!
//! ## Submodules
//! - [`money`]: Money types (StrictDecimal)
//! - [`response`]: Response types and error codes
//! - [`transfer`]: Transfer request DTOs

pub mod money;
pub mod response;
pub mod transfer;

// Re-export commonly used types at module root
pub use money::StrictDecimal;
pub use response::{
    ApiError, ApiResponse, ApiResult, NO_FEE_MESSAGE, PageResponse, created, error_codes, ok,
};
pub use transfer::{ListTransfersQuery, ScheduleTransferBody};
