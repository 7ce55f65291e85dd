//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `ApiError`: Error half of every handler result, rendered as `ApiResponse<()>`
//! - `PageResponse<T>`: Pagination envelope
//! - `error_codes`: Standard error code constants

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::transfer::{Page, TransferError, ValidationErrors};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
/// - errors: field name -> message (validation failures only)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
            errors: None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Message returned when no fee band covers the requested lead time
pub const NO_FEE_MESSAGE: &str = "No fee applicable for this lead time. Transfer not scheduled.";

/// Handler error: HTTP status + error envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
            errors: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    /// 400 with one entry per failing field
    pub fn validation(errors: &ValidationErrors) -> Self {
        let fields = errors
            .errors()
            .iter()
            .map(|e| (e.field.to_string(), e.message.clone()))
            .collect();
        Self {
            errors: Some(fields),
            ..Self::bad_request("Validation failed")
        }
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        tracing::debug!(code = err.code(), client_error = err.is_client_error(), "{}", err);
        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match &err {
            TransferError::Validation(errors) => ApiError::validation(errors),
            TransferError::NoFeeApplicable { .. } => {
                ApiError::new(status, error_codes::NO_FEE_APPLICABLE, NO_FEE_MESSAGE)
            }
            // Store details stay in the logs
            TransferError::Store(_) => ApiError::new(
                status,
                error_codes::INTERNAL_ERROR,
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            code: self.code,
            msg: self.msg,
            data: None,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Handler result carrying the success status and envelope
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 OK envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 Created envelope
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

// ============================================================================
// Response DTOs
// ============================================================================

/// One page of results plus pagination metadata
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    /// Rows across all pages
    #[schema(example = 42)]
    pub total_elements: u64,
    #[schema(example = 5)]
    pub total_pages: u64,
    /// Zero-based page index
    #[serde(rename = "number")]
    #[schema(example = 0)]
    pub page: u32,
    #[schema(example = 10)]
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            total_pages: page.total_pages(),
            first: page.is_first(),
            last: page.is_last(),
            number_of_elements: page.content.len(),
            total_elements: page.total_elements,
            page: page.page,
            size: page.size,
            content: page.content,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const NO_FEE_APPLICABLE: i32 = 1002;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}
