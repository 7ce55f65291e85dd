//! Scheduled transfer handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, ListTransfersQuery, PageResponse, ScheduleTransferBody, created, ok,
};
use crate::config::PaginationConfig;
use crate::transfer::{PageRequest, Transfer};

/// Schedule a transfer
///
/// POST /api/v1/transfers
///
/// The fee is derived from the days between today and `transferDate`.
/// Lead times outside every fee band are refused and nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = ScheduleTransferBody,
    responses(
        (status = 201, description = "Transfer scheduled", body = Transfer, content_type = "application/json"),
        (status = 400, description = "Invalid fields (code 1001) or no fee applicable (code 1002)"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Transfer"
)]
pub async fn schedule_transfer(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScheduleTransferBody>, JsonRejection>,
) -> ApiResult<Transfer> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected transfer body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;

    let transfer = state.scheduler.schedule(body.into()).await?;
    created(transfer)
}

/// List scheduled transfers
///
/// GET /api/v1/transfers?page=0&size=10
///
/// Ordered by transfer date, then id. An empty page answers 204 with no body.
#[utoipa::path(
    get,
    path = "/api/v1/transfers",
    params(ListTransfersQuery),
    responses(
        (status = 200, description = "One page of transfers", body = PageResponse<Transfer>, content_type = "application/json"),
        (status = 204, description = "No transfers on this page"),
        (status = 400, description = "Invalid page or size"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Transfer"
)]
pub async fn list_transfers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListTransfersQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let request = page_request(&query, &state.pagination)?;

    let page = state.scheduler.list(request).await?;
    if page.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(ok(PageResponse::from(page)).into_response())
}

/// Apply defaults and clamp the size to the configured maximum
fn page_request(
    query: &ListTransfersQuery,
    pagination: &PaginationConfig,
) -> Result<PageRequest, ApiError> {
    let page = query.page.unwrap_or(0);
    let size = query
        .size
        .unwrap_or(pagination.default_page_size)
        .min(pagination.max_page_size);
    PageRequest::new(page, size)
        .ok_or_else(|| ApiError::bad_request("Page size must be greater than zero"))
}
