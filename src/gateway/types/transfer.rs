//! Transfer request DTOs
//!
//! Field names follow the camelCase JSON the web client sends.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::money::StrictDecimal;
use crate::transfer::TransferRequest;

/// Body of `POST /api/v1/transfers`.
///
/// Every field is optional at this layer so that missing fields are reported
/// per field by validation instead of as a parse error.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTransferBody {
    #[schema(example = "ACC-0001")]
    pub source_account: Option<String>,
    #[schema(example = "ACC-0002")]
    pub destination_account: Option<String>,
    /// Amount as string or number, at most 2 decimals
    #[schema(value_type = Option<String>, example = "1000.00")]
    pub amount: Option<StrictDecimal>,
    /// Execution date (YYYY-MM-DD), today or later
    pub transfer_date: Option<NaiveDate>,
}

impl From<ScheduleTransferBody> for TransferRequest {
    fn from(body: ScheduleTransferBody) -> Self {
        TransferRequest {
            source_account: body.source_account,
            destination_account: body.destination_account,
            amount: body.amount.map(StrictDecimal::inner),
            transfer_date: body.transfer_date,
        }
    }
}

/// Query of `GET /api/v1/transfers`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTransfersQuery {
    /// Zero-based page index (default: 0)
    pub page: Option<u32>,
    /// Page size (default from config, clamped to the configured maximum)
    pub size: Option<u32>,
}
