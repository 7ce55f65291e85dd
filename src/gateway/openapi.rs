//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{PageResponse, ScheduleTransferBody};
use crate::transfer::Transfer;

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transfer Scheduler API",
        version = "1.0.0",
        description = "Schedule account-to-account transfers for a future date. The fee depends on how many days ahead the transfer is booked.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::transfer::schedule_transfer,
        crate::gateway::handlers::transfer::list_transfers,
    ),
    components(
        schemas(
            HealthResponse,
            ScheduleTransferBody,
            Transfer,
            PageResponse<Transfer>,
        )
    ),
    tags(
        (name = "Transfer", description = "Scheduled transfers and their fees"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
