use crate::config::PaginationConfig;
use crate::transfer::TransferScheduler;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    pub scheduler: TransferScheduler,
    /// Default and maximum page size for listings
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(scheduler: TransferScheduler, pagination: PaginationConfig) -> Self {
        Self {
            scheduler,
            pagination,
        }
    }
}
