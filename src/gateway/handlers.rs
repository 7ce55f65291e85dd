pub mod health;
pub mod transfer;

pub use health::{HealthResponse, health_check};
pub use transfer::{list_transfers, schedule_transfer};
