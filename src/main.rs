//! Transfer Scheduler HTTP service
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌───────────┐    ┌────────────┐
//! │  Config  │───▶│  Gateway  │───▶│ Scheduler │───▶│   Store    │
//! │  (YAML)  │    │  (axum)   │    │ (fee+val) │    │ (PG / mem) │
//! └──────────┘    └───────────┘    └───────────┘    └────────────┘
//! ```
//!
//! Usage: `transfer_scheduler [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;
use transfer_scheduler::config::AppConfig;
use transfer_scheduler::gateway::{self, state::AppState};
use transfer_scheduler::transfer::{
    InMemoryTransferStore, PgTransferStore, TransferScheduler, TransferStore,
};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn open_store(app_config: &AppConfig) -> anyhow::Result<Arc<dyn TransferStore>> {
    match &app_config.postgres_url {
        Some(url) => {
            let store = PgTransferStore::connect(url, app_config.postgres.pool_settings())
                .await
                .context("Failed to connect to PostgreSQL")?;
            store
                .init_schema()
                .await
                .context("Failed to initialize transfers schema")?;
            tracing::info!("Transfer store: PostgreSQL");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("No postgres_url configured, transfers are kept in memory only");
            Ok(Arc::new(InMemoryTransferStore::new()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = transfer_scheduler::logging::init_logging(&app_config);

    tracing::info!(
        "Starting Transfer Scheduler v{} in {} mode",
        env!("CARGO_PKG_VERSION"),
        env
    );

    let port = get_port_override().unwrap_or(app_config.gateway.port);

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(async {
        let store = open_store(&app_config).await?;
        let scheduler = TransferScheduler::new(store);
        let state = Arc::new(AppState::new(scheduler, app_config.pagination));

        gateway::run_server(&app_config.gateway.host, port, state)
            .await
            .context("Gateway server error")
    })
}
