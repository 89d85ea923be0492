//! Offer Response Pipeline - Main Entry Point

use api::{init_logging, run_server, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Offer Response Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ApiConfig::from_env()?;
    run_server(config).await
}
