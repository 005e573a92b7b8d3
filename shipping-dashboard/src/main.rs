use anyhow::Result;
use shipping_dashboard::config::DashboardConfig;
use shipping_dashboard::telemetry::init_telemetry;
use shipping_dashboard::{AppState, serve};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let env_loaded = DashboardConfig::load_env_file()?;
    let config = DashboardConfig::load()?;
    init_telemetry(&config.log)?;
    if env_loaded {
        info!("loaded environment variables from .env");
    }

    let addr = config.bind_addr()?;
    let state = AppState::build(&config).await?;
    info!(
        policy = ?config.tracking.status_policy,
        carrier = %config.tracking.default_carrier,
        "shipment workflow configured"
    );
    serve(addr, state).await
}
