#[path = "votesprout-service/cli.rs"]
mod cli;
#[path = "votesprout-service/setup.rs"]
mod setup;

use crate::cli::Cli;
use log::info;
use std::net::SocketAddr;
use votesprout_service::api::run_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse_args();
    args.apply_to_env();

    let app_config = setup::load_app_config()?;
    setup::init_logging(&app_config)?;
    info!("votesprout-service starting version={}", env!("CARGO_PKG_VERSION"));
    setup::log_startup_banner(&app_config);

    let state = setup::init_state(&app_config).await?;
    setup::spawn_status_reporter(state.metrics.clone());

    let addr: SocketAddr =
        app_config.server.bind_addr.parse().map_err(|err| format!("invalid server.bind_addr '{}': {}", app_config.server.bind_addr, err))?;
    run_http_server(addr, state, app_config.server.body_limit_bytes).await?;
    info!("votesprout-service stopped");
    Ok(())
}
