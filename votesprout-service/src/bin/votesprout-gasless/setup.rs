use log::{info, warn};
use std::sync::Arc;
use votesprout_core::application::{GaslessExecutor, GaslessSettings, GovernanceClient};
use votesprout_core::foundation::VoteSproutError;
use votesprout_core::infrastructure::config::{owner_private_key, AppConfig, OWNER_PRIVATE_KEY_ENV};
use votesprout_core::infrastructure::logging::init_logger;
use votesprout_core::infrastructure::rpc::{EthNodeClient, ProxyRelayClient, ServiceMirrorClient, WalletSender};
use votesprout_core::infrastructure::wallet::{LocalOwnerSigner, OwnerSigner};

pub fn init_logging(app_config: &AppConfig) -> Result<(), VoteSproutError> {
    init_logger(app_config.logging.log_dir.as_deref(), &app_config.logging.filters)
}

pub fn load_app_config() -> Result<AppConfig, VoteSproutError> {
    votesprout_core::infrastructure::config::load_app_config()
}

fn node_rpc_url(app_config: &AppConfig) -> Result<&str, VoteSproutError> {
    app_config
        .gasless
        .node_rpc_url
        .as_deref()
        .ok_or_else(|| VoteSproutError::ConfigError("gasless.node_rpc_url is not configured".to_string()))
}

pub fn init_executor(app_config: &AppConfig) -> Result<GaslessExecutor, VoteSproutError> {
    let settings = GaslessSettings::from_config(app_config)?;
    let chain = Arc::new(EthNodeClient::connect_http(node_rpc_url(app_config)?)?);
    let relay = Arc::new(ProxyRelayClient::new(&app_config.gasless.service_url));

    let signer = match owner_private_key() {
        Some(key) => Some(Arc::new(LocalOwnerSigner::from_private_key_hex(&key)?) as Arc<dyn OwnerSigner>),
        None => {
            warn!("{} not set; no wallet signer connected", OWNER_PRIVATE_KEY_ENV);
            None
        }
    };
    info!(
        "gasless executor ready chain={} entry_point={} factory={} governance={} service_url={}",
        settings.chain,
        settings.entry_point,
        settings.account_factory,
        settings.governance.map(|address| address.to_string()).unwrap_or_else(|| "unset".to_string()),
        app_config.gasless.service_url
    );
    Ok(GaslessExecutor::new(chain, relay, signer, settings))
}

/// Governance client over the executor; `direct` swaps the paymaster for plain owner transactions.
pub fn init_governance(app_config: &AppConfig, direct: bool) -> Result<GovernanceClient, VoteSproutError> {
    let executor = init_executor(app_config)?;
    let mirror = Arc::new(ServiceMirrorClient::new(&app_config.gasless.service_url));
    if !direct {
        return Ok(GovernanceClient::new(Arc::new(executor), mirror));
    }

    let key = owner_private_key().ok_or_else(|| VoteSproutError::ConfigError(format!("{OWNER_PRIVATE_KEY_ENV} is required for --direct")))?;
    let sender = WalletSender::from_private_key_hex(&key, node_rpc_url(app_config)?, executor.settings().chain)?;
    info!("direct mode: transactions are paid by the owner key");
    Ok(GovernanceClient::new(Arc::new(executor), mirror).with_direct(Arc::new(sender)))
}
