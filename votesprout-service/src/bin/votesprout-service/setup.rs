use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use votesprout_core::application::VoteRepository;
use votesprout_core::foundation::VoteSproutError;
use votesprout_core::infrastructure::config::{redact_url, AppConfig};
use votesprout_core::infrastructure::logging::init_logger;
use votesprout_core::infrastructure::rpc::PaymasterClient;
use votesprout_core::infrastructure::storage::open_storage;
use votesprout_service::api::ApiState;
use votesprout_service::service::metrics::Metrics;

const STATUS_REPORT_INTERVAL_SECS: u64 = 300;

pub fn init_logging(app_config: &AppConfig) -> Result<(), VoteSproutError> {
    init_logger(app_config.logging.log_dir.as_deref(), &app_config.logging.filters)
}

pub fn load_app_config() -> Result<AppConfig, VoteSproutError> {
    votesprout_core::infrastructure::config::load_app_config()
}

pub fn log_startup_banner(app_config: &AppConfig) {
    info!(
        "config loaded bind_addr={} storage={} strict_choice_index={} paymaster_chain={} paymaster_key_set={} receipt_max_attempts={} receipt_interval_ms={}",
        app_config.server.bind_addr,
        app_config.storage.database_url().map(redact_url).unwrap_or_else(|| "memory".to_string()),
        app_config.votes.strict_choice_index,
        app_config.paymaster.chain,
        app_config.paymaster.api_key().is_some(),
        app_config.paymaster.receipt_poll.max_attempts,
        app_config.paymaster.receipt_poll.interval_ms
    );
    if app_config.paymaster.api_key().is_none() {
        warn!("PAYMASTER_API_KEY not set; /sponsor, /send and /receipt will answer 500");
    }
    if !app_config.votes.strict_choice_index {
        warn!("permissive choice validation enabled; out-of-range choice indexes are stored and ignored by tallies");
    }
}

pub async fn init_state(app_config: &AppConfig) -> Result<Arc<ApiState>, VoteSproutError> {
    let storage = open_storage(&app_config.storage).await?;
    info!("storage initialized backend={}", storage.backend());
    let repository = VoteRepository::new(storage, app_config.votes.strict_choice_index);
    let paymaster = PaymasterClient::from_config(&app_config.paymaster)?.map(Arc::new);
    let metrics = Arc::new(Metrics::new()?);
    Ok(Arc::new(ApiState { repository, paymaster, metrics }))
}

pub fn spawn_status_reporter(metrics: Arc<Metrics>) {
    tokio::spawn(async move {
        info!("status reporter started interval_seconds={}", STATUS_REPORT_INTERVAL_SECS);
        let mut interval = tokio::time::interval(Duration::from_secs(STATUS_REPORT_INTERVAL_SECS));
        interval.tick().await;
        loop {
            interval.tick().await;
            let snapshot = metrics.snapshot();
            info!(
                "periodic status report uptime_minutes={} http_requests={} http_server_errors={} votes_accepted={} votes_rejected={} paymaster_ok={} paymaster_error={}",
                snapshot.uptime.as_secs() / 60,
                snapshot.http_requests,
                snapshot.http_server_errors,
                snapshot.votes_accepted,
                snapshot.votes_rejected,
                snapshot.paymaster_ok,
                snapshot.paymaster_error
            );
        }
    });
}
