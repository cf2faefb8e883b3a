use crate::service::metrics::Metrics;
use std::sync::Arc;
use votesprout_core::application::VoteRepository;
use votesprout_core::infrastructure::rpc::PaymasterClient;

#[derive(Clone)]
pub struct ApiState {
    pub repository: VoteRepository,
    /// `None` when no paymaster API key is configured.
    pub paymaster: Option<Arc<PaymasterClient>>,
    pub metrics: Arc<Metrics>,
}
