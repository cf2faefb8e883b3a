use crate::domain::aa::PaymasterChain;
use crate::foundation::{DEFAULT_PAYMASTER_ENDPOINT, ENTRY_POINT_V06, SIMPLE_ACCOUNT_FACTORY_V06};
use crate::infrastructure::rpc::RetryPolicy;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_DB_CONNECTIONS: u32 = 5;
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8080";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub votes: VoteRulesConfig,
    #[serde(default)]
    pub paymaster: PaymasterConfig,
    #[serde(default)]
    pub gasless: GaslessConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr(), body_limit_bytes: default_body_limit_bytes() }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// PostgreSQL connection string. When unset the in-memory store is used.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seed the in-memory store with demo DAOs and a proposal.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { database_url: None, max_connections: default_max_connections(), seed_demo_data: true }
    }
}

impl StorageConfig {
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteRulesConfig {
    /// Reject votes whose choice index is not a valid option index.
    #[serde(default = "default_true")]
    pub strict_choice_index: bool,
}

impl Default for VoteRulesConfig {
    fn default() -> Self {
        Self { strict_choice_index: true }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymasterConfig {
    #[serde(default = "default_paymaster_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub chain: PaymasterChain,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub receipt_poll: RetryPolicy,
}

impl Default for PaymasterConfig {
    fn default() -> Self {
        Self {
            endpoint: default_paymaster_endpoint(),
            api_key: None,
            chain: PaymasterChain::default(),
            request_timeout_ms: None,
            receipt_poll: RetryPolicy::default(),
        }
    }
}

impl PaymasterConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

/// Settings for the gasless client (`votesprout-gasless`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GaslessConfig {
    /// Base URL of the VoteSprout service exposing `/sponsor`, `/send` and `/receipt`.
    #[serde(default = "default_service_url")]
    pub service_url: String,
    #[serde(default)]
    pub node_rpc_url: Option<String>,
    #[serde(default)]
    pub governance_address: Option<String>,
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    #[serde(default = "default_account_factory")]
    pub account_factory: String,
    #[serde(default)]
    pub account_salt: u64,
}

impl Default for GaslessConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            node_rpc_url: None,
            governance_address: None,
            entry_point: default_entry_point(),
            account_factory: default_account_factory(),
            account_salt: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `info`, or a comma separated list like `info,votesprout_core=debug`.
    #[serde(default = "default_log_filters")]
    pub filters: String,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filters: default_log_filters(), log_dir: None }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

const fn default_body_limit_bytes() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}

const fn default_max_connections() -> u32 {
    DEFAULT_MAX_DB_CONNECTIONS
}

const fn default_true() -> bool {
    true
}

fn default_paymaster_endpoint() -> String {
    DEFAULT_PAYMASTER_ENDPOINT.to_string()
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_entry_point() -> String {
    ENTRY_POINT_V06.to_string()
}

fn default_account_factory() -> String {
    SIMPLE_ACCOUNT_FACTORY_V06.to_string()
}

fn default_log_filters() -> String {
    "info".to_string()
}
