use crate::infrastructure::config::types::AppConfig;
use alloy::primitives::Address;
use std::net::SocketAddr;
use std::str::FromStr;

const MAX_RECEIPT_POLL_ATTEMPTS: u32 = 600;
const MAX_DB_CONNECTIONS: u32 = 256;

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if SocketAddr::from_str(self.server.bind_addr.trim()).is_err() {
            errors.push(format!("invalid server.bind_addr: {}", self.server.bind_addr));
        }
        if self.server.body_limit_bytes == 0 {
            errors.push("server.body_limit_bytes must be > 0".to_string());
        }

        if let Some(url) = self.storage.database_url() {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                errors.push("storage.database_url must be a postgres:// or postgresql:// URL".to_string());
            }
        }
        if self.storage.max_connections == 0 || self.storage.max_connections > MAX_DB_CONNECTIONS {
            errors.push(format!("storage.max_connections must be between 1 and {MAX_DB_CONNECTIONS}"));
        }

        if !is_http_url(&self.paymaster.endpoint) {
            errors.push(format!("invalid paymaster.endpoint: {}", self.paymaster.endpoint));
        }
        if self.paymaster.request_timeout_ms == Some(0) {
            errors.push("paymaster.request_timeout_ms must be > 0 when set".to_string());
        }
        let poll = &self.paymaster.receipt_poll;
        if poll.max_attempts == 0 {
            errors.push("paymaster.receipt_poll.max_attempts must be > 0".to_string());
        }
        if poll.max_attempts > MAX_RECEIPT_POLL_ATTEMPTS {
            errors.push(format!("paymaster.receipt_poll.max_attempts should not exceed {MAX_RECEIPT_POLL_ATTEMPTS}"));
        }
        if !poll.backoff_multiplier.is_finite() || poll.backoff_multiplier < 1.0 {
            errors.push("paymaster.receipt_poll.backoff_multiplier must be >= 1.0".to_string());
        }

        if !is_http_url(&self.gasless.service_url) {
            errors.push(format!("invalid gasless.service_url: {}", self.gasless.service_url));
        }
        if let Some(url) = self.gasless.node_rpc_url.as_deref() {
            if !is_http_url(url) {
                errors.push(format!("invalid gasless.node_rpc_url: {url}"));
            }
        }
        if let Some(address) = self.gasless.governance_address.as_deref() {
            if Address::from_str(address.trim()).is_err() {
                errors.push(format!("invalid gasless.governance_address: {address}"));
            }
        }
        if Address::from_str(self.gasless.entry_point.trim()).is_err() {
            errors.push(format!("invalid gasless.entry_point: {}", self.gasless.entry_point));
        }
        if Address::from_str(self.gasless.account_factory.trim()).is_err() {
            errors.push(format!("invalid gasless.account_factory: {}", self.gasless.account_factory));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    (url.starts_with("http://") || url.starts_with("https://")) && url.len() > "https://".len()
}
