use crate::domain::aa::PaymasterChain;
use crate::foundation::VoteSproutError;
use crate::infrastructure::config::types::AppConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "VOTESPROUT_CONFIG_PATH";
pub const DATA_DIR_ENV: &str = "VOTESPROUT_DATA_DIR";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const PAYMASTER_API_KEY_ENV: &str = "PAYMASTER_API_KEY";
pub const PAYMASTER_CHAIN_ENV: &str = "PAYMASTER_CHAIN";
pub const GOVERNANCE_ADDRESS_ENV: &str = "GOVERNANCE_ADDRESS";
pub const OWNER_PRIVATE_KEY_ENV: &str = "VOTESPROUT_OWNER_PRIVATE_KEY";

pub const CONFIG_FILE_NAME: &str = "votesprout.toml";

pub fn resolve_config_path(data_dir: &Path) -> PathBuf {
    env_value(CONFIG_PATH_ENV).map(PathBuf::from).unwrap_or_else(|| data_dir.join(CONFIG_FILE_NAME))
}

pub fn resolve_data_dir() -> Result<PathBuf, VoteSproutError> {
    if let Some(data_dir) = env_value(DATA_DIR_ENV) {
        return Ok(PathBuf::from(data_dir));
    }
    let cwd = std::env::current_dir()
        .map_err(|err| VoteSproutError::StorageError { operation: "env::current_dir".to_string(), details: err.to_string() })?;
    Ok(cwd.join(".votesprout"))
}

/// Well-known variables win over both the config file and `VOTESPROUT_*` values.
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides_from(config, |name| std::env::var(name).ok());
}

pub(crate) fn apply_overrides_from(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

    if let Some(url) = get(DATABASE_URL_ENV) {
        config.storage.database_url = Some(url);
    }
    if let Some(key) = get(PAYMASTER_API_KEY_ENV) {
        config.paymaster.api_key = Some(key);
    }
    if let Some(chain) = get(PAYMASTER_CHAIN_ENV) {
        config.paymaster.chain = PaymasterChain::from_env_value(&chain);
    }
    if let Some(address) = get(GOVERNANCE_ADDRESS_ENV) {
        config.gasless.governance_address = Some(address);
    }
}

pub fn owner_private_key() -> Option<String> {
    env_value(OWNER_PRIVATE_KEY_ENV)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
