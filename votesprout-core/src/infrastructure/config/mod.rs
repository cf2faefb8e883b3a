mod env;
mod loader;
mod types;
pub mod validation;

pub use env::{apply_env_overrides, owner_private_key, resolve_config_path, resolve_data_dir, CONFIG_PATH_ENV, DATA_DIR_ENV, OWNER_PRIVATE_KEY_ENV};
pub use loader::{load_config, load_config_from_file, redact_url};
pub use types::*;

use crate::foundation::VoteSproutError;
use std::path::Path;

/// Resolve the config path from the environment, load and validate it.
pub fn load_app_config() -> Result<AppConfig, VoteSproutError> {
    let data_dir = resolve_data_dir()?;
    load_app_config_from_path(&resolve_config_path(&data_dir))
}

pub fn load_app_config_from_path(path: &Path) -> Result<AppConfig, VoteSproutError> {
    let config = load_config_from_file(path)?;
    config.validate().map_err(|errors| VoteSproutError::ConfigError(format!("validation failed: {:?}", errors)))?;
    Ok(config)
}
