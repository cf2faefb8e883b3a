pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;
pub use traits::*;

use crate::infrastructure::config::{redact_url, StorageConfig};
use log::info;
use std::sync::Arc;

/// Pick the backend once at startup: PostgreSQL when a database URL is configured, otherwise memory.
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>> {
    match config.database_url() {
        Some(url) => {
            info!("opening postgres storage url={}", redact_url(url));
            let storage = PostgresStorage::connect(url, config.max_connections).await?;
            Ok(Arc::new(storage))
        }
        None => {
            info!("no database configured; using in-memory storage seed_demo_data={}", config.seed_demo_data);
            let storage = if config.seed_demo_data { MemoryStorage::with_demo_data() } else { MemoryStorage::new() };
            Ok(Arc::new(storage))
        }
    }
}
