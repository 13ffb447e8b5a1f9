use std::sync::Arc;

use anyhow::Context;
use ecobin_core::app::{App, AppBuilder};
use ecobin_core::config::{Config, StoreBackend};
use ecobin_core::impls::InMemoryStore;
use ecobin_redis::{KeyPrefixes, RedisStore};
use tracing::info;

use super::seed::load_seed_file;

pub struct AppState {
    pub app: App,
}

impl AppState {
    pub fn new(app: App) -> Arc<Self> {
        Arc::new(Self { app })
    }

    /// Builds the store selected by the config, then seeds it if a seed file is set.
    pub async fn from_config(config: &Config) -> anyhow::Result<Arc<Self>> {
        let builder = match config.store {
            StoreBackend::Memory => {
                info!("Using in-memory store");
                let store = Arc::new(InMemoryStore::new());
                AppBuilder::new().bin_store(store.clone()).status_history(store)
            }
            StoreBackend::Redis => {
                info!("Connecting to Redis at {}", config.redis_url);
                let prefixes = KeyPrefixes::new(&config.bins_prefix, &config.history_prefix);
                let store = Arc::new(
                    RedisStore::connect(&config.redis_url, prefixes)
                        .await
                        .context("Failed to connect to Redis")?,
                );
                AppBuilder::new().bin_store(store.clone()).status_history(store)
            }
        };

        let app = builder.build()?;

        if let Some(path) = &config.seed_file {
            let bins = load_seed_file(path).await?;
            app.seed(bins).await.context("Failed to seed bins")?;
        }

        Ok(Self::new(app))
    }
}
