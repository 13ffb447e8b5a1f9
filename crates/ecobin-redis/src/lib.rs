//! # Redis
//!
//! Document store for bins and their status history.
//!
//! ## Layout
//!
//! - Bin record: one JSON string per bin at `{bins_prefix}:{id}`
//! - History: one list per bin at `{history_prefix}:{binId}`, each element a JSON record
//!
//! ## Writes
//!
//! - Status update is a server-side script on a single key: read, bail out with nil if the
//!   record is absent, patch `status`/`lastUpdated`, write back, return the new document.
//!   Redis runs scripts atomically, so the update is atomic per item.
//! - History append is a single `RPUSH`.
//! - Nothing spans the two keys. Callers issue them independently.
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ecobin_core::domain::{Bin, BinId, BinStatus, StatusUpdate, timestamp};
use ecobin_core::ports::{BinStore, StatusHistory, StoreError};
use redis::{
    AsyncCommands, Client, RedisError, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tracing::{debug, info};

const UPDATE_STATUS_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
if not raw then
  return false
end
local bin = cjson.decode(raw)
bin['status'] = ARGV[1]
bin['lastUpdated'] = ARGV[2]
local updated = cjson.encode(bin)
redis.call('SET', KEYS[1], updated)
return updated
"#;

/// Key namespaces for the two record kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPrefixes {
    pub bins: String,
    pub history: String,
}

impl KeyPrefixes {
    pub fn new(bins: impl Into<String>, history: impl Into<String>) -> Self {
        Self {
            bins: bins.into(),
            history: history.into(),
        }
    }

    pub fn bin_key(&self, id: &BinId) -> String {
        format!("{}:{}", self.bins, id)
    }

    pub fn history_key(&self, id: &BinId) -> String {
        format!("{}:{}", self.history, id)
    }
}

impl Default for KeyPrefixes {
    fn default() -> Self {
        Self::new("bins", "status-updates")
    }
}

pub struct RedisStore {
    connection: ConnectionManager,
    prefixes: KeyPrefixes,
    update_script: Script,
}

impl RedisStore {
    pub async fn connect(redis_url: &str, prefixes: KeyPrefixes) -> Result<Self, StoreError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(500));

        let client = Client::open(redis_url).map_err(unavailable)?;
        let connection = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(unavailable)?;

        info!(bins = %prefixes.bins, history = %prefixes.history, "Connected to Redis");
        Ok(Self::from_connection(connection, prefixes))
    }

    pub fn from_connection(connection: ConnectionManager, prefixes: KeyPrefixes) -> Self {
        Self {
            connection,
            prefixes,
            update_script: Script::new(UPDATE_STATUS_SCRIPT),
        }
    }
}

fn unavailable(e: RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Corrupt(format!("{key}: {e}")))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl BinStore for RedisStore {
    async fn update_status(
        &self,
        id: &BinId,
        status: BinStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Bin>, StoreError> {
        let key = self.prefixes.bin_key(id);
        let mut connection = self.connection.clone();

        let raw: Option<String> = self
            .update_script
            .key(&key)
            .arg(status.as_str())
            .arg(timestamp::format(&at))
            .invoke_async(&mut connection)
            .await
            .map_err(unavailable)?;

        debug!(key = %key, found = raw.is_some(), "Ran status update script");
        raw.map(|raw| decode(&key, &raw)).transpose()
    }

    async fn get_bin(&self, id: &BinId) -> Result<Option<Bin>, StoreError> {
        let key = self.prefixes.bin_key(id);
        let mut connection = self.connection.clone();

        let raw: Option<String> = connection.get(&key).await.map_err(unavailable)?;
        raw.map(|raw| decode(&key, &raw)).transpose()
    }

    async fn put_bin(&self, bin: Bin) -> Result<(), StoreError> {
        let key = self.prefixes.bin_key(&bin.id);
        let document = encode(&bin)?;
        let mut connection = self.connection.clone();

        let _: () = connection.set(&key, document).await.map_err(unavailable)?;
        Ok(())
    }
}

#[async_trait]
impl StatusHistory for RedisStore {
    async fn append(&self, record: StatusUpdate) -> Result<(), StoreError> {
        let key = self.prefixes.history_key(&record.bin_id);
        let document = encode(&record)?;
        let mut connection = self.connection.clone();

        let _: usize = connection.rpush(&key, document).await.map_err(unavailable)?;
        Ok(())
    }

    async fn list_for_bin(&self, bin_id: &BinId) -> Result<Vec<StatusUpdate>, StoreError> {
        let key = self.prefixes.history_key(bin_id);
        let mut connection = self.connection.clone();

        let raw: Vec<String> = connection.lrange(&key, 0, -1).await.map_err(unavailable)?;
        raw.iter().map(|item| decode(&key, item)).collect()
    }
}
