//! InMemoryStore - 開発・テスト用のドキュメントストア
//!
//! BinStore と StatusHistory の両方を実装します。
//! 各操作は 1 回のロック取得で完結するので、アイテム単位ではアトミックです。
//! 2 つの書き込みをまたぐトランザクションは（本番ストアと同じく）ありません。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{Bin, BinId, BinStatus, StatusUpdate};
use crate::ports::{BinStore, StatusHistory, StoreError};

/// InMemoryStore はプロセス内のストア
///
/// # 実装詳細
/// - ビン: `HashMap<BinId, Bin>`
/// - 履歴: 追記順の `Vec<StatusUpdate>`（ビンの存在は確認しない）
///
/// # 使用例
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// store.put_bin(bin).await?;
/// let app = AppBuilder::new()
///     .bin_store(store.clone())
///     .status_history(store)
///     .build()?;
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    bins: RwLock<HashMap<BinId, Bin>>,
    history: RwLock<Vec<StatusUpdate>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期データ入りで作成
    pub fn with_bins(bins: impl IntoIterator<Item = Bin>) -> Self {
        let bins = bins.into_iter().map(|bin| (bin.id.clone(), bin)).collect();
        Self {
            bins: RwLock::new(bins),
            history: RwLock::new(Vec::new()),
        }
    }

    /// 全履歴件数（ビンを問わない）
    pub async fn history_len(&self) -> usize {
        self.history.read().await.len()
    }
}

#[async_trait]
impl BinStore for InMemoryStore {
    async fn update_status(
        &self,
        id: &BinId,
        status: BinStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Bin>, StoreError> {
        let mut bins = self.bins.write().await;
        let Some(bin) = bins.get_mut(id) else {
            return Ok(None);
        };
        bin.status = status;
        bin.last_updated = at;
        Ok(Some(bin.clone()))
    }

    async fn get_bin(&self, id: &BinId) -> Result<Option<Bin>, StoreError> {
        Ok(self.bins.read().await.get(id).cloned())
    }

    async fn put_bin(&self, bin: Bin) -> Result<(), StoreError> {
        self.bins.write().await.insert(bin.id.clone(), bin);
        Ok(())
    }
}

#[async_trait]
impl StatusHistory for InMemoryStore {
    async fn append(&self, record: StatusUpdate) -> Result<(), StoreError> {
        self.history.write().await.push(record);
        Ok(())
    }

    async fn list_for_bin(&self, bin_id: &BinId) -> Result<Vec<StatusUpdate>, StoreError> {
        Ok(self
            .history
            .read()
            .await
            .iter()
            .filter(|record| &record.bin_id == bin_id)
            .cloned()
            .collect())
    }
}
