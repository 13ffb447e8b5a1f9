//! BinStore port - ビンレコードの正本（ドキュメントストア）
//!
//! すべてポイント操作（単一キー）です。スキャンも二次インデックスもありません。
//!
//! # 実装
//! - `InMemoryStore`（impls, テスト・開発用）
//! - `RedisStore`（`ecobin-redis` クレート, 本番用）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{Bin, BinId, BinStatus, DomainError};

/// StoreError はストアアクセス層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::StoreUnavailable(err.to_string())
    }
}

/// BinStore はビンレコードを扱う
///
/// # 設計原則
/// - `update_status` は単一アイテムの条件付き更新（アイテム単位でアトミック）
/// - レコードがなければ `Ok(None)` を返し、何も作らない
/// - 更新後のレコード全体を返す
#[async_trait]
pub trait BinStore: Send + Sync {
    async fn update_status(
        &self,
        id: &BinId,
        status: BinStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Bin>, StoreError>;

    async fn get_bin(&self, id: &BinId) -> Result<Option<Bin>, StoreError>;

    /// レコードを丸ごと書き込む（シード・管理用）
    async fn put_bin(&self, bin: Bin) -> Result<(), StoreError>;
}
