//! StatusHistory port - 状態報告の追記専用ログ

use async_trait::async_trait;

use super::bin_store::StoreError;
use crate::domain::{BinId, StatusUpdate};

/// StatusHistory は履歴レコードを追記する
///
/// # 設計原則
/// - 追記のみ。書いたレコードは変更も削除もしない
/// - `append` は単一アイテムの挿入（ストアが落ちていない限り成功する）
/// - 参照先のビンが存在するかは確認しない
#[async_trait]
pub trait StatusHistory: Send + Sync {
    async fn append(&self, record: StatusUpdate) -> Result<(), StoreError>;

    /// 追記順で返す
    async fn list_for_bin(&self, bin_id: &BinId) -> Result<Vec<StatusUpdate>, StoreError>;
}
