//! StatusUpdateService - 状態報告の書き込みパス
//!
//! # フロー
//! 1. 入力検証（id → status）。違反ならストアには一切触れない
//! 2. 現在時刻を 1 回だけ取得（2 つの書き込みで共有）
//! 3. ビンの条件付き更新と履歴の追記を並行に発行し、両方の完了を待つ
//! 4. 結果をクライアント向けの結果に写像
//!
//! # 整合性
//! 2 つの書き込みはトランザクションではありません。
//! ビンが存在しなかった場合でも履歴は書かれている可能性があり（孤児レコード）、
//! 片方だけ失敗した場合もロールバックはしません。どちらも StoreUnavailable として返します。

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{Bin, DomainError, DomainResult, StatusUpdate, StatusUpdateRequest};
use crate::ports::{BinStore, Clock, IdGenerator, StatusHistory};

pub struct StatusUpdateService {
    bins: Arc<dyn BinStore>,
    history: Arc<dyn StatusHistory>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl StatusUpdateService {
    pub fn new(
        bins: Arc<dyn BinStore>,
        history: Arc<dyn StatusHistory>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            bins,
            history,
            clock,
            ids,
        }
    }

    /// Apply one status report and return the post-update bin.
    ///
    /// No retries and no idempotency key: repeating a call appends another
    /// history record and leaves the bin in the same state.
    pub async fn update_bin_status(&self, request: StatusUpdateRequest) -> DomainResult<Bin> {
        let validated = request.validate().inspect_err(|e| {
            debug!(bin_id = %request.bin_id, reason = %e, "Rejected status update");
        })?;
        let bin_id = validated.bin_id;
        let status = validated.status;

        let timestamp = self.clock.now();
        let record = StatusUpdate {
            id: self.ids.generate_status_update_id(),
            bin_id: bin_id.clone(),
            status,
            timestamp,
        };
        let record_id = record.id;

        debug!(bin_id = %bin_id, status = %status, update_id = %record_id, "Updating bin status");

        let (updated, appended) = tokio::join!(
            self.bins.update_status(&bin_id, status, timestamp),
            self.history.append(record),
        );

        let updated = updated.map_err(|e| {
            error!(bin_id = %bin_id, error = %e, "Error updating bin status");
            DomainError::from(e)
        })?;
        appended.map_err(|e| {
            error!(bin_id = %bin_id, update_id = %record_id, error = %e, "Error appending status history");
            DomainError::from(e)
        })?;

        match updated {
            Some(bin) => {
                info!(bin_id = %bin_id, status = %status, update_id = %record_id, "Bin status updated");
                Ok(bin)
            }
            None => {
                warn!(bin_id = %bin_id, update_id = %record_id, "Status reported for unknown bin; history record left orphaned");
                Err(DomainError::bin_not_found())
            }
        }
    }
}
