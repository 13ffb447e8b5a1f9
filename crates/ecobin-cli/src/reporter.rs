//! StatusReporter - 2 つのアクション（OK / FULL）で状態を報告する
//!
//! 状態は `watch` チャネルで公開するので、表示側は購読して再描画できます。
//!
//! # 状態遷移
//! - 報告開始: `loading = true`、前回の `error` をクリア
//! - 成功: `confirmation = true`（`dismiss` で消える）、更新後の Bin をコールバックへ
//! - 失敗: `error` にメッセージを保持。他には何もしない
//! - 結果によらず、完了したら `loading = false`

use ecobin_core::domain::{Bin, BinId, BinStatus};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::transport::ReportTransport;

pub const CONFIRMATION: &str = "Thank you! Status has been updated successfully.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporterState {
    pub loading: bool,
    pub error: Option<String>,
    pub confirmation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Updated(Bin),
    Failed(String),
    /// 前の報告がまだ完了していない
    Busy,
}

pub struct StatusReporter<T> {
    transport: T,
    bin_id: BinId,
    state: watch::Sender<ReporterState>,
}

impl<T: ReportTransport> StatusReporter<T> {
    pub fn new(transport: T, bin_id: BinId) -> Self {
        let (state, _) = watch::channel(ReporterState::default());
        Self {
            transport,
            bin_id,
            state,
        }
    }

    pub fn bin_id(&self) -> &BinId {
        &self.bin_id
    }

    /// Actions offered to the user, in display order.
    pub fn actions(&self) -> [BinStatus; 2] {
        BinStatus::ALL
    }

    pub fn state(&self) -> ReporterState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReporterState> {
        self.state.subscribe()
    }

    pub async fn report<F>(&self, status: BinStatus, on_updated: F) -> ReportOutcome
    where
        F: FnOnce(&Bin),
    {
        let mut started = false;
        self.state.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            state.loading = true;
            state.error = None;
            started = true;
            true
        });

        if !started {
            debug!(bin_id = %self.bin_id, "Report already in flight");
            return ReportOutcome::Busy;
        }

        match self.transport.update_bin_status(&self.bin_id, status).await {
            Ok(bin) => {
                info!(bin_id = %self.bin_id, status = %bin.status, "Status reported");
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.confirmation = true;
                });
                on_updated(&bin);
                ReportOutcome::Updated(bin)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(bin_id = %self.bin_id, error = %message, "Status report failed");
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(message.clone());
                });
                ReportOutcome::Failed(message)
            }
        }
    }

    /// Hides the success confirmation.
    pub fn dismiss(&self) {
        self.state
            .send_if_modified(|state| std::mem::replace(&mut state.confirmation, false));
    }
}
