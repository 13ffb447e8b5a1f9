//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! ストア・時計・ID 生成器を明示的に受け取り、サービスを組み立てます。
//! グローバルなクライアントは持ちません。

use std::sync::Arc;

use tracing::info;

use super::queries::BinQueryService;
use super::status_update::StatusUpdateService;
use crate::domain::{Bin, DomainError, DomainResult};
use crate::ports::{BinStore, Clock, IdGenerator, StatusHistory, SystemClock, UlidGenerator};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// let app = AppBuilder::new()
///     .bin_store(store.clone())
///     .status_history(store)
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - ストアが未設定なら build() で BuildError を返す
/// - clock / id 生成器は省略時に SystemClock / UlidGenerator
#[derive(Default)]
pub struct AppBuilder {
    bins: Option<Arc<dyn BinStore>>,
    history: Option<Arc<dyn StatusHistory>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing port: {0}. It must be supplied before build().")]
    MissingPort(&'static str),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bin_store(mut self, bins: Arc<dyn BinStore>) -> Self {
        self.bins = Some(bins);
        self
    }

    pub fn status_history(mut self, history: Arc<dyn StatusHistory>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let bins = self.bins.ok_or(BuildError::MissingPort("bin_store"))?;
        let history = self.history.ok_or(BuildError::MissingPort("status_history"))?;
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let ids: Arc<dyn IdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(clock.clone())),
        };

        Ok(App {
            status_updates: StatusUpdateService::new(
                bins.clone(),
                history.clone(),
                clock,
                ids,
            ),
            queries: BinQueryService::new(bins.clone(), history),
            bins,
        })
    }
}

/// App は組み立て済みのサービス群
pub struct App {
    pub status_updates: StatusUpdateService,
    pub queries: BinQueryService,
    bins: Arc<dyn BinStore>,
}

impl App {
    /// ビンを一括投入（起動時シード用）
    pub async fn seed(&self, bins: Vec<Bin>) -> DomainResult<usize> {
        let count = bins.len();
        for bin in bins {
            self.bins.put_bin(bin).await.map_err(DomainError::from)?;
        }
        info!(count, "Seeded bins");
        Ok(count)
    }
}
