//! BinQueryService - 公開ステータスページ用の読み取り

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{Bin, BinId, DomainError, DomainResult, StatusUpdate};
use crate::ports::{BinStore, StatusHistory};

pub struct BinQueryService {
    bins: Arc<dyn BinStore>,
    history: Arc<dyn StatusHistory>,
}

impl BinQueryService {
    pub fn new(bins: Arc<dyn BinStore>, history: Arc<dyn StatusHistory>) -> Self {
        Self { bins, history }
    }

    /// Fetch one bin by id.
    pub async fn get_bin(&self, bin_id: &str) -> DomainResult<Bin> {
        let bin_id = BinId::parse(bin_id)?;
        debug!(bin_id = %bin_id, "Getting bin");

        self.bins
            .get_bin(&bin_id)
            .await
            .map_err(|e| {
                error!(bin_id = %bin_id, error = %e, "Error fetching bin");
                DomainError::from(e)
            })?
            .ok_or_else(DomainError::bin_not_found)
    }

    /// History of one bin in append order. Unknown bins yield an empty list.
    pub async fn list_status_updates(&self, bin_id: &str) -> DomainResult<Vec<StatusUpdate>> {
        let bin_id = BinId::parse(bin_id)?;

        let records = self.history.list_for_bin(&bin_id).await.map_err(|e| {
            error!(bin_id = %bin_id, error = %e, "Error fetching status updates");
            DomainError::from(e)
        })?;

        debug!(bin_id = %bin_id, count = records.len(), "Listed status updates");
        Ok(records)
    }
}
