//! StatusUpdate - 状態報告の履歴レコードと入力

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bin::BinId;
use super::errors::{DomainError, DomainResult, INVALID_STATUS};
use super::ids::StatusUpdateId;
use super::status::BinStatus;
use super::timestamp::iso8601;

/// Append-only history record of one status report.
///
/// Many records reference one bin; the bin holds no back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub id: StatusUpdateId,
    pub bin_id: BinId,
    pub status: BinStatus,
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
}

/// StatusUpdateRequest は検証前の入力
///
/// HTTP 層はパス上の id とボディの status をそのまま詰めて渡します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdateRequest {
    pub bin_id: String,
    pub status: Option<String>,
}

/// 検証済みの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStatusUpdate {
    pub bin_id: BinId,
    pub status: BinStatus,
}

impl StatusUpdateRequest {
    pub fn new(bin_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            bin_id: bin_id.into(),
            status: Some(status.into()),
        }
    }

    /// id → status の順に検証（最初の違反で止まる）
    pub fn validate(&self) -> DomainResult<ValidatedStatusUpdate> {
        let bin_id = BinId::parse(self.bin_id.as_str())?;
        let status = match self.status.as_deref() {
            Some(raw) => BinStatus::parse(raw)?,
            None => return Err(DomainError::InvalidRequest(INVALID_STATUS.to_string())),
        };
        Ok(ValidatedStatusUpdate { bin_id, status })
    }
}
