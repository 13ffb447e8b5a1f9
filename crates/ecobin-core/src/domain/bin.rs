//! Bin - QR コードで識別される物理ゴミ箱のレコード
//!
//! `status` と `lastUpdated` だけが状態報告で変化します。
//! 作成・削除・一般編集はこのクレートの範囲外です。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::errors::{BIN_ID_REQUIRED, DomainError, DomainResult};
use super::status::BinStatus;
use super::timestamp::iso8601;

/// Opaque, stable bin identifier. Never empty once parsed.
///
/// Deserialization goes through `parse`, so stored records obey the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BinId(String);

impl BinId {
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidRequest(BIN_ID_REQUIRED.to_string()));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for BinId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BinId::parse(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bin record as persisted and as returned to clients (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    pub id: BinId,
    pub name: String,
    pub location_id: String,
    pub qr_code_id: String,
    pub status: BinStatus,
    #[serde(with = "iso8601")]
    pub last_updated: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl Bin {
    /// 新規ビン（初期状態は OK）
    pub fn new(
        id: BinId,
        name: impl Into<String>,
        location_id: impl Into<String>,
        qr_code_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location_id: location_id.into(),
            qr_code_id: qr_code_id.into(),
            status: BinStatus::Ok,
            last_updated: created_at,
            created_at,
        }
    }

    /// 状態報告を適用した後のレコード
    pub fn with_status(mut self, status: BinStatus, at: DateTime<Utc>) -> Self {
        self.status = status;
        self.last_updated = at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Bin {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        Bin::new(BinId::parse("abc123").unwrap(), "Main St", "loc-1", "qr-1", created)
    }

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(
            BinId::parse(""),
            Err(DomainError::InvalidRequest("Bin ID is required".to_string()))
        );
    }

    #[test]
    fn new_bin_starts_ok() {
        let bin = sample();
        assert_eq!(bin.status, BinStatus::Ok);
        assert_eq!(bin.last_updated, bin.created_at);
    }

    #[test]
    fn with_status_touches_only_mutable_fields() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let before = sample();
        let after = before.clone().with_status(BinStatus::Full, at);

        assert_eq!(after.status, BinStatus::Full);
        assert_eq!(after.last_updated, at);
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn json_shape_is_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc123",
                "name": "Main St",
                "locationId": "loc-1",
                "qrCodeId": "qr-1",
                "status": "OK",
                "lastUpdated": "2024-01-01T08:00:00.000Z",
                "createdAt": "2024-01-01T08:00:00.000Z",
            })
        );
    }

    #[test]
    fn stored_record_with_empty_id_does_not_deserialize() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["id"] = json!("");

        let err = serde_json::from_value::<Bin>(value).unwrap_err();
        assert!(err.to_string().contains("Bin ID is required"));
    }

    #[test]
    fn stored_record_round_trips() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(serde_json::from_value::<Bin>(value).unwrap(), sample());
    }
}
