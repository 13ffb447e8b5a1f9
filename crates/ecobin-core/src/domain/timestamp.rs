//! Timestamp - ISO-8601 文字列表現
//!
//! 永続化レコードと HTTP レスポンスの時刻は `2024-01-01T12:00:00.000Z` 形式
//! （ミリ秒精度・UTC・`Z` サフィックス）で統一します。
//! ブラウザの `Date.toISOString()` と同じ形です。

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// 時刻を ISO-8601（ミリ秒精度）で整形
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ミリ秒未満を切り捨て
///
/// 文字列化して戻したときに同じ値になるよう、Clock はこれを通した値を返す。
pub fn truncate(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// `#[serde(with = "iso8601")]` 用
pub mod iso8601 {
    use super::*;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
