//! BinStatus - ビンの充填状態

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::{DomainError, INVALID_STATUS};

/// Fill state of a bin. Exactly two values exist.
///
/// Serialized as SCREAMING_SNAKE_CASE: `"OK"` / `"FULL"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinStatus {
    Ok,
    Full,
}

impl BinStatus {
    /// UI が提示する 2 つのアクション
    pub const ALL: [BinStatus; 2] = [BinStatus::Ok, BinStatus::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            BinStatus::Ok => "OK",
            BinStatus::Full => "FULL",
        }
    }

    /// ワイヤ表現から変換（大文字小文字は区別する）
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "OK" => Ok(BinStatus::Ok),
            "FULL" => Ok(BinStatus::Full),
            _ => Err(DomainError::InvalidRequest(INVALID_STATUS.to_string())),
        }
    }
}

impl FromStr for BinStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
