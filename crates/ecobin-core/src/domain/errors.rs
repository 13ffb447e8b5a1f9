//! Errors - エラー型と分類
//!
//! クライアントに返すメッセージはここで定数として固定します。
//! HTTP 層はこの分類（ErrorKind）と DomainError の種類だけを見て
//! ステータスコードを決めます。

use thiserror::Error;

pub const BIN_ID_REQUIRED: &str = "Bin ID is required";
pub const INVALID_STATUS: &str = "Status must be either OK or FULL";
pub const BIN_NOT_FOUND: &str = "Bin not found";

/// ErrorKind はエラーの運用分類
///
/// - Client: 呼び出し側が入力を直せば回復する（ストアには触れていない、または対象がない）
/// - Infrastructure: ストア障害。自動リトライはしない
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Client,
    Infrastructure,
}

/// DomainError はアプリケーション層が返すエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Missing or malformed identifier / status. No store access happened.
    #[error("{0}")]
    InvalidRequest(String),

    /// Well-formed identifier with no matching record.
    #[error("{0}")]
    NotFound(String),

    /// Any failure raised by the store access layer.
    #[error("{0}")]
    StoreUnavailable(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidRequest(_) | DomainError::NotFound(_) => ErrorKind::Client,
            DomainError::StoreUnavailable(_) => ErrorKind::Infrastructure,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidRequest(message)
            | DomainError::NotFound(message)
            | DomainError::StoreUnavailable(message) => message,
        }
    }

    pub fn bin_not_found() -> Self {
        DomainError::NotFound(BIN_NOT_FOUND.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
