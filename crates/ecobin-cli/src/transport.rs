//! Transport - ステータス API の呼び出し
//!
//! 失敗時はサーバの `message` をそのまま保持します（表示側は区別しない）。

use async_trait::async_trait;
use ecobin_core::domain::{Bin, BinId, BinStatus};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const UPDATE_FALLBACK: &str = "Failed to update bin status";
const FETCH_FALLBACK: &str = "Failed to fetch bin";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Non-2xx answer. `message` is the server's text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        ReportError::Transport(e.to_string())
    }
}

/// ReportTransport はステータス API への経路
///
/// テストではスクリプト化した実装に差し替えます。
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn update_bin_status(
        &self,
        bin_id: &BinId,
        status: BinStatus,
    ) -> Result<Bin, ReportError>;

    async fn get_bin(&self, bin_id: &BinId) -> Result<Bin, ReportError>;
}

#[derive(Serialize)]
struct StatusBody {
    status: BinStatus,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HttpTransport は reqwest ベースの実装
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(base: &str) -> Result<Self, ReportError> {
        let base = Url::parse(base).map_err(|e| ReportError::InvalidUrl(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ReportError::InvalidUrl(base.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    /// `{base}/bins/{id}[/{tail}]`. The id is percent-encoded as one segment.
    fn bin_url(&self, bin_id: &BinId, tail: Option<&str>) -> Result<Url, ReportError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ReportError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty().push("bins").push(bin_id.as_str());
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }
}

async fn read_bin(response: Response, fallback: &str) -> Result<Bin, ReportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<Bin>().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => fallback.to_string(),
    };
    debug!(status = status.as_u16(), message = %message, "Request rejected");

    Err(ReportError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ReportTransport for HttpTransport {
    async fn update_bin_status(
        &self,
        bin_id: &BinId,
        status: BinStatus,
    ) -> Result<Bin, ReportError> {
        let url = self.bin_url(bin_id, Some("status"))?;
        debug!(url = %url, status = %status, "Reporting bin status");

        let response = self
            .client
            .put(url)
            .json(&StatusBody { status })
            .send()
            .await?;

        read_bin(response, UPDATE_FALLBACK).await
    }

    async fn get_bin(&self, bin_id: &BinId) -> Result<Bin, ReportError> {
        let url = self.bin_url(bin_id, None)?;
        let response = self.client.get(url).send().await?;

        read_bin(response, FETCH_FALLBACK).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare("http://localhost:8080", "http://localhost:8080/bins/abc123/status")]
    #[case::trailing_slash("http://localhost:8080/", "http://localhost:8080/bins/abc123/status")]
    #[case::with_stage("https://api.example.com/prod", "https://api.example.com/prod/bins/abc123/status")]
    fn status_url(#[case] base: &str, #[case] expected: &str) {
        let transport = HttpTransport::new(base).unwrap();
        let id = BinId::parse("abc123").unwrap();
        assert_eq!(transport.bin_url(&id, Some("status")).unwrap().as_str(), expected);
    }

    #[test]
    fn bin_id_is_encoded_as_one_segment() {
        let transport = HttpTransport::new("http://localhost:8080").unwrap();
        let id = BinId::parse("a/b c").unwrap();
        assert_eq!(
            transport.bin_url(&id, None).unwrap().as_str(),
            "http://localhost:8080/bins/a%2Fb%20c"
        );
    }

    #[rstest]
    #[case::garbage("not a url")]
    #[case::no_base("mailto:ops@example.com")]
    fn rejects_unusable_base(#[case] base: &str) {
        assert!(matches!(HttpTransport::new(base), Err(ReportError::InvalidUrl(_))));
    }

    #[test]
    fn rejected_error_displays_server_message() {
        let err = ReportError::Rejected {
            status: 404,
            message: "Bin not found".into(),
        };
        assert_eq!(err.to_string(), "Bin not found");
    }

    #[test]
    fn request_body_uses_wire_status() {
        let body = serde_json::to_string(&StatusBody {
            status: BinStatus::Full,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"FULL"}"#);
    }
}
