//! ecobin-cli
//!
//! ビンの状態を報告するクライアント。
//!
//! - **transport**: ステータス API の呼び出し（ReportTransport, HttpTransport）
//! - **reporter**: 2 つのアクションと表示用の状態（StatusReporter）

pub mod reporter;
pub mod transport;

pub use reporter::{CONFIRMATION, ReportOutcome, ReporterState, StatusReporter};
pub use transport::{HttpTransport, ReportError, ReportTransport};
