//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: アプリケーションの構築とワイヤリング
//! - **StatusUpdateService**: 状態報告（ビン更新 + 履歴追記）
//! - **BinQueryService**: ビンと履歴の読み取り

pub mod builder;
pub mod queries;
pub mod status_update;

// 主要な型を再エクスポート
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::queries::BinQueryService;
pub use self::status_update::StatusUpdateService;
