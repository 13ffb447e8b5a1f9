//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システム（ドキュメントストア、時計、ID 採番）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - ストアが source of truth（正本）
//! - ビン更新と履歴追記は独立した 2 つのポイント書き込み（トランザクションなし）
//! - クライアントはプロセス全体のシングルトンではなく、明示的に注入する

pub mod bin_store;
pub mod clock;
pub mod id_generator;
pub mod status_history;

// 主要な trait を再エクスポート
pub use self::bin_store::{BinStore, StoreError};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::status_history::StatusHistory;
