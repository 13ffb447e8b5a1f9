//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryStore**: BinStore + StatusHistory のプロセス内実装
//!
//! # 本番用実装
//! 本番用の実装は別クレートに配置します：
//! - `ecobin-redis`: RedisStore

pub mod inmem_store;

pub use self::inmem_store::InMemoryStore;
