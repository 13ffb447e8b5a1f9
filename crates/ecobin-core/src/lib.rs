//! ecobin-core
//!
//! Core building blocks for the waste-bin status service.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Bin, BinStatus, StatusUpdate, ids, errors, timestamp）
//! - **ports**: 抽象化レイヤー（BinStore, StatusHistory, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（AppBuilder, StatusUpdateService, BinQueryService）
//! - **impls**: 実装（InMemoryStore など開発・テスト用）
//! - **config**: 環境変数からの設定
//! - **observability**: tracing の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
