//! Config - 環境変数からの設定読み込み
//!
//! 未設定の変数はデフォルト値を使い、その旨をログに残します。
//! 値が解釈できない場合はパニックせず ConfigError を返します。

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

/// ストアのバックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(format!("expected `memory` or `redis`, got `{other}`")),
        }
    }
}

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub store: StoreBackend,
    pub redis_url: String,
    pub bins_prefix: String,
    pub history_prefix: String,
    pub log_format: LogFormat,
    /// 起動時に投入するビン（JSON 配列）
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "ECOBIN_PORT", "8080")?,
            store: try_load(&lookup, "ECOBIN_STORE", "memory")?,
            redis_url: try_load(&lookup, "REDIS_URL", "redis://127.0.0.1:6379")?,
            bins_prefix: try_load(&lookup, "ECOBIN_BINS_PREFIX", "bins")?,
            history_prefix: try_load(&lookup, "ECOBIN_HISTORY_PREFIX", "status-updates")?,
            log_format: try_load(&lookup, "ECOBIN_LOG_FORMAT", "text")?,
            seed_file: lookup("ECOBIN_SEED_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.clone(),
        reason: e.to_string(),
    })
}
