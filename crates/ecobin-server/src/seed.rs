//! Startup seeding from a JSON array of bin records.

use std::path::{Path, PathBuf};

use ecobin_core::domain::Bin;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_seed(raw: &str) -> Result<Vec<Bin>, SeedError> {
    Ok(serde_json::from_str(raw)?)
}

pub async fn load_seed_file(path: &Path) -> Result<Vec<Bin>, SeedError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let bins = parse_seed(&raw)?;
    info!("Loaded {} bins from {}", bins.len(), path.display());
    Ok(bins)
}
