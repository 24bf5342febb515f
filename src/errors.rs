use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid bind address {addr:?}: {source}")]
    Bind {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
