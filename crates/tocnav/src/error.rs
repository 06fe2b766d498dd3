//! CLI error types.

use tocnav_config::ConfigError;
use tocnav_rst::ParseError;
use tocnav_site::BuildError;
use tocnav_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
