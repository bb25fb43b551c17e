//! Error types for coursemap-core

use std::path::PathBuf;
use thiserror::Error;

/// Failure while writing the merged artifact.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize merged graph: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
