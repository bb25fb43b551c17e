//! Error types for coursemap-ingest

use coursemap_core::OutputError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures while reading a course document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read course document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no embedded `{block_id}` data block found in {path}")]
    MissingDataBlock { path: PathBuf, block_id: String },

    #[error("embedded data block in {path} is not a valid graph payload: {source}")]
    MalformedPayload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while loading or validating the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid annotation file pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Anything that aborts a merge run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
