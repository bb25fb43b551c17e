//! Artifact serialization

use crate::error::OutputError;
use crate::model::MergedGraph;
use std::path::Path;

/// Render the merged graph as pretty JSON (two-space indent) with a trailing newline.
pub fn to_json_string(graph: &MergedGraph) -> Result<String, OutputError> {
    let mut json = serde_json::to_string_pretty(graph)?;
    json.push('\n');
    Ok(json)
}

/// Write the merged graph to `path`, creating parent directories as needed.
pub fn write_graph(graph: &MergedGraph, path: &Path) -> Result<(), OutputError> {
    let json = to_json_string(graph)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    std::fs::write(path, json).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Merged graph written: {}", path.display());
    Ok(())
}
