//! Embedded graph block extraction from course documents

use crate::error::{ConfigError, SourceError};
use coursemap_core::RawGraph;
use regex::Regex;
use std::path::Path;

/// Finds the `<script ... id="<block_id>" ...>` element of a course document.
#[derive(Debug, Clone)]
pub struct BlockLocator {
    block_id: String,
    pattern: Regex,
}

impl BlockLocator {
    pub fn new(block_id: &str) -> Result<Self, ConfigError> {
        let id = regex::escape(block_id);
        // `id` must be a whole attribute name; both quotes must match.
        let pattern = format!(
            r#"(?is)<script\b[^>]*\sid\s*=\s*(?:"{id}"|'{id}')[^>]*>(.*?)</script\s*>"#
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| ConfigError::Invalid(format!("block id {:?}: {}", block_id, e)))?;

        Ok(BlockLocator {
            block_id: block_id.to_string(),
            pattern,
        })
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    /// Text inside the first matching element, if any.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Parse the embedded payload of an already-read document. `path` is only used in errors.
pub fn parse_document(text: &str, locator: &BlockLocator, path: &Path) -> Result<RawGraph, SourceError> {
    let block = locator.extract(text).ok_or_else(|| SourceError::MissingDataBlock {
        path: path.to_path_buf(),
        block_id: locator.block_id().to_string(),
    })?;

    serde_json::from_str(block.trim()).map_err(|source| SourceError::MalformedPayload {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a course document from disk and parse its embedded graph.
pub fn load_course_graph(path: &Path, locator: &BlockLocator) -> Result<RawGraph, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let graph = parse_document(&text, locator, path)?;
    tracing::info!(
        "Loaded {} nodes, {} links from {}",
        graph.nodes.len(),
        graph.links.len(),
        path.display()
    );
    Ok(graph)
}
