//! Cross-course edges discovered in per-module annotation spreadsheets
//!
//! Annotation files are hand-maintained, so every mismatch (wrong file name, missing
//! header, odd label, unknown node) skips that file, row or reference and carries on.

use crate::config::AnnotationConfig;
use crate::error::ConfigError;
use crate::table::parse_table;
use crate::tokenizer::connection_refs;
use coursemap_core::{namespaced_id, EdgeRegistry, Insertion, NodePool};
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Tag carried by every edge found in annotation files.
pub const CROSS_COURSE_TAG: &str = "cross-course";

static MODULE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Module\s+(\d+)_").expect("valid module pattern"));

/// One annotation file, already split into rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationTable {
    pub file_name: String,
    pub rows: Vec<Vec<String>>,
}

impl AnnotationTable {
    pub fn new(file_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        AnnotationTable {
            file_name: file_name.into(),
            rows,
        }
    }

    /// Build a table from raw file text.
    pub fn from_text(file_name: impl Into<String>, text: &str) -> Self {
        Self::new(file_name, parse_table(text))
    }
}

/// Counts from one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub tables_used: usize,
    pub tables_skipped: usize,
    pub source_rows: usize,
    pub edges_created: usize,
}

pub struct CrossLinkExtractor<'a> {
    config: &'a AnnotationConfig,
    tags: [String; 2],
}

impl<'a> CrossLinkExtractor<'a> {
    pub fn new(config: &'a AnnotationConfig) -> Self {
        let pair_tag = format!("{}-{}", config.source_course, config.target_course);
        CrossLinkExtractor {
            config,
            tags: [CROSS_COURSE_TAG.to_string(), pair_tag],
        }
    }

    /// Module number encoded in a file name as `Module <digits>_`.
    pub fn module_number(&self, file_name: &str) -> Option<i64> {
        MODULE_PATTERN
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Find the label and connections columns in the leading rows.
    /// Each header is taken from the first row that contains it.
    pub fn locate_columns(&self, rows: &[Vec<String>]) -> Option<(usize, usize)> {
        let label_header = self.config.label_header.trim().to_lowercase();
        let connections_header = self.config.connections_header.trim().to_lowercase();

        let mut label_col = None;
        let mut connections_col = None;
        for row in rows.iter().take(self.config.header_scan_rows) {
            let lowered: Vec<String> = row.iter().map(|c| c.trim().to_lowercase()).collect();
            if label_col.is_none() {
                label_col = lowered.iter().position(|c| *c == label_header);
            }
            if connections_col.is_none() {
                connections_col = lowered.iter().position(|c| *c == connections_header);
            }
        }

        Some((label_col?, connections_col?))
    }

    /// Feed the edges of one table into `registry`.
    ///
    /// Returns `(rows naming a known source node, new edges)`, or `None` when the
    /// table is not an annotation table at all.
    pub fn extract(
        &self,
        table: &AnnotationTable,
        pool: &NodePool,
        registry: &mut EdgeRegistry,
    ) -> Option<(usize, usize)> {
        let Some(module_num) = self.module_number(&table.file_name) else {
            debug!("Ignoring {}: no module number in file name", table.file_name);
            return None;
        };
        let Some((label_col, connections_col)) = self.locate_columns(&table.rows) else {
            debug!("Ignoring {}: label/connections headers not found", table.file_name);
            return None;
        };

        let mut source_rows = 0;
        let mut created = 0;
        // The first row is always treated as a header row.
        for row in table.rows.iter().skip(1) {
            let Some(label_cell) = row.get(label_col) else {
                continue;
            };
            let label = label_cell.trim().to_uppercase();
            if !is_label(&label) {
                continue;
            }

            let base_id = format!("{}{}", module_num, label);
            let source = namespaced_id(&self.config.source_course, &base_id);
            if !pool.contains(&source) {
                debug!("{}: no node {}", table.file_name, source);
                continue;
            }
            source_rows += 1;

            let cell = row.get(connections_col).map(String::as_str).unwrap_or("");
            for reference in connection_refs(cell) {
                let target = namespaced_id(&self.config.target_course, &reference);
                if !pool.contains(&target) {
                    debug!("{}: {} references unknown node {}", table.file_name, source, target);
                    continue;
                }
                if registry.insert(&source, &target, &self.tags) == Insertion::Created {
                    created += 1;
                }
            }
        }

        Some((source_rows, created))
    }

    /// Run [`extract`](Self::extract) over every table, in the given order.
    pub fn extract_all(
        &self,
        tables: &[AnnotationTable],
        pool: &NodePool,
        registry: &mut EdgeRegistry,
    ) -> ExtractionStats {
        let mut stats = ExtractionStats::default();
        for table in tables {
            match self.extract(table, pool, registry) {
                Some((rows, created)) => {
                    stats.tables_used += 1;
                    stats.source_rows += rows;
                    stats.edges_created += created;
                }
                None => stats.tables_skipped += 1,
            }
        }

        info!(
            "Annotations: {} tables used, {} skipped, {} rows with known sources, {} new cross-course edges",
            stats.tables_used, stats.tables_skipped, stats.source_rows, stats.edges_created
        );
        stats
    }
}

/// One or more ASCII letters, nothing else.
fn is_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_uppercase())
}

/// Compile the file-name glob, matched case-insensitively.
pub fn file_matcher(pattern: &str) -> Result<GlobMatcher, ConfigError> {
    let glob = GlobBuilder::new(pattern).case_insensitive(true).build()?;
    Ok(glob.compile_matcher())
}

/// Read every matching file in `dir`, sorted by file name.
///
/// A missing or unreadable directory yields no tables; an unreadable file is skipped.
pub fn read_annotation_dir(dir: &Path, pattern: &str) -> Result<Vec<AnnotationTable>, ConfigError> {
    let matcher = file_matcher(pattern)?;

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read annotation directory {}: {}", dir.display(), e);
            return Ok(Vec::new());
        }
    };

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        if matcher.is_match(&file_name) {
            files.push((file_name, path));
        }
    }
    files.sort();

    let mut tables = Vec::with_capacity(files.len());
    for (file_name, path) in files {
        match std::fs::read_to_string(&path) {
            Ok(text) => tables.push(AnnotationTable::from_text(file_name, &text)),
            Err(e) => warn!("Cannot read annotation file {}: {}", path.display(), e),
        }
    }

    debug!("Found {} annotation files in {}", tables.len(), dir.display());
    Ok(tables)
}
