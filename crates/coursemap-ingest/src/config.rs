//! Run configuration
//!
//! Every field has a default, so an empty (or absent) config file describes the
//! standard 6A + 6C merge.

use crate::error::ConfigError;
use coursemap_core::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One course document and where its modules land after merging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseSource {
    /// Namespace prefix for node ids, e.g. `6A`.
    pub tag: String,
    /// Document holding the embedded graph block.
    pub document: PathBuf,
    /// Added to every module number of this course.
    #[serde(default)]
    pub module_offset: i64,
}

/// Where annotation spreadsheets live and how to read them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnotationConfig {
    pub dir: PathBuf,
    /// Glob matched case-insensitively against file names.
    pub pattern: String,
    /// Course whose nodes are named by the label column.
    pub source_course: String,
    /// Course whose nodes are named in the connections column.
    pub target_course: String,
    pub label_header: String,
    pub connections_header: String,
    /// How many leading rows are searched for header cells.
    pub header_scan_rows: usize,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        AnnotationConfig {
            dir: PathBuf::from("annotations"),
            pattern: "*.csv".to_string(),
            source_course: "6A".to_string(),
            target_course: "6C".to_string(),
            label_header: "label".to_string(),
            connections_header: "6c connections".to_string(),
            header_scan_rows: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MergeConfig {
    /// Id attribute of the element that wraps the embedded JSON.
    pub block_id: String,
    pub courses: Vec<CourseSource>,
    pub annotations: AnnotationConfig,
    pub layout: LayoutConfig,
    pub output: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            block_id: "graph-data".to_string(),
            courses: vec![
                CourseSource {
                    tag: "6A".to_string(),
                    document: PathBuf::from("map_6A.html"),
                    module_offset: 0,
                },
                CourseSource {
                    tag: "6C".to_string(),
                    document: PathBuf::from("map_6C.html"),
                    module_offset: 10,
                },
            ],
            annotations: AnnotationConfig::default(),
            layout: LayoutConfig::default(),
            output: PathBuf::from("graph_6AC.json"),
        }
    }
}

impl MergeConfig {
    /// Parse a TOML config.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MergeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.courses.is_empty() {
            return Err(ConfigError::Invalid("at least one course is required".to_string()));
        }

        let mut tags = HashSet::new();
        for course in &self.courses {
            if course.tag.trim().is_empty() {
                return Err(ConfigError::Invalid("course tag must not be empty".to_string()));
            }
            if !tags.insert(course.tag.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate course tag `{}`", course.tag)));
            }
        }

        for tag in [&self.annotations.source_course, &self.annotations.target_course] {
            if !tags.contains(tag.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "annotation course `{}` is not one of the configured courses",
                    tag
                )));
            }
        }

        if self.block_id.trim().is_empty() {
            return Err(ConfigError::Invalid("block_id must not be empty".to_string()));
        }

        Ok(())
    }

    /// Resolve a configured path against the run root. Absolute paths are kept.
    pub fn resolve(root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}
