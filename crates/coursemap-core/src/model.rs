//! Core data structures for the merged curriculum graph

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names written by the decorator and the layout engine.
/// Pass-through attributes with these names are dropped so they never shadow computed values.
pub const RESERVED_FIELDS: &[&str] = &[
    "id",
    "base_id",
    "course",
    "module_num",
    "course_module_num",
    "module_title",
    "sx",
    "sy",
    "x",
    "y",
    "rx",
    "ry",
];

/// A node as it appears in a single course document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawNode {
    pub id: String,
    pub module_num: i64,
    pub module_title: String,
    /// Any other attributes the document carries (descriptions, colours, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A prerequisite-style link inside a single course document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawLink {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// The `{nodes, links}` payload embedded in a course document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawGraph {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

/// A course node after namespacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Global id, `<course>:<base_id>`.
    pub id: String,
    /// Id within the course's own document.
    pub base_id: String,
    pub course: String,
    /// Module number shifted by the course offset.
    pub module_num: i64,
    /// Module number inside the course, before the offset.
    pub course_module_num: i64,
    pub module_title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A namespaced course link, still in document direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub tags: Vec<String>,
}

/// An undirected edge with `source <= target`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Sorted, deduplicated.
    pub tags: Vec<String>,
}

impl Edge {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A node with both layouts attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaidOutNode {
    #[serde(flatten)]
    pub node: Node,
    /// Row-banded position.
    pub sx: f64,
    pub sy: f64,
    /// Active position, a copy of the row-banded one.
    pub x: f64,
    pub y: f64,
    /// Radial position.
    pub rx: f64,
    pub ry: f64,
}

/// The final artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MergedGraph {
    pub nodes: Vec<LaidOutNode>,
    pub links: Vec<Edge>,
}
