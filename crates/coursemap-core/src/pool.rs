//! The merged node pool

use crate::model::Node;
use std::collections::HashMap;

/// All decorated nodes of every course, in course-concatenation order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct NodePool {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl NodePool {
    pub fn new() -> Self {
        NodePool {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a node. Returns `false` and leaves the pool untouched if the id is already taken.
    pub fn push(&mut self, node: Node) -> bool {
        if self.index.contains_key(&node.id) {
            tracing::warn!("Duplicate node id {}, keeping first occurrence", node.id);
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add every node of one course. Returns how many were accepted.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) -> usize {
        let mut added = 0;
        for node in nodes {
            if self.push(node) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Course tag of a node id, if present.
    pub fn course_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|n| n.course.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
