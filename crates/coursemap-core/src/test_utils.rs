//! Test utilities for coursemap-core

use crate::decorate::decorate_nodes;
use crate::model::{Node, RawNode};
use serde_json::Map;
use tempfile::TempDir;

/// A raw course node with no extra attributes.
pub fn raw_node(id: &str, module_num: i64, title: &str) -> RawNode {
    RawNode {
        id: id.to_string(),
        module_num,
        module_title: title.to_string(),
        extra: Map::new(),
    }
}

/// A decorated node for `course`, with a zero offset.
pub fn node(course: &str, base_id: &str, module_num: i64) -> Node {
    let raw = raw_node(base_id, module_num, "Module");
    decorate_nodes(&[raw], course, 0).remove(0)
}

/// `count` nodes named `<module><A..>` in one module.
pub fn module_nodes(course: &str, module_num: i64, count: usize) -> Vec<Node> {
    (0..count)
        .map(|i| {
            let letter = (b'A' + i as u8) as char;
            node(course, &format!("{}{}", module_num, letter), module_num)
        })
        .collect()
}

/// Empty scratch directory for writer tests.
pub fn scratch_dir() -> TempDir {
    TempDir::new().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_nodes() {
        let nodes = module_nodes("6A", 3, 3);
        let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["6A:3A", "6A:3B", "6A:3C"]);
    }
}
