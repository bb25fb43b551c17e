//! Test utilities for coursemap-ingest

use crate::config::MergeConfig;
use crate::pipeline::CourseGraph;
use crate::source::BlockLocator;
use coursemap_core::RawGraph;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Wrap a JSON payload the way exported course maps embed it.
pub fn course_document(payload: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Course map</title></head>
<body>
<div id="graph"></div>
<script id="graph-data" type="application/json">
{}
</script>
<script src="render.js"></script>
</body>
</html>
"#,
        payload
    )
}

/// Locator for the default `graph-data` block.
pub fn graph_data() -> BlockLocator {
    BlockLocator::new("graph-data").unwrap()
}

/// A course payload with one module holding `1A` and `1B`, linked once.
pub fn one_module_payload(title: &str) -> String {
    format!(
        r#"{{
  "nodes": [
    {{"id": "1A", "module_num": 1, "module_title": "{title}", "label": "first"}},
    {{"id": "1B", "module_num": 1, "module_title": "{title}"}}
  ],
  "links": [
    {{"source": "1A", "target": "1B", "tags": ["prereq"]}}
  ]
}}"#
    )
}

/// Both default courses as in-memory graphs.
pub fn sample_courses() -> Vec<CourseGraph> {
    let config = MergeConfig::default();
    config
        .courses
        .iter()
        .map(|source| {
            let graph: RawGraph = serde_json::from_str(&one_module_payload("Numbers")).unwrap();
            CourseGraph::new(source, graph)
        })
        .collect()
}

/// Annotation text with a header row and the given `(label, connections)` rows.
pub fn annotation_csv(rows: &[(&str, &str)]) -> String {
    let mut text = String::from("Label,Objective,6C Connections\n");
    for (label, connections) in rows {
        text.push_str(&format!("{},Objective text,\"{}\"\n", label, connections));
    }
    text
}

/// A run root containing both default course documents and an annotation directory.
pub fn create_merge_root(annotations: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("map_6A.html"), course_document(&one_module_payload("Place value"))).unwrap();
    fs::write(root.join("map_6C.html"), course_document(&one_module_payload("Ratios"))).unwrap();

    fs::create_dir_all(root.join("annotations")).unwrap();
    for (name, content) in annotations {
        write_file(&root.join("annotations"), name, content);
    }

    temp_dir
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_merge_root() {
        let temp_dir = create_merge_root(&[("Module 1_notes.csv", "Label\n")]);
        let root = temp_dir.path();

        assert!(root.join("map_6A.html").exists());
        assert!(root.join("map_6C.html").exists());
        assert!(root.join("annotations/Module 1_notes.csv").exists());
    }
}
