//! Integration tests for Coursemap
//!
//! These tests run the whole merge over temporary directories.

use coursemap_core::to_json_string;
use coursemap_ingest::{run, MergeConfig, PipelineError, SourceError};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn course_document(payload: &str) -> String {
    format!(
        "<html><body>\n<script id=\"graph-data\" type=\"application/json\">{}</script>\n</body></html>\n",
        payload
    )
}

fn write_course(root: &Path, file: &str, module: i64) {
    let payload = serde_json::json!({
        "nodes": [
            {"id": format!("{}A", module), "module_num": module, "module_title": "Unit", "summary": "first"},
            {"id": format!("{}B", module), "module_num": module, "module_title": "Unit"}
        ],
        "links": [
            {"source": format!("{}B", module), "target": format!("{}A", module), "tags": ["prereq", " "]}
        ]
    });
    fs::write(root.join(file), course_document(&payload.to_string())).unwrap();
}

/// Two one-module courses and one annotation file linking `6A:1A` to `6C:1B`.
fn create_fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_course(root, "map_6A.html", 1);
    write_course(root, "map_6C.html", 1);

    let annotations = root.join("annotations");
    fs::create_dir_all(&annotations).unwrap();
    fs::write(
        annotations.join("6A Module 1_connections.csv"),
        "Label,Objective,6C Connections\nA,Count,\"see 1 b\"\n12,Bad label,1A\n",
    )
    .unwrap();
    fs::write(annotations.join("Overview.csv"), "Label,6C Connections\nA,1A\n").unwrap();

    temp_dir
}

#[test]
fn test_end_to_end_merge() {
    let temp_dir = create_fixture();
    let outcome = run(&MergeConfig::default(), temp_dir.path()).unwrap();
    let graph = &outcome.graph;

    assert_eq!(graph.nodes.len(), 4);
    let ids: HashSet<_> = graph.nodes.iter().map(|n| n.node.id.clone()).collect();
    assert_eq!(ids.len(), 4);
    assert!(ids.contains("6A:1A") && ids.contains("6C:1B"));

    let c = graph.nodes.iter().find(|n| n.node.id == "6C:1A").unwrap();
    assert_eq!(c.node.module_num, 11);
    assert_eq!(c.node.course_module_num, 1);
    assert_eq!(c.node.module_title, "6C M1: Unit");

    assert_eq!(graph.links.len(), 3);
    let internal: Vec<_> = graph.links.iter().filter(|e| e.tags == vec!["prereq"]).collect();
    assert_eq!(internal.len(), 2);
    assert_eq!(internal[0].source, "6A:1A");
    assert_eq!(internal[0].target, "6A:1B");

    let cross: Vec<_> = graph.links.iter().filter(|e| e.has_tag("cross-course")).collect();
    assert_eq!(cross.len(), 1);
    assert_eq!(cross[0].tags, vec!["6A-6C", "cross-course"]);

    for edge in &graph.links {
        assert!(edge.source <= edge.target);
        assert!(ids.contains(&edge.source) && ids.contains(&edge.target));
    }

    assert_eq!(outcome.report.cross_course_count, 1);
}

#[test]
fn test_merge_is_idempotent() {
    let temp_dir = create_fixture();
    let config = MergeConfig::default();

    let first = to_json_string(&run(&config, temp_dir.path()).unwrap().graph).unwrap();
    let second = to_json_string(&run(&config, temp_dir.path()).unwrap().graph).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_output_shape() {
    let temp_dir = create_fixture();
    let outcome = run(&MergeConfig::default(), temp_dir.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&to_json_string(&outcome.graph).unwrap()).unwrap();

    let node = &json["nodes"][0];
    for field in ["id", "base_id", "course", "module_num", "course_module_num", "module_title", "sx", "sy", "x", "y", "rx", "ry"] {
        assert!(node.get(field).is_some(), "missing {}", field);
    }
    assert_eq!(node["summary"], "first");
    assert_eq!(node["x"], node["sx"]);
    assert!(json["links"][0]["tags"].is_array());
}

#[test]
fn test_missing_annotation_dir_is_not_fatal() {
    let temp_dir = create_fixture();
    fs::remove_dir_all(temp_dir.path().join("annotations")).unwrap();

    let outcome = run(&MergeConfig::default(), temp_dir.path()).unwrap();
    assert_eq!(outcome.report.link_count, 2);
    assert_eq!(outcome.report.cross_course_count, 0);
}

#[test]
fn test_malformed_course_is_fatal() {
    let temp_dir = create_fixture();
    fs::write(temp_dir.path().join("map_6A.html"), course_document("{not json")).unwrap();

    let err = run(&MergeConfig::default(), temp_dir.path()).unwrap_err();
    assert!(matches!(err, PipelineError::Source(SourceError::MalformedPayload { .. })));
}

/// Test that the CLI writes the artifact and prints the summary
#[test]
fn test_cli_build() {
    let temp_dir = create_fixture();

    let output = Command::new(env!("CARGO_BIN_EXE_coursemap"))
        .args(["--root", temp_dir.path().to_str().unwrap(), "build"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote graph_6AC.json with 4 nodes, 3 links (1 cross-course)."));

    let written = fs::read_to_string(temp_dir.path().join("graph_6AC.json")).unwrap();
    assert!(written.ends_with('\n'));
    let expected = to_json_string(&run(&MergeConfig::default(), temp_dir.path()).unwrap().graph).unwrap();
    assert_eq!(written, expected);
}

/// Test that a config file under the root is picked up
#[test]
fn test_cli_uses_root_config() {
    let temp_dir = create_fixture();
    fs::write(
        temp_dir.path().join("coursemap.toml"),
        "output = \"out/merged.json\"\n\n[annotations]\ndir = \"nowhere\"\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_coursemap"))
        .args(["--root", temp_dir.path().to_str().unwrap(), "build"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 nodes, 2 links (0 cross-course)"));
    assert!(temp_dir.path().join("out/merged.json").exists());
}
