//! Layout save/restore integration tests

mod common;

use common::{accept_all, three_pane_engine};
use serde_json::{json, Value};
use tempfile::TempDir;
use workbench::content::ContentRegistry;
use workbench::layout::{LayoutNode, SplitDirection, WindowId};
use workbench::persistence::{
    self, LayoutStore, PersistedEntry, PersistedLayout, PersistedWindow, PersistenceError,
    LAYOUT_SCHEMA_VERSION,
};

fn restore_root(layout: &PersistedLayout) -> LayoutNode {
    persistence::deserialize(layout, &accept_all)
        .unwrap()
        .root
        .unwrap()
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_is_isomorphic() {
    let (mut engine, _, b, _) = three_pane_engine();
    engine.resize(&b, 1.25).unwrap();

    let json = persistence::serialize(&engine).to_json().unwrap();
    let layout = PersistedLayout::from_json(&json).unwrap();
    let root = restore_root(&layout);

    assert!(root.is_isomorphic(engine.root().unwrap(), 1e-9));
}

#[test]
fn test_round_trip_keeps_window_ids() {
    let (engine, a, b, c) = three_pane_engine();
    let layout = persistence::serialize(&engine);
    let restored = persistence::deserialize(&layout, &accept_all).unwrap();

    let ids: Vec<WindowId> = restored.contents.iter().map(|w| w.window_id.clone()).collect();
    assert_eq!(ids, vec![a, b, c]);
    let types: Vec<&str> = restored.contents.iter().map(|w| w.content.as_str()).collect();
    assert_eq!(types, vec!["explorer", "console", "output"]);
}

#[test]
fn test_serialized_shape() {
    let (engine, _, _, _) = three_pane_engine();
    let json = persistence::serialize(&engine).to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], LAYOUT_SCHEMA_VERSION);
    assert_eq!(value["mode"], "horizontal");
    assert_eq!(value["weights"], json!([1.0, 1.0]));
    assert_eq!(value["windows"][0]["type"], "explorer");
    assert_eq!(value["windows"][1]["mode"], "vertical");
    assert_eq!(value["windows"][1]["windows"][1]["type"], "output");
}

#[test]
fn test_parameters_survive_round_trip() {
    let layout = PersistedLayout::from_json(
        r#"{"version": 2, "type": "console", "parameters": {"pid": 42, "filter": ["gpu"]}}"#,
    )
    .unwrap();
    let root = restore_root(&layout);
    let leaf = root.as_leaf().unwrap();
    assert_eq!(leaf.parameters["pid"], 42);
    assert_eq!(leaf.parameters["filter"], json!(["gpu"]));
}

#[test]
fn test_empty_workspace_round_trip() {
    let engine = workbench::DockingEngine::default();
    let json = persistence::serialize(&engine).to_json().unwrap();
    let layout = PersistedLayout::from_json(&json).unwrap();
    assert!(layout.root.is_none());
    assert!(persistence::deserialize(&layout, &accept_all)
        .unwrap()
        .root
        .is_none());
}

// ============================================================================
// Partial restore
// ============================================================================

#[test]
fn test_unknown_window_type_is_skipped_and_weights_kept() {
    let layout = PersistedLayout::from_json(
        r#"{
            "version": 2,
            "mode": "horizontal",
            "weights": [1.0, 2.0, 1.0],
            "windows": [
                {"type": "explorer"},
                {"type": "gpu-timeline"},
                {"type": "console"}
            ]
        }"#,
    )
    .unwrap();
    let registry = ContentRegistry::with_placeholders(["explorer", "console"]);

    let restored = persistence::deserialize(&layout, &registry).unwrap();
    assert_eq!(restored.skipped.len(), 1);
    assert_eq!(restored.skipped[0].window_type, "gpu-timeline");
    assert_eq!(restored.contents.len(), 2);

    let root = restored.root.unwrap();
    let split = root.as_split().unwrap();
    assert_eq!(split.children.len(), 2);
    assert!((split.weights[0] - 2.0).abs() < 1e-9);
    assert!((split.weights[1] - 2.0).abs() < 1e-9);
}

#[test]
fn test_container_of_unknown_windows_collapses() {
    let layout = PersistedLayout::from_json(
        r#"{
            "version": 2,
            "mode": "horizontal",
            "weights": [1.0, 1.0],
            "windows": [
                {"type": "explorer"},
                {"mode": "vertical", "weights": [1.0, 1.0], "windows": [
                    {"type": "gone"}, {"type": "also-gone"}
                ]}
            ]
        }"#,
    )
    .unwrap();
    let registry = ContentRegistry::with_placeholders(["explorer"]);

    let restored = persistence::deserialize(&layout, &registry).unwrap();
    assert_eq!(restored.skipped.len(), 2);
    let root = restored.root.unwrap();
    assert_eq!(root.as_leaf().unwrap().window_type, "explorer");
}

// ============================================================================
// Versions
// ============================================================================

#[test]
fn test_newer_schema_is_rejected() {
    let result = PersistedLayout::from_json(r#"{"version": 3, "type": "console"}"#);
    assert!(matches!(
        result,
        Err(PersistenceError::UnsupportedVersion {
            found: 3,
            supported: LAYOUT_SCHEMA_VERSION
        })
    ));
}

#[test]
fn test_unversioned_file_migrates_to_equal_weights() {
    let layout = PersistedLayout::from_json(
        r#"{
            "mode": "vertical",
            "windows": [
                {"type": "explorer"},
                {"mode": "horizontal", "windows": [{"type": "a"}, {"type": "b"}, {"type": "c"}]}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(layout.version, 1);

    let root = restore_root(&layout);
    let split = root.as_split().unwrap();
    assert_eq!(split.direction, SplitDirection::Vertical);
    assert_eq!(split.weights, vec![1.0, 1.0]);
    let inner = split.children[1].as_split().unwrap();
    assert_eq!(inner.weights, vec![1.0, 1.0, 1.0]);
}

#[test]
fn test_non_positive_weight_is_malformed() {
    let layout = PersistedLayout::from_json(
        r#"{"version": 2, "mode": "horizontal", "weights": [1.0, 0.0],
            "windows": [{"type": "a"}, {"type": "b"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        persistence::deserialize(&layout, &accept_all),
        Err(PersistenceError::Malformed(_))
    ));
}

#[test]
fn test_invalid_json_is_parse_error() {
    assert!(matches!(
        PersistedLayout::from_json("{\"version\": 2,"),
        Err(PersistenceError::Parse(_))
    ));
}

// ============================================================================
// Layout store
// ============================================================================

#[test]
fn test_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = LayoutStore::new(dir.path().join("nested").join("layout.json"));
    assert_eq!(store.load().unwrap(), None);

    let (engine, _, _, _) = three_pane_engine();
    let layout = persistence::serialize(&engine);
    store.save(&layout).unwrap();

    assert_eq!(store.load().unwrap(), Some(layout));
    assert!(!dir.path().join("nested").join("layout.json.tmp").exists());
}

#[test]
fn test_store_reports_unsupported_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");
    std::fs::write(&path, r#"{"version": 7}"#).unwrap();

    let result = LayoutStore::new(&path).load();
    assert!(matches!(
        result,
        Err(PersistenceError::UnsupportedVersion { found: 7, .. })
    ));
}

#[test]
fn test_single_window_root() {
    let layout = PersistedLayout::new(Some(PersistedEntry::Window(PersistedWindow::new(
        "console",
    ))));
    let root = restore_root(&layout);
    assert_eq!(root.as_leaf().unwrap().window_id.as_str(), "console-1");
}

#[test]
fn test_sample_layout_restores_with_default_types() {
    let layout = PersistedLayout::from_json(include_str!("../samples/layout.json")).unwrap();
    let registry =
        ContentRegistry::with_placeholders(["host-explorer", "output", "properties", "console"]);

    let restored = persistence::deserialize(&layout, &registry).unwrap();
    assert!(restored.skipped.is_empty());
    assert_eq!(restored.contents.len(), 4);
    let explorer = &restored.contents[0];
    assert_eq!(explorer.window_id.as_str(), "host-explorer-1");
    assert_eq!(explorer.state.as_ref().unwrap().expanded.len(), 2);

    let root = restored.root.unwrap();
    assert_eq!(root.leaf_count(), 4);
    assert_eq!(root.as_split().unwrap().weights, vec![3.0, 1.0]);
}
