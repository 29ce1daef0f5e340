//! Configuration system tests
//!
//! Tests for config paths and workbench config loading/saving.

use tempfile::TempDir;
use workbench::config::{WorkbenchConfig, WorkspaceEntry};
use workbench::config_paths;
use workbench::layout::{Rect, SplitDirection};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_workbench() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("workbench"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_layout_file_sits_next_to_config() {
    if let (Some(layout), Some(config)) = (config_paths::layout_file(), config_paths::config_file())
    {
        assert!(layout.to_string_lossy().ends_with("layout.json"));
        assert_eq!(layout.parent(), config.parent());
    }
}

#[test]
fn test_logs_dir_is_under_config_dir() {
    if let (Some(logs), Some(dir)) = (config_paths::logs_dir(), config_paths::config_dir()) {
        assert!(logs.starts_with(&dir));
    }
}

// ========================================================================
// Workbench Config Tests
// ========================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = WorkbenchConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, WorkbenchConfig::default());
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "viewport: [this is not, a viewport").unwrap();
    assert_eq!(WorkbenchConfig::load_from(&path), WorkbenchConfig::default());
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = WorkbenchConfig {
        min_pane_extent: 120,
        restore_layout: false,
        default_workspace: vec![
            WorkspaceEntry::new("console", SplitDirection::Vertical),
            WorkspaceEntry::new("output", SplitDirection::Vertical),
        ],
        ..WorkbenchConfig::default()
    };

    config.save_to(&path).unwrap();
    assert_eq!(WorkbenchConfig::load_from(&path), config);
}

#[test]
fn test_engine_options_follow_config() {
    let config: WorkbenchConfig = serde_yaml::from_str(
        "viewport:\n  width: 1920\n  height: 1080\nsplitter_width: 4\nmin_pane_extent: 0\n",
    )
    .unwrap();
    let options = config.engine_options();
    assert_eq!(options.viewport, Rect::new(0, 0, 1920, 1080));
    assert_eq!(options.splitter_width, 4);
    assert_eq!(options.min_extent, 0);
}
