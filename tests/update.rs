//! Message bus integration tests: update functions driven through the runtime

mod common;

use common::{test_config, test_model};
use tempfile::TempDir;
use workbench::config::WorkbenchConfig;
use workbench::layout::{InsertPosition, Parameters, SplitDirection, WindowId};
use workbench::messages::{LayoutMsg, Msg, PersistenceMsg};
use workbench::model::AppModel;
use workbench::persistence::{LayoutStore, PersistedLayout};
use workbench::runtime::Runtime;
use workbench::update::persistence::FALLBACK_STATUS;
use workbench::update::update;

fn add_msg(target: Option<&WindowId>, window_type: &str, direction: SplitDirection) -> Msg {
    LayoutMsg::AddWindow {
        target: target.cloned(),
        window_type: window_type.to_string(),
        parameters: Parameters::new(),
        direction,
        position: InsertPosition::After,
    }
    .into()
}

fn runtime_in(dir: &TempDir, model: AppModel) -> Runtime {
    Runtime::new(model, LayoutStore::new(dir.path().join("layout.json")))
}

// ============================================================================
// Layout messages
// ============================================================================

#[test]
fn test_add_window_creates_content_and_redraws() {
    let mut model = test_model();
    let cmd = update(&mut model, add_msg(None, "console", SplitDirection::Horizontal));

    assert!(cmd.is_some_and(|c| c.needs_redraw()));
    let id = WindowId::from("console-1");
    assert!(model.engine.contains(&id));
    assert_eq!(model.content(&id).unwrap().title(), "Console");
    assert_eq!(model.status.as_deref(), Some("Opened console-1"));
}

#[test]
fn test_unknown_window_type_leaves_layout_untouched() {
    let mut model = test_model();
    update(&mut model, add_msg(None, "console", SplitDirection::Horizontal));
    let version = model.engine.version();

    let cmd = update(&mut model, add_msg(None, "gpu-timeline", SplitDirection::Horizontal));
    assert!(cmd.is_none());
    assert_eq!(model.engine.version(), version);
    assert_eq!(model.engine.window_count(), 1);
    assert_eq!(model.contents.len(), 1);
    assert_eq!(
        model.status.as_deref(),
        Some("unknown window type: gpu-timeline")
    );
}

#[test]
fn test_rejected_operation_sets_status_only() {
    let mut model = test_model();
    update(&mut model, add_msg(None, "console", SplitDirection::Horizontal));
    let before = model.engine.root().cloned();

    let cmd = update(
        &mut model,
        LayoutMsg::CloseWindow(WindowId::from("output-7")).into(),
    );
    assert!(cmd.is_none());
    assert_eq!(model.engine.root().cloned(), before);
    assert_eq!(model.status.as_deref(), Some("window not found: output-7"));
}

#[test]
fn test_close_drops_content() {
    let mut model = test_model();
    update(&mut model, add_msg(None, "console", SplitDirection::Horizontal));
    let id = WindowId::from("console-1");

    update(&mut model, LayoutMsg::CloseWindow(id.clone()).into());
    assert!(model.engine.is_empty());
    assert!(model.content(&id).is_none());
}

#[test]
fn test_reset_clears_contents() {
    let mut model = test_model();
    update(&mut model, add_msg(None, "console", SplitDirection::Horizontal));
    update(&mut model, add_msg(None, "output", SplitDirection::Vertical));

    update(&mut model, LayoutMsg::Reset.into());
    assert!(model.engine.is_empty());
    assert!(model.contents.is_empty());
}

#[test]
fn test_set_viewport_message() {
    let mut model = test_model();
    update(&mut model, add_msg(None, "console", SplitDirection::Horizontal));
    update(
        &mut model,
        LayoutMsg::SetViewport {
            width: 640,
            height: 480,
        }
        .into(),
    );
    let rect = model.engine.window_rect(&WindowId::from("console-1")).unwrap();
    assert_eq!((rect.width, rect.height), (640, 480));
}

// ============================================================================
// Startup and persistence
// ============================================================================

#[test]
fn test_first_run_opens_default_workspace() {
    let dir = TempDir::new().unwrap();
    let mut runtime = runtime_in(&dir, AppModel::new(WorkbenchConfig::default()));
    runtime.startup();

    let model = &runtime.model;
    assert_eq!(model.engine.window_count(), 3);
    assert_eq!(model.contents.len(), 3);
    let root = model.engine.root().unwrap().as_split().unwrap();
    assert_eq!(root.direction, SplitDirection::Vertical);
    assert_eq!(runtime.redraw_count(), 1);
}

#[test]
fn test_startup_without_restore_ignores_saved_layout() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("layout.json"), r#"{"version": 2, "type": "console"}"#)
        .unwrap();
    let config = WorkbenchConfig {
        restore_layout: false,
        ..WorkbenchConfig::default()
    };
    let mut runtime = runtime_in(&dir, AppModel::new(config));
    runtime.startup();

    assert_eq!(runtime.model.engine.window_count(), 3);
}

#[test]
fn test_save_and_restore_through_runtime() {
    let dir = TempDir::new().unwrap();
    let mut runtime = runtime_in(&dir, test_model());
    runtime.dispatch(add_msg(None, "explorer", SplitDirection::Horizontal));
    runtime.dispatch(add_msg(
        Some(&WindowId::from("explorer-1")),
        "console",
        SplitDirection::Vertical,
    ));
    runtime.dispatch(
        LayoutMsg::Resize {
            window_id: WindowId::from("console-2"),
            weight: 0.5,
        }
        .into(),
    );
    runtime.dispatch(PersistenceMsg::SaveLayout.into());
    assert_eq!(runtime.model.status.as_deref(), Some("Layout saved"));
    assert!(runtime.store().path().exists());

    let mut restored = runtime_in(&dir, test_model());
    restored.startup();

    let original = runtime.model.engine.root().unwrap();
    let reloaded = restored.model.engine.root().unwrap();
    assert!(reloaded.is_isomorphic(original, 1e-9));
    assert_eq!(
        restored.model.engine.window_ids(),
        runtime.model.engine.window_ids()
    );
    assert_eq!(restored.model.status.as_deref(), Some("Restored 2 windows"));
    assert_eq!(restored.model.contents.len(), 2);
}

#[test]
fn test_newer_layout_falls_back_to_default_workspace() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("layout.json"),
        r#"{"version": 42, "panes": []}"#,
    )
    .unwrap();

    let mut runtime = runtime_in(&dir, AppModel::new(WorkbenchConfig::default()));
    runtime.startup();

    assert_eq!(runtime.model.status.as_deref(), Some(FALLBACK_STATUS));
    assert_eq!(runtime.model.engine.window_count(), 3);
}

#[test]
fn test_malformed_layout_falls_back() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("layout.json"), "not json").unwrap();

    let mut runtime = runtime_in(&dir, AppModel::new(WorkbenchConfig::default()));
    runtime.startup();
    assert_eq!(runtime.model.status.as_deref(), Some(FALLBACK_STATUS));
}

#[test]
fn test_restore_reports_skipped_types() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("layout.json"),
        r#"{
            "version": 2,
            "mode": "horizontal",
            "weights": [1.0, 1.0],
            "windows": [{"type": "console"}, {"type": "gpu-timeline"}]
        }"#,
    )
    .unwrap();

    let mut runtime = runtime_in(&dir, test_model());
    runtime.startup();

    assert_eq!(runtime.model.engine.window_count(), 1);
    assert_eq!(
        runtime.model.status.as_deref(),
        Some("Restored 1 windows; skipped unknown window types: gpu-timeline")
    );
}

#[test]
fn test_failed_save_is_reported() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be makes the final rename fail
    std::fs::create_dir(dir.path().join("layout.json")).unwrap();
    std::fs::write(dir.path().join("layout.json").join("keep"), "x").unwrap();

    let mut runtime = runtime_in(&dir, AppModel::with_registry(test_config(), Default::default()));
    runtime.dispatch(PersistenceMsg::SaveLayout.into());

    let status = runtime.model.status.clone().unwrap();
    assert!(status.starts_with("Failed to save layout"), "{}", status);
}

#[test]
fn test_unrestorable_windows_leave_model_untouched() {
    let layout = PersistedLayout::from_json(
        r#"{
            "version": 2,
            "mode": "vertical",
            "weights": [1.0, 1.0],
            "windows": [{"type": "explorer"}, {"type": "gpu-timeline"}]
        }"#,
    )
    .unwrap();
    let model = test_model();

    let skipped = model.unrestorable_windows(&layout).unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].window_type, "gpu-timeline");
    assert!(model.engine.is_empty());
    assert!(model.contents.is_empty());

    let known = PersistedLayout::from_json(r#"{"version": 2, "type": "console"}"#).unwrap();
    assert!(model.unrestorable_windows(&known).unwrap().is_empty());
}
