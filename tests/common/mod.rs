//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use workbench::config::WorkbenchConfig;
use workbench::content::{ContentRegistry, UnknownWindowType};
use workbench::layout::{
    DockingEngine, EngineOptions, InsertPosition, LayoutNode, Parameters, Rect, SplitDirection,
    WindowId,
};
use workbench::model::AppModel;

/// Engine with a 1000x600 viewport and no minimum pane size
pub fn test_engine() -> DockingEngine {
    DockingEngine::new(EngineOptions {
        viewport: Rect::new(0, 0, 1000, 600),
        min_extent: 0,
        splitter_width: 6,
    })
}

/// Add a window with no parameters
pub fn add(
    engine: &mut DockingEngine,
    target: Option<&WindowId>,
    window_type: &str,
    direction: SplitDirection,
) -> WindowId {
    engine
        .add_window(
            target,
            window_type,
            Parameters::new(),
            direction,
            InsertPosition::After,
        )
        .unwrap()
}

/// Layout `a | (b / c)` with weights [1, 1] at both levels
pub fn three_pane_engine() -> (DockingEngine, WindowId, WindowId, WindowId) {
    let mut engine = test_engine();
    let a = add(&mut engine, None, "explorer", SplitDirection::Horizontal);
    let b = add(&mut engine, Some(&a), "console", SplitDirection::Horizontal);
    let c = add(&mut engine, Some(&b), "output", SplitDirection::Vertical);
    (engine, a, b, c)
}

/// Factory accepting every window type; content is the type name
pub fn accept_all(window_type: &str, _: &Parameters) -> Result<String, UnknownWindowType> {
    Ok(window_type.to_string())
}

/// Config with a small viewport, no minimums and an empty default workspace
pub fn test_config() -> WorkbenchConfig {
    WorkbenchConfig {
        min_pane_extent: 0,
        default_workspace: Vec::new(),
        ..WorkbenchConfig::default()
    }
}

/// App model whose registry knows `explorer`, `console` and `output`
pub fn test_model() -> AppModel {
    AppModel::with_registry(
        test_config(),
        ContentRegistry::with_placeholders(["explorer", "console", "output"]),
    )
}

/// Sum of a split's weights
pub fn weight_sum(node: &LayoutNode) -> f64 {
    node.as_split().map(|s| s.weights.iter().sum()).unwrap_or(0.0)
}

/// Panic unless every split in the tree has at least two children
pub fn assert_no_singletons(node: &LayoutNode) {
    assert!(node.is_normalized(), "singleton split in:\n{}", node);
}
