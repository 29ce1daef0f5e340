//! Application model - the complete state of the workbench
//!
//! Pairs the docking engine with the live content of each window. Content is
//! always created before the layout changes, so a window type the registry
//! cannot build never reaches the tree.

use std::collections::HashMap;

use crate::config::WorkbenchConfig;
use crate::content::{ContentRegistry, WindowContent, WindowFactory};
use crate::error::WorkbenchError;
use crate::layout::{DockingEngine, InsertPosition, Leaf, Parameters, SplitDirection, WindowId};
use crate::persistence::{self, PersistedLayout, SkippedWindow};

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub engine: DockingEngine,
    /// Live content keyed by the window showing it
    pub contents: HashMap<WindowId, Box<dyn WindowContent>>,
    pub registry: ContentRegistry,
    pub config: WorkbenchConfig,
    /// Last user-facing status message
    pub status: Option<String>,
}

impl AppModel {
    /// Model with placeholder content for every configured window type
    pub fn new(config: WorkbenchConfig) -> Self {
        let registry =
            ContentRegistry::with_placeholders(config.window_types.iter().map(String::as_str));
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: WorkbenchConfig, registry: ContentRegistry) -> Self {
        Self {
            engine: DockingEngine::new(config.engine_options()),
            contents: HashMap::new(),
            registry,
            config,
            status: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn content(&self, window_id: &WindowId) -> Option<&dyn WindowContent> {
        self.contents.get(window_id).map(|content| &**content)
    }

    /// Create content for `window_type` and dock it next to `target`
    pub fn open_window(
        &mut self,
        target: Option<&WindowId>,
        window_type: &str,
        parameters: Parameters,
        direction: SplitDirection,
        position: InsertPosition,
    ) -> Result<WindowId, WorkbenchError> {
        let content = self.registry.create(window_type, &parameters)?;
        let window_id = self
            .engine
            .add_window(target, window_type, parameters, direction, position)?;
        self.contents.insert(window_id.clone(), content);
        Ok(window_id)
    }

    /// Close a window and drop its content
    pub fn close_window(&mut self, window_id: &WindowId) -> Result<Leaf, WorkbenchError> {
        let leaf = self.engine.close_window(window_id)?;
        self.contents.remove(window_id);
        Ok(leaf)
    }

    /// Persisted form of the current layout, including tree view state
    pub fn persisted_layout(&self) -> PersistedLayout {
        persistence::serialize_with_state(&self.engine, |window_id| {
            self.contents
                .get(window_id)
                .and_then(|content| content.view_state())
        })
    }

    /// Replace the layout and every window's content with a restored layout.
    ///
    /// Nothing changes unless the whole layout could be rebuilt. Windows whose
    /// type is not registered are returned.
    pub fn restore(&mut self, layout: &PersistedLayout) -> Result<Vec<SkippedWindow>, WorkbenchError> {
        let restored = persistence::deserialize(layout, &self.registry)?;
        self.engine.attach(restored.root)?;

        self.contents = restored
            .contents
            .into_iter()
            .map(|mut window| {
                if let Some(state) = &window.state {
                    window.content.restore_view_state(state);
                }
                (window.window_id, window.content)
            })
            .collect();

        Ok(restored.skipped)
    }

    /// Windows of `layout` that this model's registry cannot build.
    ///
    /// Saving after a restore that skipped any of them would drop them from
    /// the file for good.
    pub fn unrestorable_windows(
        &self,
        layout: &PersistedLayout,
    ) -> Result<Vec<SkippedWindow>, WorkbenchError> {
        Ok(persistence::deserialize(layout, &self.registry)?.skipped)
    }

    /// Replace the layout with the configured first-run workspace
    pub fn load_default_workspace(&mut self) -> Result<(), WorkbenchError> {
        self.engine.reset();
        self.contents.clear();
        for entry in self.config.default_workspace.clone() {
            self.open_window(
                None,
                &entry.window_type,
                Parameters::new(),
                entry.direction,
                entry.position,
            )?;
        }
        Ok(())
    }
}
