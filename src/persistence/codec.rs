//! Conversion between the live layout tree and its persisted form

use std::collections::HashSet;

use super::{
    migrate, PersistedEntry, PersistedLayout, PersistedWindow, PersistedWindowContainer,
    PersistenceError,
};
use crate::content::WindowFactory;
use crate::layout::{
    next_window_id, ops, DockingEngine, LayoutNode, SplitContainer, WindowId,
};
use crate::tree::TreeViewState;

/// Persist the engine's tree
pub fn serialize(engine: &DockingEngine) -> PersistedLayout {
    serialize_with_state(engine, |_| None)
}

/// Persist the engine's tree, asking `state_of` for each window's view state
pub fn serialize_with_state(
    engine: &DockingEngine,
    state_of: impl Fn(&WindowId) -> Option<TreeViewState>,
) -> PersistedLayout {
    PersistedLayout::new(engine.root().map(|root| serialize_node(root, &state_of)))
}

fn serialize_node(
    node: &LayoutNode,
    state_of: &impl Fn(&WindowId) -> Option<TreeViewState>,
) -> PersistedEntry {
    match node {
        LayoutNode::Leaf(leaf) => PersistedEntry::Window(PersistedWindow {
            window_type: leaf.window_type.clone(),
            parameters: leaf.parameters.clone(),
            id: Some(leaf.window_id.clone()),
            state: state_of(&leaf.window_id).filter(|state| !state.is_empty()),
        }),
        LayoutNode::Split(split) => PersistedEntry::Container(PersistedWindowContainer {
            mode: split.direction,
            weights: split.weights.clone(),
            windows: split
                .children
                .iter()
                .map(|child| serialize_node(child, state_of))
                .collect(),
        }),
    }
}

/// A window whose content was created during a restore
#[derive(Debug)]
pub struct RestoredWindow<C> {
    pub window_id: WindowId,
    pub content: C,
    pub state: Option<TreeViewState>,
}

/// A window left out of a restore because the factory rejected its type
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedWindow {
    pub window_type: String,
    pub reason: String,
}

/// A fully built tree, ready to attach
#[derive(Debug)]
pub struct RestoredLayout<C> {
    pub root: Option<LayoutNode>,
    pub contents: Vec<RestoredWindow<C>>,
    pub skipped: Vec<SkippedWindow>,
}

/// Rebuild a layout tree, creating each window's content through `factory`.
///
/// Older schema versions are migrated first. Windows whose type the factory
/// rejects are skipped and their siblings keep the container's original
/// total weight. The whole tree is built before anything is returned.
pub fn deserialize<F: WindowFactory>(
    layout: &PersistedLayout,
    factory: &F,
) -> Result<RestoredLayout<F::Content>, PersistenceError> {
    let layout = migrate(layout.clone())?;

    let mut claimed = HashSet::new();
    if let Some(root) = &layout.root {
        collect_ids(root, &mut claimed);
    }

    let mut restore = Restore {
        factory,
        claimed,
        used: HashSet::new(),
        counter: 0,
        contents: Vec::new(),
        skipped: Vec::new(),
    };
    let root = match &layout.root {
        Some(entry) => restore.entry(entry)?,
        None => None,
    };

    if !restore.skipped.is_empty() {
        tracing::warn!(
            skipped = restore.skipped.len(),
            restored = restore.contents.len(),
            "restored layout with missing windows"
        );
    }

    Ok(RestoredLayout {
        root,
        contents: restore.contents,
        skipped: restore.skipped,
    })
}

fn collect_ids(entry: &PersistedEntry, ids: &mut HashSet<WindowId>) {
    match entry {
        PersistedEntry::Window(window) => {
            if let Some(id) = &window.id {
                ids.insert(id.clone());
            }
        }
        PersistedEntry::Container(container) => {
            for child in &container.windows {
                collect_ids(child, ids);
            }
        }
    }
}

struct Restore<'a, F: WindowFactory> {
    factory: &'a F,
    /// Every id present in the file, so generated ids avoid them
    claimed: HashSet<WindowId>,
    used: HashSet<WindowId>,
    counter: u64,
    contents: Vec<RestoredWindow<F::Content>>,
    skipped: Vec<SkippedWindow>,
}

impl<F: WindowFactory> Restore<'_, F> {
    fn entry(&mut self, entry: &PersistedEntry) -> Result<Option<LayoutNode>, PersistenceError> {
        match entry {
            PersistedEntry::Window(window) => Ok(self.window(window)),
            PersistedEntry::Container(container) => self.container(container),
        }
    }

    fn window(&mut self, window: &PersistedWindow) -> Option<LayoutNode> {
        let content = match self.factory.create(&window.window_type, &window.parameters) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(window_type = %window.window_type, "skipping window: {}", err);
                self.skipped.push(SkippedWindow {
                    window_type: window.window_type.clone(),
                    reason: err.to_string(),
                });
                return None;
            }
        };

        let window_id = match &window.id {
            Some(id) if !self.used.contains(id) => id.clone(),
            _ => {
                let (claimed, used) = (&self.claimed, &self.used);
                next_window_id(&window.window_type, &mut self.counter, |id| {
                    claimed.contains(id) || used.contains(id)
                })
            }
        };
        self.used.insert(window_id.clone());

        self.contents.push(RestoredWindow {
            window_id: window_id.clone(),
            content,
            state: window.state.clone(),
        });
        Some(LayoutNode::leaf(
            window_id,
            window.window_type.clone(),
            window.parameters.clone(),
        ))
    }

    fn container(
        &mut self,
        container: &PersistedWindowContainer,
    ) -> Result<Option<LayoutNode>, PersistenceError> {
        if container.weights.len() != container.windows.len() {
            return Err(PersistenceError::Malformed(format!(
                "{} weights for {} windows",
                container.weights.len(),
                container.windows.len()
            )));
        }
        if let Some(bad) = container
            .weights
            .iter()
            .find(|w| !w.is_finite() || **w <= 0.0)
        {
            return Err(PersistenceError::Malformed(format!("invalid weight {}", bad)));
        }

        let total: f64 = container.weights.iter().sum();
        let mut children = Vec::with_capacity(container.windows.len());
        let mut weights = Vec::with_capacity(container.windows.len());
        for (entry, &weight) in container.windows.iter().zip(&container.weights) {
            if let Some(child) = self.entry(entry)? {
                children.push(child);
                weights.push(weight);
            }
        }
        ops::rescale(&mut weights, total);

        Ok(ops::collapse(SplitContainer::new(container.mode, children, weights)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::UnknownWindowType;
    use crate::layout::{Parameters, SplitDirection};

    fn accept_all(window_type: &str, _: &Parameters) -> Result<String, UnknownWindowType> {
        Ok(window_type.to_string())
    }

    fn window(window_type: &str, id: Option<&str>) -> PersistedEntry {
        PersistedEntry::Window(PersistedWindow {
            id: id.map(WindowId::from),
            ..PersistedWindow::new(window_type)
        })
    }

    #[test]
    fn test_duplicate_persisted_ids_are_regenerated() {
        let layout = PersistedLayout::new(Some(PersistedEntry::Container(
            PersistedWindowContainer {
                mode: SplitDirection::Horizontal,
                weights: vec![1.0, 1.0, 1.0],
                windows: vec![
                    window("console", Some("console-1")),
                    window("console", Some("console-1")),
                    window("console", None),
                ],
            },
        )));

        let restored = deserialize(&layout, &accept_all).unwrap();
        let ids: Vec<&str> = restored
            .contents
            .iter()
            .map(|c| c.window_id.as_str())
            .collect();
        assert_eq!(ids, vec!["console-1", "console-2", "console-3"]);
    }

    #[test]
    fn test_weight_mismatch_is_malformed() {
        let layout = PersistedLayout::new(Some(PersistedEntry::Container(
            PersistedWindowContainer {
                mode: SplitDirection::Vertical,
                weights: vec![1.0],
                windows: vec![window("a", None), window("b", None)],
            },
        )));
        assert!(matches!(
            deserialize(&layout, &accept_all),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_layout_restores_to_nothing() {
        let restored = deserialize(&PersistedLayout::default(), &accept_all).unwrap();
        assert!(restored.root.is_none());
        assert!(restored.contents.is_empty());
    }
}
