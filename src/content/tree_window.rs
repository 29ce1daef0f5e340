//! Window content hosting a typed tree

use std::fmt;

use super::WindowContent;
use crate::tree::{TreeItem, TreeModel, TreeViewState};

/// A docked tree view. Dropping the window drops its tree.
pub struct TreeWindow<T: TreeItem> {
    title: String,
    model: TreeModel<T>,
}

impl<T: TreeItem> TreeWindow<T> {
    pub fn new(title: impl Into<String>, model: TreeModel<T>) -> Self {
        Self {
            title: title.into(),
            model,
        }
    }

    pub fn model(&self) -> &TreeModel<T> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut TreeModel<T> {
        &mut self.model
    }
}

impl<T: TreeItem> fmt::Debug for TreeWindow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeWindow")
            .field("title", &self.title)
            .field("model", &self.model)
            .finish()
    }
}

impl<T: TreeItem> WindowContent for TreeWindow<T> {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn view_state(&self) -> Option<TreeViewState> {
        Some(self.model.save_view_state())
    }

    fn restore_view_state(&mut self, state: &TreeViewState) {
        let applied = self.model.restore_view_state(state);
        tracing::debug!(title = %self.title, applied, "restored tree view state");
    }
}
