//! Expansion and selection state of a tree view
//!
//! Nodes are identified by key path: the keys of every node from the top
//! level down to the node itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewState {
    /// Key paths of expanded nodes, in display order
    pub expanded: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Vec<String>>,
}

impl TreeViewState {
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty() && self.selected.is_none()
    }
}
