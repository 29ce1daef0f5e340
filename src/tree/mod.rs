//! Generic typed tree for tree-view window content
//!
//! Consumers describe their items as a Rust type implementing [`TreeItem`],
//! usually an enum with one variant per kind. Each kind gets a
//! [`TypeDefinition`] that derives labels, tooltips, class names and
//! persistence keys. The tree itself never looks inside an item.

mod model;
mod registry;
mod view_state;

use std::fmt;
use std::hash::Hash;

use thiserror::Error;

use crate::notify::Versioned;

pub use model::{RenderedItem, TreeItemNode, TreeModel};
pub use registry::{NodeContext, Provider, TypeDefinition, TypeRegistry};
pub use view_state::TreeViewState;

/// Payload stored in a [`TreeModel`]
pub trait TreeItem {
    /// Type tag selecting the item's [`TypeDefinition`]
    type Kind: Clone + Eq + Hash + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle to a node in a [`TreeModel`].
///
/// Handles are checked against a per-slot generation, so a handle to a removed
/// node never resolves to whatever reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("item kind {0} is not registered")]
    UnknownType(String),

    #[error("invalid tree path: {0}")]
    InvalidPath(String),
}

/// What a [`TreeEvent`] invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeChange {
    /// Nodes were added, removed or replaced
    Structural,
    /// Only expansion, selection or type definitions changed
    Presentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEvent {
    pub version: u64,
    pub change: TreeChange,
}

impl Versioned for TreeEvent {
    fn version(&self) -> u64 {
        self.version
    }
}
