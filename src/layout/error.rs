//! Errors raised by layout mutations
//!
//! Every variant is reported before anything is committed, so a failed
//! operation leaves the tree and its version untouched.

use thiserror::Error;

use super::node::WindowId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),

    #[error("invalid thickness {0}: weights must be positive, finite and below the split total")]
    InvalidThickness(f64),

    #[error("window {0} is not inside a split and cannot be resized")]
    NotResizable(WindowId),

    #[error("cannot move window {0} relative to itself")]
    MoveOntoSelf(WindowId),

    #[error("duplicate window id in layout: {0}")]
    DuplicateWindowId(WindowId),

    #[error("no splitter bar at index {0}")]
    SplitterNotFound(usize),
}
