//! Docking layout - split tree, size allocation and the engine that owns them
//!
//! ## Architecture
//!
//! - `LayoutNode`: a window (`Leaf`) or a `SplitContainer` of weighted children
//! - `allocate()`: turns a container's thickness and weights into integer extents
//! - `ops`: pure tree edits (insert, remove, collapse, reweight)
//! - `DockingEngine`: owns the root, commits edits, re-allocates, notifies
//!
//! Nothing in here knows what a window displays. Content is created elsewhere
//! from the leaf's `window_type` and `parameters`.

mod allocator;
mod engine;
mod error;
mod node;
pub mod ops;

pub use allocator::{allocate, min_extent, split_rect};
pub use engine::{
    DockingEngine, EngineOptions, LayoutSnapshot, SplitterBar, DEFAULT_MIN_EXTENT, SPLITTER_WIDTH,
};
pub use error::LayoutError;
pub use node::{
    next_window_id, InsertPosition, LayoutNode, Leaf, Parameters, Rect, SplitContainer,
    SplitDirection, WindowId,
};
