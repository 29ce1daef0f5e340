//! Message types for the Elm-style architecture
//!
//! All state changes flow through these messages.

use crate::layout::{InsertPosition, Parameters, SplitDirection, WindowId};
use crate::persistence::{PersistedLayout, PersistenceError};

/// Docking layout messages
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    /// Open a window of `window_type` next to `target` (or at the root)
    AddWindow {
        target: Option<WindowId>,
        window_type: String,
        parameters: Parameters,
        direction: SplitDirection,
        position: InsertPosition,
    },
    CloseWindow(WindowId),
    /// Set a window's weight within its split
    Resize { window_id: WindowId, weight: f64 },
    MoveWindow {
        window_id: WindowId,
        target: WindowId,
        direction: SplitDirection,
        position: InsertPosition,
    },
    /// Drag splitter bar `index` by `delta` pixels
    DragSplitter { index: usize, delta: i32 },
    /// The workspace area changed size
    SetViewport { width: u32, height: u32 },
    /// Close every window
    Reset,
    LoadDefaultWorkspace,
}

/// Saving and restoring the layout
#[derive(Debug)]
pub enum PersistenceMsg {
    SaveLayout,
    LoadLayout,
    /// Result of reading the layout file; `None` when there is none yet
    LayoutLoaded(Result<Option<PersistedLayout>, PersistenceError>),
    LayoutSaved(Result<(), PersistenceError>),
}

/// Top-level message type
#[derive(Debug)]
pub enum Msg {
    Layout(LayoutMsg),
    Persistence(PersistenceMsg),
}

impl From<LayoutMsg> for Msg {
    fn from(msg: LayoutMsg) -> Self {
        Msg::Layout(msg)
    }
}

impl From<PersistenceMsg> for Msg {
    fn from(msg: PersistenceMsg) -> Self {
        Msg::Persistence(msg)
    }
}
