//! Commands returned by update functions
//!
//! Commands describe side effects for the runtime to perform. Their results
//! come back as messages.

use crate::persistence::PersistedLayout;

/// Side effects requested by `update`
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// The layout changed and subscribers should redraw
    Redraw,
    /// Write the layout file, then send `PersistenceMsg::LayoutSaved`
    SaveLayout(PersistedLayout),
    /// Read the layout file, then send `PersistenceMsg::LayoutLoaded`
    LoadLayout,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // File I/O reports back through messages
            Cmd::SaveLayout(_) | Cmd::LoadLayout => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}
