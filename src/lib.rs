//! Workbench - docked multi-pane workspace with typed tree views
//!
//! This crate provides the docking layout engine, its persisted form, a
//! generic typed tree for window content, and the Elm-style message bus that
//! ties them together.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod content;
pub mod error;
pub mod layout;
pub mod messages;
pub mod model;
pub mod notify;
pub mod persistence;
pub mod runtime;
pub mod tracing;
pub mod tree;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::WorkbenchConfig;
pub use error::WorkbenchError;
pub use layout::{DockingEngine, LayoutError, LayoutNode, WindowId};
pub use messages::Msg;
pub use model::AppModel;
