//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

pub mod layout;
pub mod persistence;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::LayoutSummary;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use layout::update_layout;
pub use persistence::update_persistence;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Persistence(m) => persistence::update_persistence(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures a layout summary before and after and logs the difference.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = LayoutSummary::from_engine(&model.engine);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = LayoutSummary::from_engine(&model.engine);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "layout", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Layout::CloseWindow(WindowId("console-2"))`
/// - `Persistence::SaveLayout`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Persistence(m) => format!("Persistence::{:?}", m),
    }
}
