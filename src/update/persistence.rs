//! Layout save/restore message handlers

use crate::commands::Cmd;
use crate::error::WorkbenchError;
use crate::messages::PersistenceMsg;
use crate::model::AppModel;
use crate::persistence::{PersistedLayout, PersistenceError};

/// Status shown when a saved layout exists but cannot be used
pub const FALLBACK_STATUS: &str = "cannot open saved layout; starting with default workspace";

pub fn update_persistence(model: &mut AppModel, msg: PersistenceMsg) -> Option<Cmd> {
    match msg {
        PersistenceMsg::SaveLayout => Some(Cmd::SaveLayout(model.persisted_layout())),

        PersistenceMsg::LoadLayout => Some(Cmd::LoadLayout),

        PersistenceMsg::LayoutLoaded(Ok(Some(layout))) => restore(model, &layout),

        PersistenceMsg::LayoutLoaded(Ok(None)) => {
            tracing::info!("No saved layout, opening default workspace");
            open_default_workspace(model);
            Some(Cmd::Redraw)
        }

        PersistenceMsg::LayoutLoaded(Err(e)) => {
            fall_back(model, &e);
            Some(Cmd::Redraw)
        }

        PersistenceMsg::LayoutSaved(Ok(())) => {
            model.set_status("Layout saved");
            None
        }

        PersistenceMsg::LayoutSaved(Err(e)) => {
            tracing::warn!("Failed to save layout: {}", e);
            model.set_status(format!("Failed to save layout: {}", e));
            None
        }
    }
}

fn restore(model: &mut AppModel, layout: &PersistedLayout) -> Option<Cmd> {
    match model.restore(layout) {
        Ok(skipped) if skipped.is_empty() => {
            model.set_status(format!("Restored {} windows", model.engine.window_count()));
        }
        Ok(skipped) => {
            let types: Vec<&str> = skipped.iter().map(|s| s.window_type.as_str()).collect();
            model.set_status(format!(
                "Restored {} windows; skipped unknown window types: {}",
                model.engine.window_count(),
                types.join(", ")
            ));
        }
        Err(WorkbenchError::Persistence(e)) => fall_back(model, &e),
        Err(e) => {
            tracing::warn!("Failed to restore layout: {}", e);
            open_default_workspace(model);
            model.set_status(FALLBACK_STATUS);
        }
    }
    Some(Cmd::Redraw)
}

fn fall_back(model: &mut AppModel, error: &PersistenceError) {
    match error {
        PersistenceError::UnsupportedVersion { found, supported } => tracing::warn!(
            found,
            supported,
            "Saved layout was written by a newer version"
        ),
        other => tracing::warn!("Failed to load layout: {}", other),
    }
    open_default_workspace(model);
    model.set_status(FALLBACK_STATUS);
}

fn open_default_workspace(model: &mut AppModel) {
    if let Err(e) = model.load_default_workspace() {
        tracing::warn!("Failed to open default workspace: {}", e);
        model.set_status(e.to_string());
    }
}
