//! Persisted layout - versioned on-disk form of the docking tree
//!
//! ## Format
//!
//! ```json
//! {
//!   "version": 2,
//!   "mode": "horizontal",
//!   "weights": [1.0, 2.0],
//!   "windows": [
//!     { "type": "explorer", "parameters": { "root": "/" } },
//!     { "mode": "vertical", "weights": [1.0, 1.0], "windows": [ ... ] }
//!   ]
//! }
//! ```
//!
//! The root may also be a single window, and `{"version": 2}` on its own is an
//! empty workspace.

mod codec;
mod migrate;
mod store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::layout::{LayoutError, Parameters, SplitDirection, WindowId};
use crate::tree::TreeViewState;

pub use codec::{deserialize, serialize, serialize_with_state, RestoredLayout, RestoredWindow, SkippedWindow};
pub use migrate::migrate;
pub use store::LayoutStore;

/// Newest schema this build reads and the one it writes
pub const LAYOUT_SCHEMA_VERSION: u32 = 2;

/// Files without a `version` field predate versioning
const UNVERSIONED: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("layout schema version {found} is not supported (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("malformed layout: {0}")]
    Malformed(String),

    #[error("layout is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// A persisted window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedWindow {
    #[serde(rename = "type")]
    pub window_type: String,
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
    /// Kept so ids stay stable across sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WindowId>,
    /// Tree view expansion and selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TreeViewState>,
}

impl PersistedWindow {
    pub fn new(window_type: impl Into<String>) -> Self {
        Self {
            window_type: window_type.into(),
            parameters: Parameters::new(),
            id: None,
            state: None,
        }
    }
}

/// A persisted split container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedWindowContainer {
    pub mode: SplitDirection,
    /// One weight per entry in `windows`. Absent before schema version 2.
    #[serde(default)]
    pub weights: Vec<f64>,
    pub windows: Vec<PersistedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedEntry {
    Container(PersistedWindowContainer),
    Window(PersistedWindow),
}

impl PersistedEntry {
    /// Number of windows in this subtree
    pub fn window_count(&self) -> usize {
        match self {
            PersistedEntry::Window(_) => 1,
            PersistedEntry::Container(container) => {
                container.windows.iter().map(|w| w.window_count()).sum()
            }
        }
    }
}

/// A complete persisted layout: schema version plus the root entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistedLayout {
    pub version: u32,
    #[serde(flatten)]
    pub root: Option<PersistedEntry>,
}

impl Default for PersistedLayout {
    fn default() -> Self {
        Self {
            version: LAYOUT_SCHEMA_VERSION,
            root: None,
        }
    }
}

impl PersistedLayout {
    pub fn new(root: Option<PersistedEntry>) -> Self {
        Self {
            version: LAYOUT_SCHEMA_VERSION,
            root,
        }
    }

    pub fn window_count(&self) -> usize {
        self.root.as_ref().map(|r| r.window_count()).unwrap_or(0)
    }

    /// Pretty JSON with `version` merged into the root object
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a layout file.
    ///
    /// The version is checked before the body is parsed, so a file from a
    /// newer build reports `UnsupportedVersion` even if its shape changed.
    /// Older versions are returned as found; [`migrate`] upgrades them.
    pub fn from_json(text: &str) -> Result<Self, PersistenceError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, PersistenceError> {
        let Value::Object(mut object) = value else {
            return Err(PersistenceError::Malformed(
                "layout root must be a JSON object".to_string(),
            ));
        };

        let version = match object.remove("version") {
            None => UNVERSIONED,
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| PersistenceError::Malformed(format!("invalid version {}", n)))?,
            Some(other) => {
                return Err(PersistenceError::Malformed(format!(
                    "invalid version {}",
                    other
                )))
            }
        };
        check_version(version)?;

        let root = if object.is_empty() {
            None
        } else {
            Some(serde_json::from_value(Value::Object(object))?)
        };
        Ok(Self { version, root })
    }
}

fn check_version(version: u32) -> Result<(), PersistenceError> {
    if version == 0 || version > LAYOUT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            supported: LAYOUT_SCHEMA_VERSION,
        });
    }
    Ok(())
}
