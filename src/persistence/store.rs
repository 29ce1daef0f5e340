//! Layout file on disk

use std::fs;
use std::path::{Path, PathBuf};

use super::{PersistedLayout, PersistenceError};

/// Reads and writes one layout file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutStore {
    path: PathBuf,
}

impl LayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `layout.json` in the config directory
    pub fn default_location() -> Option<Self> {
        crate::config_paths::layout_file().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved layout. A missing file is not an error.
    pub fn load(&self) -> Result<Option<PersistedLayout>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved layout");
                return Ok(None);
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let layout = PersistedLayout::from_json(&contents)?;
        tracing::info!(
            path = %self.path.display(),
            version = layout.version,
            windows = layout.window_count(),
            "loaded layout"
        );
        Ok(Some(layout))
    }

    /// Write the layout, replacing the file only once the new contents are
    /// fully on disk
    pub fn save(&self, layout: &PersistedLayout) -> Result<(), PersistenceError> {
        let io_error = |source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let contents = layout.to_json()?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(io_error)?;
        fs::rename(&tmp, &self.path).map_err(io_error)?;

        tracing::info!(
            path = %self.path.display(),
            windows = layout.window_count(),
            "saved layout"
        );
        Ok(())
    }
}
