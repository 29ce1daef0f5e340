//! Workbench configuration persistence
//!
//! Stores user preferences in `~/.config/workbench/config.yaml`

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::{EngineOptions, InsertPosition, Rect, SplitDirection, DEFAULT_MIN_EXTENT, SPLITTER_WIDTH};

/// Workbench configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Smallest extent in pixels a pane is squeezed to
    pub min_pane_extent: u32,
    /// Width of splitter hit areas in pixels
    pub splitter_width: u32,
    /// Initial workspace size
    pub viewport: ViewportConfig,
    /// Reopen the last saved layout at startup
    pub restore_layout: bool,
    /// Window types that get placeholder content
    pub window_types: Vec<String>,
    /// Windows opened when there is no saved layout
    pub default_workspace: Vec<WorkspaceEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// One window of the default workspace, added at the root in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    pub window_type: String,
    #[serde(default = "default_direction")]
    pub direction: SplitDirection,
    #[serde(default)]
    pub position: InsertPosition,
}

fn default_direction() -> SplitDirection {
    SplitDirection::Horizontal
}

impl WorkspaceEntry {
    pub fn new(window_type: &str, direction: SplitDirection) -> Self {
        Self {
            window_type: window_type.to_string(),
            direction,
            position: InsertPosition::After,
        }
    }
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            min_pane_extent: DEFAULT_MIN_EXTENT,
            splitter_width: SPLITTER_WIDTH,
            viewport: ViewportConfig::default(),
            restore_layout: true,
            window_types: ["host-explorer", "console", "output", "properties"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_workspace: vec![
                WorkspaceEntry::new("host-explorer", SplitDirection::Horizontal),
                WorkspaceEntry::new("properties", SplitDirection::Horizontal),
                WorkspaceEntry::new("console", SplitDirection::Vertical),
            ],
        }
    }
}

impl WorkbenchConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Sizing options for a docking engine
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            viewport: Rect::new(0, 0, self.viewport.width, self.viewport.height),
            min_extent: self.min_pane_extent,
            splitter_width: self.splitter_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: WorkbenchConfig = serde_yaml::from_str("min_pane_extent: 40\n").unwrap();
        assert_eq!(config.min_pane_extent, 40);
        assert_eq!(config.splitter_width, SPLITTER_WIDTH);
        assert!(config.restore_layout);
        assert_eq!(config.default_workspace.len(), 3);
    }

    #[test]
    fn test_workspace_entry_defaults() {
        let entry: WorkspaceEntry = serde_yaml::from_str("window_type: console\n").unwrap();
        assert_eq!(entry.direction, SplitDirection::Horizontal);
        assert_eq!(entry.position, InsertPosition::After);
    }
}
