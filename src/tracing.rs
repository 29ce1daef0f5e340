//! Tracing setup and layout diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=workbench::layout=debug` - engine commits only
//! - `RUST_LOG=workbench::update=debug` - message dispatch with layout diffs
//!
//! # Log Files
//!
//! Logs are written to `~/.config/workbench/logs/workbench.log` with daily rotation.
//! File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::layout::{DockingEngine, WindowId};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of the docking engine for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    pub version: u64,
    pub windows: Vec<WindowId>,
    pub splitter_count: usize,
}

impl LayoutSummary {
    pub fn from_engine(engine: &DockingEngine) -> Self {
        Self {
            version: engine.version(),
            windows: engine.window_ids(),
            splitter_count: engine.splitters().len(),
        }
    }

    /// Generate a diff description between two summaries
    pub fn diff(&self, other: &LayoutSummary) -> Option<String> {
        if self.version == other.version {
            return None;
        }

        let mut changes = vec![format!("version: {} → {}", self.version, other.version)];
        let added: Vec<&str> = other
            .windows
            .iter()
            .filter(|id| !self.windows.contains(id))
            .map(WindowId::as_str)
            .collect();
        let removed: Vec<&str> = self
            .windows
            .iter()
            .filter(|id| !other.windows.contains(id))
            .map(WindowId::as_str)
            .collect();

        if !added.is_empty() {
            changes.push(format!("added {}", added.join(", ")));
        }
        if !removed.is_empty() {
            changes.push(format!("removed {}", removed.join(", ")));
        }
        if added.is_empty() && removed.is_empty() && self.windows != other.windows {
            changes.push("windows reordered".to_string());
        }
        if self.splitter_count != other.splitter_count {
            changes.push(format!(
                "splitters: {} → {}",
                self.splitter_count, other.splitter_count
            ));
        }

        Some(changes.join("; "))
    }
}
