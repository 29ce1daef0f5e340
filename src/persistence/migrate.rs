//! Schema migrations for persisted layouts
//!
//! Each step upgrades a layout from one version to the next. Steps run in
//! order until the layout reaches [`LAYOUT_SCHEMA_VERSION`].

use super::{
    check_version, PersistedEntry, PersistedLayout, PersistenceError, LAYOUT_SCHEMA_VERSION,
};

type Step = fn(&mut PersistedEntry);

/// `(from_version, step)` pairs, in ascending order
const MIGRATIONS: &[(u32, Step)] = &[(1, fill_equal_weights)];

/// Upgrade `layout` to the current schema
pub fn migrate(mut layout: PersistedLayout) -> Result<PersistedLayout, PersistenceError> {
    check_version(layout.version)?;

    while layout.version < LAYOUT_SCHEMA_VERSION {
        let from = layout.version;
        let (_, step) = MIGRATIONS
            .iter()
            .find(|(version, _)| *version == from)
            .ok_or(PersistenceError::UnsupportedVersion {
                found: from,
                supported: LAYOUT_SCHEMA_VERSION,
            })?;
        if let Some(root) = layout.root.as_mut() {
            step(root);
        }
        layout.version = from + 1;
        tracing::info!(from, to = layout.version, "migrated persisted layout");
    }

    Ok(layout)
}

/// Version 1 containers carried no weights; every child gets an equal share
fn fill_equal_weights(entry: &mut PersistedEntry) {
    if let PersistedEntry::Container(container) = entry {
        if container.weights.is_empty() {
            container.weights = vec![1.0; container.windows.len()];
        }
        for child in &mut container.windows {
            fill_equal_weights(child);
        }
    }
}
