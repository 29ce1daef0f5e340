//! Workbench command-line front end
//!
//! Loads the saved layout through the same message bus a UI would use,
//! applies the requested edit and writes the result back.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;

use workbench::config::WorkbenchConfig;
use workbench::content::ContentRegistry;
use workbench::layout::DockingEngine;
use workbench::messages::{Msg, PersistenceMsg};
use workbench::model::AppModel;
use workbench::persistence::{self, LayoutStore};
use workbench::runtime::Runtime;

use cli::{CliArgs, CliCommand};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    workbench::tracing::init();

    let config = match &args.config {
        Some(path) => WorkbenchConfig::load_from(path),
        None => WorkbenchConfig::load(),
    };
    let store = match &args.layout {
        Some(path) => LayoutStore::new(path.clone()),
        None => LayoutStore::default_location().context("No config directory available")?,
    };

    let command = args.command.unwrap_or_default();
    if command == CliCommand::Validate {
        return validate(&store, &config);
    }

    let msg = command.to_msg().map_err(anyhow::Error::msg)?;
    let model = AppModel::new(config);
    if msg.is_some() {
        // Never overwrite a file this build cannot read in full
        let saved = store
            .load()
            .with_context(|| format!("Refusing to edit {}", store.path().display()))?;
        if let Some(layout) = saved {
            let skipped = model
                .unrestorable_windows(&layout)
                .with_context(|| format!("Refusing to edit {}", store.path().display()))?;
            if !skipped.is_empty() {
                let types: Vec<&str> = skipped.iter().map(|w| w.window_type.as_str()).collect();
                bail!(
                    "Refusing to edit {}: saving would drop windows of unknown types: {}",
                    store.path().display(),
                    types.join(", ")
                );
            }
        }
    }

    let mut runtime = Runtime::new(model, store);
    runtime.dispatch(PersistenceMsg::LoadLayout.into());

    if let Some(msg) = msg {
        let version = runtime.model.engine.version();
        runtime.dispatch(Msg::Layout(msg));
        if runtime.model.engine.version() == version {
            bail!(runtime
                .model
                .status
                .clone()
                .unwrap_or_else(|| "Layout unchanged".to_string()));
        }
        runtime.dispatch(PersistenceMsg::SaveLayout.into());
    }

    if let Some(status) = &runtime.model.status {
        eprintln!("{}", status);
    }
    let show_rects = matches!(command, CliCommand::Show { rects: true });
    print_layout(&runtime.model.engine, show_rects);
    Ok(())
}

/// Restore the layout file into a scratch engine and report what would be lost
fn validate(store: &LayoutStore, config: &WorkbenchConfig) -> Result<()> {
    let Some(layout) = store.load()? else {
        println!("{}: no saved layout", store.path().display());
        return Ok(());
    };

    let registry =
        ContentRegistry::with_placeholders(config.window_types.iter().map(String::as_str));
    let restored = persistence::deserialize(&layout, &registry)?;
    let mut engine = DockingEngine::new(config.engine_options());
    engine.attach(restored.root)?;

    println!(
        "{}: schema version {}, {} windows restorable",
        store.path().display(),
        layout.version,
        engine.window_count()
    );
    for skipped in &restored.skipped {
        println!("  skipped {}: {}", skipped.window_type, skipped.reason);
    }
    Ok(())
}

fn print_layout(engine: &DockingEngine, show_rects: bool) {
    match engine.root() {
        None => println!("(empty workspace)"),
        Some(root) => print!("{}", root),
    }
    if show_rects {
        if let Some(root) = engine.root() {
            for leaf in root.leaves() {
                if let Some(rect) = engine.window_rect(&leaf.window_id) {
                    println!(
                        "{}: {}x{} at ({}, {})",
                        leaf.window_id, rect.width, rect.height, rect.x, rect.y
                    );
                }
            }
        }
    }
}
