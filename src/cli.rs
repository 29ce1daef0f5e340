//! Command-line argument parsing for the workbench
//!
//! Every subcommand operates on the saved layout file:
//! - `show` prints the layout as an outline
//! - `add`, `close`, `resize`, `move`, `reset` edit it through the message bus
//! - `validate` checks that it can be restored

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use workbench::layout::{InsertPosition, Parameters, SplitDirection, WindowId};
use workbench::messages::LayoutMsg;

/// Docked workspace layout manager
#[derive(Parser, Debug)]
#[command(name = "workbench", version, about = "Inspect and edit the docked workspace layout")]
pub struct CliArgs {
    /// Layout file (defaults to layout.json in the config directory)
    #[arg(long, value_name = "FILE", global = true)]
    pub layout: Option<PathBuf>,

    /// Config file (defaults to config.yaml in the config directory)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print the layout tree
    Show {
        /// Also print each window's pixel rectangle
        #[arg(long)]
        rects: bool,
    },
    /// Open a window
    Add {
        window_type: String,
        /// Window to split (defaults to the whole workspace)
        #[arg(long, value_name = "WINDOW_ID")]
        target: Option<String>,
        #[arg(long, value_enum, default_value_t = DirectionArg::Horizontal)]
        direction: DirectionArg,
        /// Insert before the target instead of after it
        #[arg(long)]
        before: bool,
        /// Window parameter; values are parsed as JSON when possible
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    /// Close a window
    Close { window_id: String },
    /// Set a window's weight within its split
    Resize { window_id: String, weight: f64 },
    /// Move a window next to another one
    Move {
        window_id: String,
        target: String,
        #[arg(long, value_enum, default_value_t = DirectionArg::Horizontal)]
        direction: DirectionArg,
        #[arg(long)]
        before: bool,
    },
    /// Close every window
    Reset,
    /// Check that the layout file can be restored
    Validate,
}

impl Default for CliCommand {
    fn default() -> Self {
        CliCommand::Show { rects: false }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Horizontal,
    Vertical,
}

impl From<DirectionArg> for SplitDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Horizontal => SplitDirection::Horizontal,
            DirectionArg::Vertical => SplitDirection::Vertical,
        }
    }
}

fn position(before: bool) -> InsertPosition {
    if before {
        InsertPosition::Before
    } else {
        InsertPosition::After
    }
}

/// Parse `KEY=VALUE` pairs into window parameters
pub fn parse_params(params: &[String]) -> Result<Parameters, String> {
    let mut parameters = Parameters::new();
    for param in params {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| format!("Expected KEY=VALUE, got '{}'", param))?;
        if key.is_empty() {
            return Err(format!("Empty parameter name in '{}'", param));
        }
        let value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        parameters.insert(key.to_string(), value);
    }
    Ok(parameters)
}

impl CliCommand {
    /// Layout message for commands that edit the layout
    pub fn to_msg(&self) -> Result<Option<LayoutMsg>, String> {
        let msg = match self {
            CliCommand::Show { .. } | CliCommand::Validate => return Ok(None),
            CliCommand::Add {
                window_type,
                target,
                direction,
                before,
                params,
            } => LayoutMsg::AddWindow {
                target: target.as_deref().map(WindowId::from),
                window_type: window_type.clone(),
                parameters: parse_params(params)?,
                direction: (*direction).into(),
                position: position(*before),
            },
            CliCommand::Close { window_id } => LayoutMsg::CloseWindow(WindowId::from(window_id.as_str())),
            CliCommand::Resize { window_id, weight } => LayoutMsg::Resize {
                window_id: WindowId::from(window_id.as_str()),
                weight: *weight,
            },
            CliCommand::Move {
                window_id,
                target,
                direction,
                before,
            } => LayoutMsg::MoveWindow {
                window_id: WindowId::from(window_id.as_str()),
                target: WindowId::from(target.as_str()),
                direction: (*direction).into(),
                position: position(*before),
            },
            CliCommand::Reset => LayoutMsg::Reset,
        };
        Ok(Some(msg))
    }
}
