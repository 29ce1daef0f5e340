//! Layout message handlers (open, close, resize, move windows)

use crate::commands::Cmd;
use crate::error::WorkbenchError;
use crate::layout::Rect;
use crate::messages::LayoutMsg;
use crate::model::AppModel;

/// Handle layout messages
///
/// A rejected operation leaves the model untouched: the error is logged and
/// becomes the status message, and no command is returned.
pub fn update_layout(model: &mut AppModel, msg: LayoutMsg) -> Option<Cmd> {
    let result = match msg {
        LayoutMsg::AddWindow {
            target,
            window_type,
            parameters,
            direction,
            position,
        } => model
            .open_window(target.as_ref(), &window_type, parameters, direction, position)
            .map(|window_id| format!("Opened {}", window_id)),

        LayoutMsg::CloseWindow(window_id) => model
            .close_window(&window_id)
            .map(|_| format!("Closed {}", window_id)),

        LayoutMsg::Resize { window_id, weight } => model
            .engine
            .resize(&window_id, weight)
            .map(|_| format!("Resized {}", window_id))
            .map_err(WorkbenchError::from),

        LayoutMsg::MoveWindow {
            window_id,
            target,
            direction,
            position,
        } => model
            .engine
            .move_window(&window_id, &target, direction, position)
            .map(|_| format!("Moved {} next to {}", window_id, target))
            .map_err(WorkbenchError::from),

        LayoutMsg::DragSplitter { index, delta } => model
            .engine
            .drag_splitter(index, delta)
            .map(|_| String::new())
            .map_err(WorkbenchError::from),

        LayoutMsg::SetViewport { width, height } => {
            model.engine.set_viewport(Rect::new(0, 0, width, height));
            Ok(String::new())
        }

        LayoutMsg::Reset => {
            model.engine.reset();
            model.contents.clear();
            Ok("Closed all windows".to_string())
        }

        LayoutMsg::LoadDefaultWorkspace => model
            .load_default_workspace()
            .map(|_| "Opened default workspace".to_string()),
    };

    match result {
        Ok(status) => {
            if !status.is_empty() {
                model.set_status(status);
            }
            Some(Cmd::Redraw)
        }
        Err(e) => {
            tracing::warn!("Layout operation rejected: {}", e);
            model.set_status(e.to_string());
            None
        }
    }
}
