//! Runtime - executes commands and feeds their results back as messages
//!
//! The renderer is external. It subscribes to the engine's snapshots and
//! redraws on its own schedule; the runtime only counts redraw requests.

use std::collections::VecDeque;

use crate::commands::Cmd;
use crate::messages::{LayoutMsg, Msg, PersistenceMsg};
use crate::model::AppModel;
use crate::persistence::LayoutStore;
use crate::update::update;

#[derive(Debug)]
pub struct Runtime {
    pub model: AppModel,
    store: LayoutStore,
    redraws: usize,
}

impl Runtime {
    pub fn new(model: AppModel, store: LayoutStore) -> Self {
        Self {
            model,
            store,
            redraws: 0,
        }
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Redraws requested since startup
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Restore the saved layout, or open the default workspace when
    /// restoring is turned off
    pub fn startup(&mut self) {
        if self.model.config.restore_layout {
            self.dispatch(PersistenceMsg::LoadLayout.into());
        } else {
            self.dispatch(LayoutMsg::LoadDefaultWorkspace.into());
        }
    }

    /// Run `msg` and every message produced by the commands it triggers
    pub fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd, &mut queue);
            }
        }
    }

    fn process_cmd(&mut self, cmd: Cmd, queue: &mut VecDeque<Msg>) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraws += 1,
            Cmd::SaveLayout(layout) => {
                let result = self.store.save(&layout);
                queue.push_back(PersistenceMsg::LayoutSaved(result).into());
            }
            Cmd::LoadLayout => {
                let result = self.store.load();
                queue.push_back(PersistenceMsg::LayoutLoaded(result).into());
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, queue);
                }
            }
        }
    }
}
