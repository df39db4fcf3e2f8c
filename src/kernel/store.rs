use super::{Action, Effect, WorkspaceController};
use crate::kernel::services::ports::AnalysisSession;

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self::default()
    }
}

pub struct Store<S> {
    controller: WorkspaceController<S>,
}

impl<S: AnalysisSession> Store<S> {
    pub fn new(session: S) -> Self {
        Self {
            controller: WorkspaceController::new(session),
        }
    }

    pub fn controller(&self) -> &WorkspaceController<S> {
        &self.controller
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let state_changed = match action {
            Action::Initialize(restored) => self.controller.initialize(restored),
            Action::SelectFile(handle) => self.controller.select_file(handle),
            Action::EditActiveFile(text) => self.controller.edit_active_file(&text),
            Action::AddFile(name) => self.controller.add_file(&name),
            Action::RemoveFile(handle) => self.controller.remove_file(handle),
            Action::RenameFile { handle, new_name } => {
                self.controller.rename_file(handle, &new_name)
            }
            Action::Share => return self.dispatch_share(),
        };

        if !state_changed {
            return DispatchResult::unchanged();
        }

        let mut effects = Vec::with_capacity(2);
        if let Some(snapshot) = self.controller.snapshot() {
            effects.push(Effect::PersistLocal(snapshot));
        }
        effects.push(Effect::ScheduleAnalysis(self.controller.analysis_input()));

        DispatchResult {
            effects,
            state_changed,
        }
    }

    fn dispatch_share(&self) -> DispatchResult {
        if self.controller.active().is_none() {
            return DispatchResult::unchanged();
        }
        let Some(snapshot) = self.controller.snapshot() else {
            return DispatchResult::unchanged();
        };

        DispatchResult {
            effects: vec![Effect::Share(snapshot)],
            state_changed: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
