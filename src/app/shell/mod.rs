//! Shell: wires the kernel store to analysis, persistence and the runtime.

use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::services::ports::{AnalysisSession, FileHandle, ShellConfig};
use crate::kernel::{
    Action, ActiveFile, AnalysisCache, PersistenceGateway, Revision, Store, WorkspaceController,
};
use std::sync::mpsc::{self, Receiver};

mod bridge;
mod tick;

const MAX_RUNTIME_DRAIN_PER_TICK: usize = 64;

pub struct Shell<S> {
    store: Store<S>,
    analysis: AnalysisCache,
    gateway: PersistenceGateway,
    runtime: AsyncRuntime,
    runtime_rx: Receiver<AppMessage>,
    share_in_flight: bool,
    shares_started: u64,
    share_url: Option<String>,
    notice: Option<String>,
}

/// One row of the file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub handle: FileHandle,
    pub selected: bool,
}

impl<S: AnalysisSession> Shell<S> {
    pub fn new(
        session: S,
        gateway: PersistenceGateway,
        config: &ShellConfig,
    ) -> std::io::Result<Self> {
        let (tx, runtime_rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx)?;
        Ok(Self {
            store: Store::new(session),
            analysis: AnalysisCache::new(config.analysis_delay()),
            gateway,
            runtime,
            runtime_rx,
            share_in_flight: false,
            shares_started: 0,
            share_url: None,
            notice: None,
        })
    }

    /// Restores the workspace (shared link, then local snapshot, then the
    /// default) and initializes the controller. Runs once.
    pub fn start(&mut self) -> bool {
        if self.controller().is_initialized() {
            return false;
        }
        let restored = self.runtime.block_on(self.gateway.restore());
        self.dispatch(Action::Initialize(restored))
    }

    pub fn controller(&self) -> &WorkspaceController<S> {
        self.store.controller()
    }

    pub fn revision(&self) -> Revision {
        self.controller().revision()
    }

    pub fn active(&self) -> Option<&ActiveFile> {
        self.controller().active()
    }

    fn active_handle(&self) -> Option<FileHandle> {
        self.active().map(|file| file.handle)
    }

    pub fn files(&self) -> Vec<FileEntry> {
        let active = self.active_handle();
        self.controller()
            .registry()
            .iter()
            .map(|(name, handle)| FileEntry {
                name: name.to_string(),
                handle,
                selected: Some(handle) == active,
            })
            .collect()
    }

    /// Diagnostics of the active file, empty while none were computed for it.
    pub fn diagnostics(&self) -> &[String] {
        self.analysis.diagnostics(self.active_handle())
    }

    pub fn analysis_error(&self) -> Option<&str> {
        self.analysis.error(self.active_handle())
    }

    /// Last sharing failure, cleared when a new share starts.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn share_url(&self) -> Option<&str> {
        self.share_url.as_deref()
    }

    pub fn is_sharing(&self) -> bool {
        self.share_in_flight
    }

    pub fn location_href(&self) -> String {
        self.gateway.location().href()
    }

    pub fn select(&mut self, name: &str) -> bool {
        let Some(handle) = self.controller().registry().handle(name) else {
            return false;
        };
        self.dispatch(Action::SelectFile(handle))
    }

    pub fn edit(&mut self, text: &str) -> bool {
        self.dispatch(Action::EditActiveFile(text.to_string()))
    }

    /// Adds `name`, or the next free `fileN.py` name.
    pub fn add_file(&mut self, name: Option<&str>) -> bool {
        let name = match name {
            Some(name) => name.to_string(),
            None => self.controller().registry().unique_name().to_string(),
        };
        self.dispatch(Action::AddFile(name))
    }

    /// Removes `name`. The last remaining file is kept.
    pub fn remove(&mut self, name: &str) -> bool {
        let registry = self.controller().registry();
        if registry.len() <= 1 {
            return false;
        }
        let Some(handle) = registry.handle(name) else {
            return false;
        };
        self.dispatch(Action::RemoveFile(handle))
    }

    pub fn rename(&mut self, name: &str, new_name: &str) -> bool {
        let Some(handle) = self.controller().registry().handle(name) else {
            return false;
        };
        self.dispatch(Action::RenameFile {
            handle,
            new_name: new_name.to_string(),
        })
    }

    /// Starts uploading the workspace. Returns whether an upload started.
    pub fn share(&mut self) -> bool {
        let started = self.shares_started;
        self.dispatch(Action::Share);
        self.shares_started != started
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/shell.rs"]
mod tests;
