use compact_str::CompactString;
use indexmap::IndexMap;

use super::registry::FileRegistry;
use super::snapshot::{ActiveFile, WorkspaceSnapshot};
use crate::kernel::analysis::AnalysisInput;
use crate::kernel::services::ports::{AnalysisSession, FileHandle};

pub type Revision = u64;

/// Single authority over the open files, the active file and the revision.
///
/// Every mutating method returns `true` iff the state changed, in which case
/// the revision went up by exactly one. Handles that are no longer registered
/// turn the call into a no-op.
pub struct WorkspaceController<S> {
    session: S,
    registry: FileRegistry,
    active: Option<ActiveFile>,
    revision: Revision,
    initialized: bool,
}

impl<S: AnalysisSession> WorkspaceController<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            registry: FileRegistry::new(),
            active: None,
            revision: 0,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    pub fn active(&self) -> Option<&ActiveFile> {
        self.active.as_ref()
    }

    /// Read-only access to the session, e.g. for running checks.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Opens every file of `restored`. Falls back to the default workspace
    /// when nothing was restored or no restored entry was usable.
    ///
    /// Runs at most once; later calls are ignored.
    pub fn initialize(&mut self, restored: Option<WorkspaceSnapshot>) -> bool {
        if self.initialized {
            tracing::warn!("workspace already initialized");
            return false;
        }

        if let Some(snapshot) = restored {
            self.open_snapshot(&snapshot);
        }
        if self.registry.is_empty() {
            self.open_snapshot(&WorkspaceSnapshot::default());
        }

        self.initialized = true;
        self.revision = 1;
        tracing::info!(
            files = self.registry.len(),
            current = self.active.as_ref().map(|f| f.name.as_str()),
            "workspace initialized"
        );
        true
    }

    /// Opens every valid entry of `snapshot`; invalid or duplicate names are
    /// skipped.
    fn open_snapshot(&mut self, snapshot: &WorkspaceSnapshot) {
        for (name, content) in &snapshot.files {
            if let Err(err) = self.registry.validate_new_name(name) {
                tracing::warn!(error = %err, "skipping restored file");
                continue;
            }
            let handle = self.session.open(name, content);
            self.registry.insert(name, handle);

            if snapshot.current.as_deref() == Some(name.as_str()) {
                self.active = Some(ActiveFile {
                    handle,
                    name: CompactString::new(name),
                    content: content.clone(),
                });
            }
        }
    }

    pub fn select_file(&mut self, handle: FileHandle) -> bool {
        if !self.initialized {
            return false;
        }
        let Some(name) = self.registry.name_of(handle) else {
            return false;
        };
        let name = CompactString::new(name);
        let content = match self.session.read_text(handle) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(file = %name, error = %err, "select failed");
                return false;
            }
        };

        self.active = Some(ActiveFile {
            handle,
            name,
            content,
        });
        self.bump();
        true
    }

    pub fn edit_active_file(&mut self, text: &str) -> bool {
        if !self.initialized {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.content == text {
            return false;
        }
        if let Err(err) = self.session.update(active.handle, text) {
            tracing::warn!(file = %active.name, error = %err, "edit dropped");
            return false;
        }

        active.content.clear();
        active.content.push_str(text);
        self.bump();
        true
    }

    pub fn add_file(&mut self, name: &str) -> bool {
        if !self.initialized {
            return false;
        }
        if let Err(err) = self.registry.validate_new_name(name) {
            tracing::warn!(error = %err, "add file rejected");
            return false;
        }

        let handle = self.session.open(name, "");
        self.registry.insert(name, handle);
        self.active = Some(ActiveFile {
            handle,
            name: CompactString::new(name),
            content: String::new(),
        });
        self.bump();
        tracing::debug!(file = name, "file added");
        true
    }

    pub fn remove_file(&mut self, handle: FileHandle) -> bool {
        if !self.initialized {
            return false;
        }
        let Some(index) = self.registry.index_of(handle) else {
            return false;
        };
        let Some((name, _)) = self.registry.remove_index(index) else {
            return false;
        };

        if self.active.as_ref().is_some_and(|f| f.handle == handle) {
            // The preceding entry, or the one that moved into the removed slot.
            let successor = index
                .checked_sub(1)
                .and_then(|prev| self.registry.get_index(prev))
                .or_else(|| self.registry.get_index(index))
                .map(|(name, handle)| (CompactString::new(name), handle));

            self.active = successor.and_then(|(name, handle)| {
                match self.session.read_text(handle) {
                    Ok(content) => Some(ActiveFile {
                        handle,
                        name,
                        content,
                    }),
                    Err(err) => {
                        tracing::warn!(file = %name, error = %err, "successor unreadable");
                        None
                    }
                }
            });
        }

        // Close only after the successor has been read.
        if let Err(err) = self.session.close(handle) {
            tracing::warn!(file = %name, error = %err, "close failed");
        }

        self.bump();
        tracing::debug!(file = %name, "file removed");
        true
    }

    /// Renames by closing the old handle and opening a new one in its slot.
    pub fn rename_file(&mut self, handle: FileHandle, new_name: &str) -> bool {
        if !self.initialized {
            return false;
        }
        let Some(index) = self.registry.index_of(handle) else {
            return false;
        };
        let Some((old_name, _)) = self.registry.get_index(index) else {
            return false;
        };
        if old_name == new_name {
            return false;
        }
        let old_name = CompactString::new(old_name);
        if let Err(err) = self.registry.validate_new_name(new_name) {
            tracing::warn!(file = %old_name, error = %err, "rename rejected");
            return false;
        }

        let content = match self.session.read_text(handle) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(file = %old_name, error = %err, "rename failed");
                return false;
            }
        };
        if let Err(err) = self.session.close(handle) {
            tracing::warn!(file = %old_name, error = %err, "rename failed");
            return false;
        }

        let new_handle = self.session.open(new_name, &content);
        self.registry.replace_index(index, new_name, new_handle);

        if let Some(active) = self.active.as_mut().filter(|f| f.handle == handle) {
            active.handle = new_handle;
            active.name = CompactString::new(new_name);
            active.content = content;
        }

        self.bump();
        tracing::debug!(from = %old_name, to = new_name, "file renamed");
        true
    }

    /// Current workspace as a snapshot; `None` before initialization.
    pub fn snapshot(&self) -> Option<WorkspaceSnapshot> {
        if !self.initialized {
            return None;
        }

        let mut files = IndexMap::with_capacity(self.registry.len());
        for (name, handle) in self.registry.iter() {
            match self.session.read_text(handle) {
                Ok(text) => {
                    files.insert(name.to_string(), text);
                }
                Err(err) => {
                    tracing::warn!(file = name, error = %err, "file left out of snapshot");
                }
            }
        }

        Some(WorkspaceSnapshot::new(
            files,
            self.active.as_ref().map(|f| f.name.to_string()),
        ))
    }

    pub fn analysis_input(&self) -> Option<AnalysisInput> {
        self.active.as_ref().map(AnalysisInput::from)
    }

    fn bump(&mut self) {
        self.revision += 1;
        tracing::trace!(revision = self.revision, "revision");
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/workspace/controller.rs"]
mod tests;
