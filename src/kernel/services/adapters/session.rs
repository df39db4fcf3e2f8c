//! In-memory analysis session.

use compact_str::CompactString;
use slotmap::SlotMap;

use super::lint::{check_source, LintOptions};
use crate::kernel::services::ports::{AnalysisSession, EngineError, FileHandle, SessionError};

#[derive(Debug)]
struct SessionFile {
    name: CompactString,
    text: String,
}

#[derive(Debug, Default)]
pub struct MemorySession {
    files: SlotMap<FileHandle, SessionFile>,
    lint: LintOptions,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lint_options(lint: LintOptions) -> Self {
        Self {
            files: SlotMap::with_key(),
            lint,
        }
    }

    pub fn is_open(&self, handle: FileHandle) -> bool {
        self.files.contains_key(handle)
    }

    pub fn open_count(&self) -> usize {
        self.files.len()
    }

    pub fn file_name(&self, handle: FileHandle) -> Option<&str> {
        self.files.get(handle).map(|file| file.name.as_str())
    }

    fn file(&self, handle: FileHandle) -> Result<&SessionFile, SessionError> {
        self.files
            .get(handle)
            .ok_or(SessionError::StaleHandle(handle))
    }
}

impl AnalysisSession for MemorySession {
    fn open(&mut self, name: &str, text: &str) -> FileHandle {
        self.files.insert(SessionFile {
            name: CompactString::new(name),
            text: text.to_string(),
        })
    }

    fn update(&mut self, handle: FileHandle, text: &str) -> Result<(), SessionError> {
        let file = self
            .files
            .get_mut(handle)
            .ok_or(SessionError::StaleHandle(handle))?;
        file.text.clear();
        file.text.push_str(text);
        Ok(())
    }

    fn read_text(&self, handle: FileHandle) -> Result<String, SessionError> {
        self.file(handle).map(|file| file.text.clone())
    }

    fn close(&mut self, handle: FileHandle) -> Result<(), SessionError> {
        self.files
            .remove(handle)
            .map(|_| ())
            .ok_or(SessionError::StaleHandle(handle))
    }

    fn check(&self, handle: FileHandle, text: &str) -> Result<Vec<String>, EngineError> {
        self.file(handle)?;
        check_source(text, self.lint)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/session.rs"]
mod tests;
