//! Analysis session contract.
//!
//! The session holds the text of every open file and runs the checker on
//! demand. Handles are generational: once closed, a handle is never issued
//! again, so a stale handle can only ever fail, never alias another file.

use thiserror::Error;

slotmap::new_key_type! {
    /// Opaque identifier of a file opened in an [`AnalysisSession`].
    pub struct FileHandle;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("stale file handle {0:?}")]
    StaleHandle(FileHandle),
}

/// Failure reported by the analysis engine for a single check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SessionError> for EngineError {
    fn from(err: SessionError) -> Self {
        Self::new(err.to_string())
    }
}

pub trait AnalysisSession {
    fn open(&mut self, name: &str, text: &str) -> FileHandle;

    fn update(&mut self, handle: FileHandle, text: &str) -> Result<(), SessionError>;

    fn read_text(&self, handle: FileHandle) -> Result<String, SessionError>;

    fn close(&mut self, handle: FileHandle) -> Result<(), SessionError>;

    /// Checks `text` as the content of `handle`.
    ///
    /// The text is passed by value so the caller's cache key and the analysed
    /// input are the same value, independent of what the session currently
    /// stores for the handle.
    fn check(&self, handle: FileHandle, text: &str) -> Result<Vec<String>, EngineError>;
}
