//! Deferred diagnostics for the active file.
//!
//! Edits arrive once per keystroke; analysis runs only when the deferred view
//! of the active file settles. The deferred view is a trailing-edge coalescer:
//! every new value pushes the deadline back, intermediate values are dropped,
//! and once input pauses the latest value is analysed. Results are tagged with
//! the exact input they were computed from, so a result for an older handle is
//! never presented as belonging to the current file.

use std::time::{Duration, Instant};

use crate::kernel::services::ports::{AnalysisSession, FileHandle};
use crate::kernel::workspace::ActiveFile;

/// The cache key of one analysis run: a handle and the text it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInput {
    pub handle: FileHandle,
    pub content: String,
}

impl From<&ActiveFile> for AnalysisInput {
    fn from(file: &ActiveFile) -> Self {
        Self {
            handle: file.handle,
            content: file.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Diagnostics(Vec<String>),
    Failed(String),
}

impl CheckOutcome {
    pub fn run<S: AnalysisSession>(session: &S, input: &AnalysisInput) -> Self {
        match session.check(input.handle, &input.content) {
            Ok(diagnostics) => Self::Diagnostics(diagnostics),
            Err(err) => Self::Failed(err.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub input: AnalysisInput,
    pub outcome: CheckOutcome,
}

/// Lagging copy of a value that converges once updates pause.
#[derive(Debug)]
pub struct Deferred<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
    settled: Option<T>,
}

impl<T: Clone + PartialEq> Deferred<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            settled: None,
        }
    }

    /// Buffers `value`. Returns `false` when it is already pending or settled.
    pub fn set(&mut self, value: T, now: Instant) -> bool {
        if self.pending.as_ref().is_some_and(|(pending, _)| *pending == value) {
            return false;
        }
        if self.settled.as_ref() == Some(&value) {
            // Reverted to the settled value before the deadline.
            self.pending = None;
            return false;
        }
        self.pending = Some((value, now + self.delay));
        true
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn settled(&self) -> Option<&T> {
        self.settled.as_ref()
    }

    /// Settles the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.flush(),
            _ => None,
        }
    }

    /// Settles the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<&T> {
        let (value, _) = self.pending.take()?;
        self.settled = Some(value);
        self.settled.as_ref()
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.settled = None;
    }
}

#[derive(Debug)]
pub struct AnalysisCache {
    deferred: Deferred<AnalysisInput>,
    result: Option<CheckResult>,
}

impl AnalysisCache {
    pub fn new(delay: Duration) -> Self {
        Self {
            deferred: Deferred::new(delay),
            result: None,
        }
    }

    /// Feeds the latest active file into the deferred view.
    ///
    /// With no active file the cache is cleared immediately: no diagnostics,
    /// no error.
    pub fn schedule(&mut self, input: Option<AnalysisInput>, now: Instant) -> bool {
        match input {
            Some(input) => self.deferred.set(input, now),
            None => {
                let had_result = self.result.is_some();
                self.deferred.reset();
                self.result = None;
                had_result
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deferred.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deferred.deadline()
    }

    /// Runs the checker if the deferred view settled by `now`.
    pub fn poll<S: AnalysisSession>(&mut self, now: Instant, session: &S) -> bool {
        let Some(input) = self.deferred.poll(now).cloned() else {
            return false;
        };
        self.run(session, input);
        true
    }

    /// Settles and analyses the pending input right away.
    pub fn flush<S: AnalysisSession>(&mut self, session: &S) -> bool {
        let Some(input) = self.deferred.flush().cloned() else {
            return false;
        };
        self.run(session, input);
        true
    }

    fn run<S: AnalysisSession>(&mut self, session: &S, input: AnalysisInput) {
        let outcome = CheckOutcome::run(session, &input);
        match &outcome {
            CheckOutcome::Diagnostics(diagnostics) => {
                tracing::debug!(count = diagnostics.len(), "analysis finished");
            }
            CheckOutcome::Failed(message) => {
                tracing::warn!(error = %message, "analysis failed");
            }
        }
        self.result = Some(CheckResult { input, outcome });
    }

    /// The latest result, if it was computed for `handle`.
    pub fn result_for(&self, handle: FileHandle) -> Option<&CheckResult> {
        self.result
            .as_ref()
            .filter(|result| result.input.handle == handle)
    }

    pub fn diagnostics(&self, active: Option<FileHandle>) -> &[String] {
        match active.and_then(|handle| self.result_for(handle)) {
            Some(CheckResult {
                outcome: CheckOutcome::Diagnostics(diagnostics),
                ..
            }) => diagnostics,
            _ => &[],
        }
    }

    pub fn error(&self, active: Option<FileHandle>) -> Option<&str> {
        match active.and_then(|handle| self.result_for(handle)) {
            Some(CheckResult {
                outcome: CheckOutcome::Failed(message),
                ..
            }) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/analysis.rs"]
mod tests;
