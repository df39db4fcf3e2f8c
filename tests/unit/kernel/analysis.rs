use super::*;
use crate::kernel::services::ports::{EngineError, SessionError};
use slotmap::SlotMap;
use std::cell::Cell;

#[derive(Default)]
struct ScriptedSession {
    files: SlotMap<FileHandle, String>,
    checks: Cell<usize>,
}

impl AnalysisSession for ScriptedSession {
    fn open(&mut self, _name: &str, text: &str) -> FileHandle {
        self.files.insert(text.to_string())
    }

    fn update(&mut self, handle: FileHandle, text: &str) -> Result<(), SessionError> {
        let slot = self
            .files
            .get_mut(handle)
            .ok_or(SessionError::StaleHandle(handle))?;
        *slot = text.to_string();
        Ok(())
    }

    fn read_text(&self, handle: FileHandle) -> Result<String, SessionError> {
        self.files
            .get(handle)
            .cloned()
            .ok_or(SessionError::StaleHandle(handle))
    }

    fn close(&mut self, handle: FileHandle) -> Result<(), SessionError> {
        self.files
            .remove(handle)
            .map(|_| ())
            .ok_or(SessionError::StaleHandle(handle))
    }

    fn check(&self, handle: FileHandle, text: &str) -> Result<Vec<String>, EngineError> {
        self.checks.set(self.checks.get() + 1);
        if !self.files.contains_key(handle) {
            return Err(SessionError::StaleHandle(handle).into());
        }
        if text.starts_with("error") {
            return Err(EngineError::new("SyntaxError: line 1"));
        }
        Ok(text
            .lines()
            .enumerate()
            .filter(|(_, line)| line.contains("todo"))
            .map(|(idx, _)| format!("line {}: todo left in code", idx + 1))
            .collect())
    }
}

const DELAY: Duration = Duration::from_millis(100);

fn input(handle: FileHandle, content: &str) -> AnalysisInput {
    AnalysisInput {
        handle,
        content: content.to_string(),
    }
}

#[test]
fn test_deferred_coalesces_until_input_pauses() {
    let start = Instant::now();
    let mut deferred = Deferred::new(DELAY);

    assert!(deferred.set("a", start));
    assert!(deferred.set("ab", start + Duration::from_millis(60)));
    assert_eq!(deferred.deadline(), Some(start + Duration::from_millis(160)));

    assert_eq!(deferred.poll(start + Duration::from_millis(120)), None);
    assert_eq!(deferred.poll(start + Duration::from_millis(160)), Some(&"ab"));
    assert!(!deferred.is_pending());
    assert_eq!(deferred.settled(), Some(&"ab"));
}

#[test]
fn test_deferred_ignores_repeated_value() {
    let start = Instant::now();
    let mut deferred = Deferred::new(DELAY);

    assert!(deferred.set(1, start));
    assert!(!deferred.set(1, start + Duration::from_millis(50)));
    assert_eq!(deferred.deadline(), Some(start + DELAY));
}

#[test]
fn test_deferred_revert_to_settled_cancels_pending() {
    let start = Instant::now();
    let mut deferred = Deferred::new(DELAY);
    deferred.set(1, start);
    deferred.flush();

    assert!(deferred.set(2, start));
    assert!(!deferred.set(1, start));
    assert!(!deferred.is_pending());
    assert_eq!(deferred.settled(), Some(&1));
}

#[test]
fn test_deferred_reset_drops_everything() {
    let mut deferred = Deferred::new(DELAY);
    deferred.set(1, Instant::now());
    deferred.flush();
    deferred.set(2, Instant::now());

    deferred.reset();

    assert!(!deferred.is_pending());
    assert_eq!(deferred.settled(), None);
    assert_eq!(deferred.flush(), None);
}

#[test]
fn test_check_outcome_maps_engine_error() {
    let mut session = ScriptedSession::default();
    let handle = session.open("main.py", "");

    assert_eq!(
        CheckOutcome::run(&session, &input(handle, "x = 1\n# todo")),
        CheckOutcome::Diagnostics(vec!["line 2: todo left in code".to_string()])
    );
    assert_eq!(
        CheckOutcome::run(&session, &input(handle, "error here")),
        CheckOutcome::Failed("SyntaxError: line 1".to_string())
    );
}

#[test]
fn test_cache_waits_for_delay_before_checking() {
    let mut session = ScriptedSession::default();
    let handle = session.open("main.py", "");
    let mut cache = AnalysisCache::new(DELAY);
    let start = Instant::now();

    assert!(cache.schedule(Some(input(handle, "t")), start));
    assert!(cache.schedule(Some(input(handle, "to")), start + Duration::from_millis(30)));
    assert!(cache.schedule(Some(input(handle, "todo")), start + Duration::from_millis(60)));

    assert!(!cache.poll(start + Duration::from_millis(100), &session));
    assert_eq!(session.checks.get(), 0);
    assert!(cache.is_pending());

    assert!(cache.poll(start + Duration::from_millis(160), &session));
    assert_eq!(session.checks.get(), 1);
    assert_eq!(
        cache.diagnostics(Some(handle)),
        ["line 1: todo left in code".to_string()]
    );
    let result = cache.result_for(handle).unwrap();
    assert_eq!(result.input.content, "todo");
}

#[test]
fn test_engine_error_clears_diagnostics_and_recovers() {
    let mut session = ScriptedSession::default();
    let handle = session.open("main.py", "");
    let mut cache = AnalysisCache::new(DELAY);
    let now = Instant::now();

    cache.schedule(Some(input(handle, "todo")), now);
    assert!(cache.flush(&session));
    assert_eq!(cache.diagnostics(Some(handle)).len(), 1);
    assert_eq!(cache.error(Some(handle)), None);

    cache.schedule(Some(input(handle, "error")), now);
    assert!(cache.flush(&session));
    assert!(cache.diagnostics(Some(handle)).is_empty());
    assert_eq!(cache.error(Some(handle)), Some("SyntaxError: line 1"));

    cache.schedule(Some(input(handle, "fixed\ntodo")), now);
    assert!(cache.flush(&session));
    assert_eq!(cache.error(Some(handle)), None);
    assert_eq!(
        cache.diagnostics(Some(handle)),
        ["line 2: todo left in code".to_string()]
    );
}

#[test]
fn test_no_active_file_clears_results() {
    let mut session = ScriptedSession::default();
    let handle = session.open("main.py", "");
    let mut cache = AnalysisCache::new(DELAY);
    cache.schedule(Some(input(handle, "todo")), Instant::now());
    cache.flush(&session);

    cache.schedule(Some(input(handle, "todo todo")), Instant::now());
    assert!(cache.schedule(None, Instant::now()));

    assert!(!cache.is_pending());
    assert!(cache.result_for(handle).is_none());
    assert!(cache.diagnostics(Some(handle)).is_empty());
    assert!(!cache.flush(&session));
}

#[test]
fn test_result_for_other_handle_is_hidden() {
    let mut session = ScriptedSession::default();
    let first = session.open("a.py", "");
    let second = session.open("b.py", "");
    let mut cache = AnalysisCache::new(DELAY);
    let now = Instant::now();

    cache.schedule(Some(input(first, "error")), now);
    cache.flush(&session);

    assert_eq!(cache.error(Some(first)), Some("SyntaxError: line 1"));
    assert_eq!(cache.error(Some(second)), None);
    assert!(cache.diagnostics(Some(second)).is_empty());
    assert_eq!(cache.error(None), None);

    // Switching files keeps the old result hidden until the new one settles.
    assert!(cache.schedule(Some(input(second, "todo")), now));
    assert_eq!(cache.error(Some(second)), None);
    assert!(cache.diagnostics(Some(second)).is_empty());
    cache.flush(&session);
    assert_eq!(cache.diagnostics(Some(second)).len(), 1);
}

#[test]
fn test_closed_handle_reports_stale_failure() {
    let mut session = ScriptedSession::default();
    let handle = session.open("a.py", "");
    session.close(handle).unwrap();
    let mut cache = AnalysisCache::new(DELAY);

    cache.schedule(Some(input(handle, "x")), Instant::now());
    cache.flush(&session);

    assert!(cache.error(Some(handle)).unwrap().contains("stale"));
}
