use super::*;
use crate::kernel::services::adapters::MemorySession;
use crate::kernel::services::ports::FileHandle;
use crate::kernel::{AnalysisInput, WorkspaceSnapshot};

fn started_store() -> Store<MemorySession> {
    let mut store = Store::new(MemorySession::new());
    let result = store.dispatch(Action::Initialize(None));
    assert!(result.state_changed);
    store
}

fn handle_of(store: &Store<MemorySession>, name: &str) -> FileHandle {
    store.controller().registry().handle(name).unwrap()
}

#[test]
fn test_initialize_persists_and_schedules_analysis() {
    let mut store = Store::new(MemorySession::new());

    let result = store.dispatch(Action::Initialize(None));

    assert!(result.state_changed);
    let handle = handle_of(&store, "main.py");
    assert_eq!(
        result.effects,
        vec![
            Effect::PersistLocal(WorkspaceSnapshot::default()),
            Effect::ScheduleAnalysis(Some(AnalysisInput {
                handle,
                content: "import os".to_string(),
            })),
        ]
    );
}

#[test]
fn test_second_initialize_has_no_effects() {
    let mut store = started_store();
    let result = store.dispatch(Action::Initialize(None));
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn test_edit_emits_snapshot_with_new_text() {
    let mut store = started_store();

    let result = store.dispatch(Action::EditActiveFile("import sys".to_string()));

    assert!(result.state_changed);
    match &result.effects[..] {
        [Effect::PersistLocal(snapshot), Effect::ScheduleAnalysis(Some(input))] => {
            assert_eq!(snapshot.files.get("main.py").map(String::as_str), Some("import sys"));
            assert_eq!(input.content, "import sys");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn test_noop_actions_emit_nothing() {
    let mut store = started_store();

    let same = store.dispatch(Action::EditActiveFile("import os".to_string()));
    let duplicate = store.dispatch(Action::AddFile("main.py".to_string()));

    assert!(!same.state_changed && same.effects.is_empty());
    assert!(!duplicate.state_changed && duplicate.effects.is_empty());
    assert_eq!(store.controller().revision(), 1);
}

#[test]
fn test_removing_last_file_schedules_clear() {
    let mut store = started_store();
    let handle = handle_of(&store, "main.py");

    let result = store.dispatch(Action::RemoveFile(handle));

    assert_eq!(
        result.effects,
        vec![
            Effect::PersistLocal(WorkspaceSnapshot::new(Default::default(), None)),
            Effect::ScheduleAnalysis(None),
        ]
    );
}

#[test]
fn test_rename_effects_follow_new_handle() {
    let mut store = started_store();
    let old = handle_of(&store, "main.py");

    let result = store.dispatch(Action::RenameFile {
        handle: old,
        new_name: "app.py".to_string(),
    });

    let new = handle_of(&store, "app.py");
    assert_ne!(old, new);
    assert!(result.effects.contains(&Effect::ScheduleAnalysis(Some(AnalysisInput {
        handle: new,
        content: "import os".to_string(),
    }))));
}

#[test]
fn test_share_emits_snapshot_without_state_change() {
    let mut store = started_store();
    let revision = store.controller().revision();

    let result = store.dispatch(Action::Share);

    assert!(!result.state_changed);
    assert_eq!(result.effects, vec![Effect::Share(WorkspaceSnapshot::default())]);
    assert_eq!(store.controller().revision(), revision);
}

#[test]
fn test_share_without_active_file_is_noop() {
    let mut store = Store::new(MemorySession::new());
    assert!(store.dispatch(Action::Share).effects.is_empty());

    let mut store = started_store();
    let handle = handle_of(&store, "main.py");
    store.dispatch(Action::RemoveFile(handle));
    assert!(store.dispatch(Action::Share).effects.is_empty());
}
