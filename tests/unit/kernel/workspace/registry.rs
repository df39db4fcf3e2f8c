use super::*;
use slotmap::SlotMap;

fn handles(n: usize) -> Vec<FileHandle> {
    let mut keys: SlotMap<FileHandle, ()> = SlotMap::with_key();
    (0..n).map(|_| keys.insert(())).collect()
}

/// Registers `names`; the returned handles carry one unused spare at the end.
fn registry_with(names: &[&str]) -> (FileRegistry, Vec<FileHandle>) {
    let handles = handles(names.len() + 1);
    let mut registry = FileRegistry::new();
    for (name, handle) in names.iter().zip(&handles) {
        registry.insert(name, *handle);
    }
    (registry, handles)
}

#[test]
fn test_iteration_follows_insertion_order() {
    let (registry, handles) = registry_with(&["b.py", "a.py", "c.py"]);
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["b.py", "a.py", "c.py"]);
    assert_eq!(registry.index_of(handles[1]), Some(1));
    assert_eq!(registry.name_of(handles[2]), Some("c.py"));
    assert_eq!(registry.handle("a.py"), Some(handles[1]));
}

#[test]
fn test_validate_new_name_rejects_duplicates_and_bad_names() {
    let (registry, _) = registry_with(&["main.py"]);

    assert_eq!(
        registry.validate_new_name("main.py"),
        Err(RegistryError::DuplicateName("main.py".to_string()))
    );
    for bad in ["", "  ", "dir/a.py", "dir\\a.py"] {
        assert!(
            matches!(
                registry.validate_new_name(bad),
                Err(RegistryError::InvalidName(_))
            ),
            "{bad:?} should be rejected"
        );
    }
    assert!(registry.validate_new_name("other.py").is_ok());
}

#[test]
fn test_padded_names_are_kept_verbatim() {
    let (registry, _) = registry_with(&["a.py"]);
    assert!(registry.validate_new_name("a.py ").is_ok());
    assert!(registry.validate_new_name(" notes.txt").is_ok());
}

#[test]
fn test_remove_index_keeps_order_of_the_rest() {
    let (mut registry, handles) = registry_with(&["a", "b", "c"]);

    let (name, handle) = registry.remove_index(1).unwrap();
    assert_eq!(name, "b");
    assert_eq!(handle, handles[1]);

    let rest: Vec<(&str, FileHandle)> = registry.iter().collect();
    assert_eq!(rest, vec![("a", handles[0]), ("c", handles[2])]);
    assert!(registry.remove_index(5).is_none());
}

#[test]
fn test_replace_index_renames_in_place() {
    let (mut registry, handles) = registry_with(&["a", "b", "c"]);
    let fresh = handles[3];

    registry.replace_index(1, "renamed", fresh);

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["a", "renamed", "c"]);
    assert_eq!(registry.handle("renamed"), Some(fresh));
    assert!(registry.handle("b").is_none());
    assert_eq!(registry.index_of(handles[1]), None);
}

#[test]
fn test_unique_name_skips_taken_names() {
    let (registry, _) = registry_with(&[]);
    assert_eq!(registry.unique_name(), "file.py");

    let (registry, _) = registry_with(&["file.py", "file1.py", "file3.py"]);
    assert_eq!(registry.unique_name(), "file2.py");
}
