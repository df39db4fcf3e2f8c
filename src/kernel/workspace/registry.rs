use compact_str::{format_compact, CompactString};
use indexmap::IndexMap;
use thiserror::Error;

use crate::kernel::services::ports::FileHandle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid file name {0:?}")]
    InvalidName(String),
    #[error("a file named {0:?} already exists")]
    DuplicateName(String),
}

/// Ordered name -> handle index of the open files.
///
/// Names are unique and no handle appears twice. Insertion order is the
/// display order and drives successor selection on removal.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: IndexMap<CompactString, FileHandle>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn handle(&self, name: &str) -> Option<FileHandle> {
        self.entries.get(name).copied()
    }

    pub fn index_of(&self, handle: FileHandle) -> Option<usize> {
        self.entries.values().position(|h| *h == handle)
    }

    pub fn name_of(&self, handle: FileHandle) -> Option<&str> {
        self.index_of(handle)
            .and_then(|index| self.get_index(index))
            .map(|(name, _)| name)
    }

    pub fn get_index(&self, index: usize) -> Option<(&str, FileHandle)> {
        self.entries
            .get_index(index)
            .map(|(name, handle)| (name.as_str(), *handle))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FileHandle)> + '_ {
        self.entries
            .iter()
            .map(|(name, handle)| (name.as_str(), *handle))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(CompactString::as_str)
    }

    /// First free name of the form `file.py`, `file1.py`, `file2.py`, ...
    pub fn unique_name(&self) -> CompactString {
        let mut candidate = CompactString::const_new("file.py");
        let mut index = 0usize;
        while self.contains_name(&candidate) {
            index += 1;
            candidate = format_compact!("file{index}.py");
        }
        candidate
    }

    pub fn validate_name(name: &str) -> Result<(), RegistryError> {
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Checks that `name` could be inserted as a new entry.
    pub fn validate_new_name(&self, name: &str) -> Result<(), RegistryError> {
        Self::validate_name(name)?;
        if self.contains_name(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Appends a validated entry. Callers run `validate_new_name` first.
    pub(crate) fn insert(&mut self, name: &str, handle: FileHandle) {
        debug_assert!(self.validate_new_name(name).is_ok());
        debug_assert!(self.index_of(handle).is_none());
        self.entries.insert(CompactString::new(name), handle);
    }

    /// Removes the entry at `index`, keeping the order of the others.
    pub(crate) fn remove_index(&mut self, index: usize) -> Option<(CompactString, FileHandle)> {
        self.entries.shift_remove_index(index)
    }

    /// Replaces the entry at `index` with a new name and handle in place.
    pub(crate) fn replace_index(&mut self, index: usize, name: &str, handle: FileHandle) {
        if self.entries.shift_remove_index(index).is_none() {
            return;
        }
        self.entries
            .shift_insert(index, CompactString::new(name), handle);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/workspace/registry.rs"]
mod tests;
