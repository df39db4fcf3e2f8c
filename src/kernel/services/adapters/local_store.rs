use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::kernel::services::ports::{LocalStore, LocalStoreError};

/// Single JSON file on disk.
pub struct FileLocalStore {
    path: PathBuf,
}

impl FileLocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalStore for FileLocalStore {
    fn read(&self) -> Result<Option<String>, LocalStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, value: &str) -> Result<(), LocalStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // Never leave a half-written snapshot behind.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Process-local slot. Clones share the same value.
#[derive(Clone, Default)]
pub struct MemoryLocalStore {
    value: Arc<Mutex<Option<String>>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LocalStore for MemoryLocalStore {
    fn read(&self) -> Result<Option<String>, LocalStoreError> {
        Ok(self.get())
    }

    fn write(&mut self, value: &str) -> Result<(), LocalStoreError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/local_store.rs"]
mod tests;
