//! Shareable snapshot stores.
//!
//! `DirRemoteStore` keeps one `<id>.json` per shared snapshot in a directory,
//! standing in for the hosted store; `MemoryRemoteStore` does the same in
//! memory.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;

use super::paths::content_id;
use crate::kernel::services::ports::{RemoteError, RemoteStore, StoreFuture};
use crate::kernel::workspace::WorkspaceSnapshot;

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

pub struct DirRemoteStore {
    root: PathBuf,
}

impl DirRemoteStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl RemoteStore for DirRemoteStore {
    fn save(&self, snapshot: WorkspaceSnapshot) -> StoreFuture<Result<String, RemoteError>> {
        let root = self.root.clone();
        Box::pin(async move {
            let data = snapshot.to_json()?;
            let id = content_id(&data);
            tokio::fs::create_dir_all(&root).await?;
            tokio::fs::write(root.join(format!("{id}.json")), data).await?;
            Ok::<_, RemoteError>(id)
        })
    }

    fn fetch(&self, id: String) -> StoreFuture<Result<Option<WorkspaceSnapshot>, RemoteError>> {
        let root = self.root.clone();
        Box::pin(async move {
            if !is_valid_id(&id) {
                return Ok(None);
            }
            let data = match tokio::fs::read_to_string(root.join(format!("{id}.json"))).await {
                Ok(data) => data,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(RemoteError::Io(err)),
            };
            Ok::<_, RemoteError>(Some(WorkspaceSnapshot::from_json(&data)?))
        })
    }
}

/// In-memory store. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryRemoteStore {
    snapshots: Arc<Mutex<FxHashMap<String, WorkspaceSnapshot>>>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: impl Into<String>, snapshot: WorkspaceSnapshot) {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), snapshot);
    }

    pub fn get(&self, id: &str) -> Option<WorkspaceSnapshot> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn save(&self, snapshot: WorkspaceSnapshot) -> StoreFuture<Result<String, RemoteError>> {
        let store = self.clone();
        Box::pin(async move {
            let id = content_id(&snapshot.to_json()?);
            store.insert(id.clone(), snapshot);
            Ok::<_, RemoteError>(id)
        })
    }

    fn fetch(&self, id: String) -> StoreFuture<Result<Option<WorkspaceSnapshot>, RemoteError>> {
        let store = self.clone();
        Box::pin(async move { Ok::<_, RemoteError>(store.get(&id)) })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/remote_store.rs"]
mod tests;
