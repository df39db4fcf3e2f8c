use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::kernel::workspace::WorkspaceSnapshot;

pub type StoreFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
    #[error("remote store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("local storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Id-addressed, shareable snapshot store.
pub trait RemoteStore: Send + Sync {
    fn save(&self, snapshot: WorkspaceSnapshot) -> StoreFuture<Result<String, RemoteError>>;

    /// `Ok(None)` means the id is unknown to the store.
    fn fetch(&self, id: String) -> StoreFuture<Result<Option<WorkspaceSnapshot>, RemoteError>>;
}

/// Device-local slot holding the last serialized workspace.
pub trait LocalStore {
    fn read(&self) -> Result<Option<String>, LocalStoreError>;

    fn write(&mut self, value: &str) -> Result<(), LocalStoreError>;
}
