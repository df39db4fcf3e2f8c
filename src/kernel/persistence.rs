//! Two-tier workspace persistence.
//!
//! - Local: the whole snapshot is written to device storage after every
//!   mutation. Best effort; failures are logged and otherwise ignored.
//! - Remote: an explicit share uploads the snapshot, embeds the returned id in
//!   the page address and copies that address to the clipboard.
//!
//! On start-up an `id` query parameter selects the remote snapshot; without
//! one, or when the remote store does not know the id, the local snapshot is
//! used.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::kernel::services::ports::{
    ClipboardError, ClipboardPort, LocalStore, PageLocation, RemoteError, RemoteStore,
    SHARE_ID_PARAM,
};
use crate::kernel::workspace::WorkspaceSnapshot;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

pub struct PersistenceGateway {
    remote: Arc<dyn RemoteStore>,
    local: Box<dyn LocalStore>,
    location: Box<dyn PageLocation>,
    clipboard: Box<dyn ClipboardPort>,
}

impl PersistenceGateway {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        local: Box<dyn LocalStore>,
        location: Box<dyn PageLocation>,
        clipboard: Box<dyn ClipboardPort>,
    ) -> Self {
        Self {
            remote,
            local,
            location,
            clipboard,
        }
    }

    pub fn location(&self) -> &dyn PageLocation {
        self.location.as_ref()
    }

    /// Finds the snapshot to start from; `None` means "use the default".
    pub async fn restore(&self) -> Option<WorkspaceSnapshot> {
        if let Some(id) = self.location.query_param(SHARE_ID_PARAM) {
            match self.remote.fetch(id.clone()).await {
                Ok(Some(snapshot)) => {
                    tracing::info!(id = %id, files = snapshot.files.len(), "restored shared workspace");
                    return Some(snapshot);
                }
                Ok(None) => {
                    tracing::warn!(id = %id, "shared workspace not found, using local snapshot");
                }
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "shared workspace unavailable, using local snapshot");
                }
            }
        }

        self.restore_local()
    }

    pub fn restore_local(&self) -> Option<WorkspaceSnapshot> {
        let data = match self.local.read() {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "local snapshot unreadable");
                return None;
            }
        };

        match WorkspaceSnapshot::from_json(&data) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "local snapshot corrupt, ignoring it");
                None
            }
        }
    }

    /// Overwrites the local snapshot. Returns whether the write went through.
    pub fn persist_local(&mut self, snapshot: &WorkspaceSnapshot) -> bool {
        let data = match snapshot.to_json() {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize workspace");
                return false;
            }
        };

        match self.local.write(&data) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist workspace locally");
                false
            }
        }
    }

    /// Uploads `snapshot`; the returned future owns everything it needs, so
    /// it can run on another task while editing continues.
    pub fn upload(
        &self,
        snapshot: WorkspaceSnapshot,
    ) -> impl Future<Output = Result<String, RemoteError>> + Send + 'static {
        self.remote.save(snapshot)
    }

    /// Embeds `id` in the page address and copies the address.
    pub fn publish(&mut self, id: &str) -> Result<String, ShareError> {
        self.location.set_query_param(SHARE_ID_PARAM, id);
        let href = self.location.href();
        self.clipboard.set_text(&href)?;
        tracing::info!(id, url = %href, "workspace shared");
        Ok(href)
    }

    pub async fn persist_shareable(
        &mut self,
        snapshot: WorkspaceSnapshot,
    ) -> Result<String, ShareError> {
        let id = self.upload(snapshot).await?;
        self.publish(&id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/persistence.rs"]
mod tests;
