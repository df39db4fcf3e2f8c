use super::message::AppMessage;
use crate::kernel::services::ports::RemoteError;
use std::future::Future;
use std::io;
use std::sync::mpsc::Sender;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// Drives `future` to completion on the calling thread.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn upload_share<F>(&self, seq: u64, upload: F)
    where
        F: Future<Output = Result<String, RemoteError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let msg = match upload.await {
                Ok(id) => AppMessage::ShareUploaded { seq, id },
                Err(e) => AppMessage::ShareFailed {
                    seq,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
