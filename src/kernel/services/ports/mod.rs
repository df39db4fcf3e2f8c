//! Service ports: traits + data contracts.

pub mod config;
pub mod location;
pub mod session;
pub mod storage;

pub use config::ShellConfig;
pub use location::{ClipboardError, ClipboardPort, PageLocation, SHARE_ID_PARAM};
pub use session::{AnalysisSession, EngineError, FileHandle, SessionError};
pub use storage::{LocalStore, LocalStoreError, RemoteError, RemoteStore, StoreFuture};
