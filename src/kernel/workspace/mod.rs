//! Open files, active file and revision.

pub mod controller;
pub mod registry;
pub mod snapshot;

pub use controller::{Revision, WorkspaceController};
pub use registry::{FileRegistry, RegistryError};
pub use snapshot::{ActiveFile, WorkspaceSnapshot, DEFAULT_FILE_CONTENT, DEFAULT_FILE_NAME};
