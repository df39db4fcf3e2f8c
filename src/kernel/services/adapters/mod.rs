//! Service adapters: storage, runtime and session implementations.

pub mod clipboard;
pub mod lint;
pub mod local_store;
pub mod location;
pub mod paths;
pub mod remote_store;
pub mod runtime;
pub mod session;
pub mod settings;

pub use clipboard::ClipboardService;
pub use lint::{check_source, LintOptions};
pub use local_store::{FileLocalStore, MemoryLocalStore};
pub use location::PageAddress;
pub use paths::{content_id, ensure_log_dir, get_log_dir, get_share_dir, get_workspace_file_path};
pub use remote_store::{DirRemoteStore, MemoryRemoteStore};
pub use runtime::{AppMessage, AsyncRuntime};
pub use session::MemorySession;
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
