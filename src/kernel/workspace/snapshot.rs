use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::kernel::services::ports::FileHandle;

pub const DEFAULT_FILE_NAME: &str = "main.py";
pub const DEFAULT_FILE_CONTENT: &str = "import os";

/// Serializable projection of the registry plus the active file.
///
/// The JSON shape (`{"files": {name: text}, "current": name}`) is shared by the
/// local and the remote store and must stay backward compatible. File order is
/// the registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub files: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
}

impl WorkspaceSnapshot {
    pub fn new(files: IndexMap<String, String>, current: Option<String>) -> Self {
        Self { files, current }
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for WorkspaceSnapshot {
    /// The single-file workspace used when nothing could be restored.
    fn default() -> Self {
        let mut files = IndexMap::new();
        files.insert(
            DEFAULT_FILE_NAME.to_string(),
            DEFAULT_FILE_CONTENT.to_string(),
        );
        Self {
            files,
            current: Some(DEFAULT_FILE_NAME.to_string()),
        }
    }
}

/// The currently selected file as last known to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFile {
    pub handle: FileHandle,
    pub name: CompactString,
    pub content: String,
}
