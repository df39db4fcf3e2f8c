use crate::kernel::services::ports::FileHandle;
use crate::kernel::workspace::WorkspaceSnapshot;

#[derive(Debug, Clone)]
pub enum Action {
    /// Opens the restored snapshot, or the default workspace for `None`.
    Initialize(Option<WorkspaceSnapshot>),
    SelectFile(FileHandle),
    EditActiveFile(String),
    AddFile(String),
    RemoveFile(FileHandle),
    RenameFile {
        handle: FileHandle,
        new_name: String,
    },
    Share,
}
