//! Application layer (Shell + line commands).

pub mod command;
pub mod shell;

pub use command::{CommandError, ShellCommand};
pub use shell::{FileEntry, Shell};
