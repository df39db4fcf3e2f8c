//! Application data locations.
//!
//! - macOS: ~/Library/Application Support/playshell
//! - Linux: $XDG_DATA_HOME/playshell or ~/.local/share/playshell
//! - Windows: %APPDATA%\playshell

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

pub const APP_NAME: &str = "playshell";
const SHARE_DIR: &str = "shares";
const LOG_DIR: &str = "logs";
const WORKSPACE_FILE: &str = "workspace.json";

fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs_path_macos()
    }

    #[cfg(target_os = "linux")]
    {
        dirs_path_linux()
    }

    #[cfg(target_os = "windows")]
    {
        dirs_path_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(target_os = "macos")]
fn dirs_path_macos() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_NAME)
    })
}

#[cfg(target_os = "linux")]
fn dirs_path_linux() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg).join(APP_NAME))
    } else {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
    }
}

#[cfg(target_os = "windows")]
fn dirs_path_windows() -> Option<PathBuf> {
    std::env::var("APPDATA")
        .ok()
        .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// 16 hex digit digest, used as the id of a shared snapshot.
pub fn content_id(data: &str) -> String {
    let mut hasher = DefaultHasher::new();
    data.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

pub fn get_share_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(SHARE_DIR))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn get_workspace_file_path() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(WORKSPACE_FILE))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {what} directory"),
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
