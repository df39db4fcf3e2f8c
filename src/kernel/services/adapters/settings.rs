use crate::kernel::services::ports::ShellConfig;
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = ".playshell";
const SETTINGS_FILE: &str = "setting.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&ShellConfig::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

/// Reads the settings file, falling back to defaults when it is missing or
/// malformed.
pub fn load_settings() -> ShellConfig {
    get_settings_path()
        .map(|path| load_settings_from(&path))
        .unwrap_or_default()
}

pub fn load_settings_from(path: &Path) -> ShellConfig {
    let Ok(data) = std::fs::read_to_string(path) else {
        return ShellConfig::default();
    };
    match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
            ShellConfig::default()
        }
    }
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
