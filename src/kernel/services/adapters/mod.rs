//! Service adapters: OS/runtime specific implementations (IO).
//!
//! Per-platform data dir, VS Code style:
//! - macOS: ~/Library/Application Support/mdpad
//! - Linux: $XDG_DATA_HOME/mdpad or ~/.local/share/mdpad
//! - Windows: %APPDATA%\mdpad

use std::path::PathBuf;

pub mod local;
pub mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

const APP_NAME: &str = "mdpad";
const LOG_DIR: &str = "logs";
const DATA_DIR: &str = "workspace";

fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_NAME)
        })
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            Some(PathBuf::from(xdg).join(APP_NAME))
        } else {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
        }
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn get_workspace_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(DATA_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "Cannot determine log directory")
}

pub fn ensure_workspace_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_workspace_dir(), "Cannot determine workspace directory")
}

fn ensure_dir(dir: Option<PathBuf>, missing: &'static str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, missing))?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
