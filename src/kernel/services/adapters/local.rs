//! File-backed snapshot store: one `<key>.json` per key under a data
//! directory. Native builds point it at `ensure_workspace_dir()`.

use std::path::PathBuf;

use crate::kernel::services::ports::storage::{Result, SnapshotStore, StorageError};

#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store rooted at the per-user data directory.
    pub fn open_default() -> Result<Self> {
        let root = super::ensure_workspace_dir().map_err(StorageError::Io)?;
        Ok(Self::new(root))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; anything else is flattened so a key
        // can never escape the root.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

impl SnapshotStore for LocalStore {
    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
        }
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/local.rs"]
mod tests;
