//! Backup interchange: a superset of the snapshot schema carrying enough
//! metadata to identify where and when it was produced. Import replaces
//! the whole workspace wholesale.

use chrono::Utc;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::{FileId, FolderId, IdAllocator};
use super::session::SessionState;
use super::workspace::{FileEntry, FolderEntry, WorkspaceError, WorkspaceState};

const BACKUP_VERSION: &str = "1.0";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FxHashMap<FileId, FileEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folders: Option<FxHashMap<FolderId, FolderEntry>>,
    #[serde(default)]
    pub open_files: Vec<FileId>,
    #[serde(default)]
    pub file_counter: u64,
    #[serde(default)]
    pub folder_counter: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_version: Option<String>,
}

/// Pretty JSON backup of the whole workspace.
pub fn export_backup(ws: &WorkspaceState, session: &SessionState) -> String {
    let data = BackupData {
        files: Some(ws.files().clone()),
        folders: Some(ws.folders().clone()),
        open_files: session.open_files.clone(),
        file_counter: ws.ids().file_counter(),
        folder_counter: ws.ids().folder_counter(),
        export_date: Some(Utc::now().to_rfc3339()),
        version: Some(BACKUP_VERSION.to_string()),
        editor_version: Some(concat!("mdpad v", env!("CARGO_PKG_VERSION")).to_string()),
    };
    // The schema has no non-serializable values, so this cannot fail.
    serde_json::to_string_pretty(&data).expect("backup serialization")
}

/// Suggested download name, stamped like the snapshot timestamps.
pub fn backup_filename() -> String {
    format!(
        "mdpad-backup-{}.json",
        Utc::now().format("%Y-%m-%dT%H-%M-%S")
    )
}

/// Parse and validate a backup payload. At least one of `files` /
/// `folders` must be present; anything else is rejected before any state
/// is touched.
pub fn parse_backup(json: &str) -> Result<BackupData, WorkspaceError> {
    let data: BackupData = serde_json::from_str(json)
        .map_err(|_| WorkspaceError::InvalidBackup("not a valid backup JSON document"))?;
    if data.files.is_none() && data.folders.is_none() {
        return Err(WorkspaceError::InvalidBackup("missing files or folders data"));
    }
    Ok(data)
}

impl BackupData {
    /// Build the replacement state. Same repair rules as a snapshot load:
    /// counters reconciled, stale open-file ids purged, first survivor
    /// active, splits reset.
    pub fn restore(self) -> (WorkspaceState, SessionState) {
        let ws = WorkspaceState::from_parts(
            self.files.unwrap_or_default(),
            self.folders.unwrap_or_default(),
            IdAllocator::with_counters(self.file_counter, self.folder_counter),
        );

        let mut session = SessionState::new();
        session.open_files = self
            .open_files
            .into_iter()
            .filter(|id| ws.file(id).is_some())
            .collect();
        session.reset_for_reload();
        (ws, session)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/backup.rs"]
mod tests;
