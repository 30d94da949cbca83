//! Persistence gateway: the durable snapshot and its round-trip through
//! the storage port.
//!
//! Write-through: the store serializes after every mutating dispatch,
//! before control returns. Failures never take the session down — a
//! failed write leaves memory authoritative, a failed read yields an
//! empty workspace.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ids::{FileId, FolderId, IdAllocator};
use super::services::ports::SnapshotStore;
use super::session::SessionState;
use super::workspace::{FileEntry, FolderEntry, WorkspaceState};

/// Fixed key the whole snapshot lives under.
pub const SNAPSHOT_KEY: &str = "mdpad.workspace";

/// The durable set. Deliberately excludes the active file and splits:
/// split layout always resets on reload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub files: FxHashMap<FileId, FileEntry>,
    #[serde(default)]
    pub folders: FxHashMap<FolderId, FolderEntry>,
    #[serde(default)]
    pub open_files: Vec<FileId>,
    #[serde(default)]
    pub file_counter: u64,
    #[serde(default)]
    pub folder_counter: u64,
}

impl Snapshot {
    pub fn capture(ws: &WorkspaceState, session: &SessionState) -> Self {
        Self {
            files: ws.files().clone(),
            folders: ws.folders().clone(),
            open_files: session.open_files.clone(),
            file_counter: ws.ids().file_counter(),
            folder_counter: ws.ids().folder_counter(),
        }
    }

    /// Rebuild live state. Stale open-file ids are purged; the first
    /// surviving entry becomes the active file.
    pub fn restore(self) -> (WorkspaceState, SessionState) {
        let ws = WorkspaceState::from_parts(
            self.files,
            self.folders,
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

pub struct PersistenceGateway {
    store: Box<dyn SnapshotStore>,
}

impl PersistenceGateway {
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Serialize and write the snapshot. A failure is logged and
    /// swallowed: in-memory state stays authoritative for the session.
    pub fn save(&mut self, ws: &WorkspaceState, session: &SessionState) {
        let snapshot = Snapshot::capture(ws, session);
        let payload = match serde_json::to_string(&snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "snapshot serialization failed, change not persisted");
                return;
            }
        };
        match self.store.put(SNAPSHOT_KEY, &payload) {
            Ok(()) => debug!(bytes = payload.len(), "snapshot persisted"),
            Err(e) => warn!(error = %e, "snapshot write failed, change not persisted"),
        }
    }

    /// Load the snapshot, failing soft to an empty workspace.
    pub fn load(&self) -> (WorkspaceState, SessionState) {
        let raw = match self.store.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (WorkspaceState::new(), SessionState::new()),
            Err(e) => {
                warn!(error = %e, "snapshot read failed, starting empty");
                return (WorkspaceState::new(), SessionState::new());
            }
        };
        match serde_json::from_str::<Snapshot>(&raw) {
            Ok(snapshot) => snapshot.restore(),
            Err(e) => {
                warn!(error = %e, "snapshot parse failed, starting empty");
                (WorkspaceState::new(), SessionState::new())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/persistence.rs"]
mod tests;
