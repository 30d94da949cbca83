//! Session state: which files are open, which one is active, and the
//! split-view layout. Transient by design — only the open-file list
//! survives a reload (see `kernel::persistence`).

use super::ids::FileId;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SplitId(u64);

impl SplitId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "split_{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitView {
    pub id: SplitId,
    pub file: Option<FileId>,
    pub preview_visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub open_files: Vec<FileId>,
    pub active_file: Option<FileId>,
    pub splits: Vec<SplitView>,
    pub split_mode: bool,
    pub preview_visible: bool,
    next_split: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            open_files: Vec::new(),
            active_file: None,
            splits: Vec::new(),
            split_mode: false,
            preview_visible: true,
            next_split: 0,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn split(&self, id: SplitId) -> Option<&SplitView> {
        self.splits.iter().find(|s| s.id == id)
    }

    /// Activate a file. Appends to the tab order only when asked to and
    /// not already present, so reopening never reorders tabs.
    pub fn open_file(&mut self, id: FileId, add_to_open: bool) {
        if add_to_open && !self.open_files.contains(&id) {
            self.open_files.push(id.clone());
        }
        self.active_file = Some(id);
    }

    /// Close a tab. When the active file closes, the most recently opened
    /// remaining tab takes over; with no tabs left the session empties.
    pub fn close_file(&mut self, id: &FileId) {
        self.open_files.retain(|open| open != id);
        if self.active_file.as_ref() == Some(id) {
            self.active_file = self.open_files.last().cloned();
        }
    }

    /// Repair after files vanish from the workspace: purge them from the
    /// tab order, promote a survivor when the active file died, and clear
    /// any split that was showing one of them.
    pub fn files_deleted(&mut self, ids: &[FileId]) {
        self.open_files.retain(|open| !ids.contains(open));
        if let Some(active) = self.active_file.as_ref() {
            if ids.contains(active) {
                self.active_file = self.open_files.last().cloned();
            }
        }
        for split in &mut self.splits {
            if let Some(file) = split.file.as_ref() {
                if ids.contains(file) {
                    split.file = None;
                }
            }
        }
    }

    /// Open a split pane. With no explicit file the split shows the
    /// currently active file.
    pub fn create_split(&mut self, file: Option<FileId>) -> SplitId {
        self.next_split += 1;
        let id = SplitId::new(self.next_split);
        self.splits.push(SplitView {
            id,
            file: file.or_else(|| self.active_file.clone()),
            preview_visible: true,
        });
        self.split_mode = true;
        id
    }

    /// Show `id` in a split: appended when split mode is already on,
    /// otherwise a fresh two-pane layout (active file, then `id`).
    pub fn open_in_split(&mut self, id: FileId) -> SplitId {
        if !self.split_mode {
            self.splits.clear();
            self.create_split(None);
        }
        self.create_split(Some(id))
    }

    /// Closing the last split reverts to the normal single-pane layout.
    pub fn close_split(&mut self, id: SplitId) {
        self.splits.retain(|s| s.id != id);
        if self.splits.is_empty() {
            self.split_mode = false;
        }
    }

    pub fn retarget_first_split(&mut self, id: &FileId) -> bool {
        match self.splits.first_mut() {
            Some(split) => {
                split.file = Some(id.clone());
                true
            }
            None => false,
        }
    }

    pub fn toggle_preview(&mut self) {
        if self.split_mode {
            for split in &mut self.splits {
                split.preview_visible = !split.preview_visible;
            }
        } else {
            self.preview_visible = !self.preview_visible;
        }
    }

    /// Reset everything except the tab order, which the caller restores
    /// from a snapshot.
    pub fn reset_for_reload(&mut self) {
        self.active_file = self.open_files.first().cloned();
        self.splits.clear();
        self.split_mode = false;
        self.preview_visible = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
