//! Workspace store: the id-keyed file/folder maps and every mutation on
//! them. Owns nothing about tabs or previews; session repair happens in
//! the store reducers on top of the values returned here.

use chrono::{Local, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use super::ids::{FileId, FolderId, IdAllocator};

/// Characters rejected in file and folder names.
const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    EmptyName,
    InvalidCharacters,
    DuplicateFileName(String),
    DuplicateFolderName(String),
    InvalidBackup(&'static str),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::EmptyName => write!(f, "name cannot be empty"),
            WorkspaceError::InvalidCharacters => {
                write!(f, "name contains invalid characters")
            }
            WorkspaceError::DuplicateFileName(name) => {
                write!(f, "a file named \"{name}\" already exists in this folder")
            }
            WorkspaceError::DuplicateFolderName(name) => {
                write!(f, "a folder named \"{name}\" already exists in this location")
            }
            WorkspaceError::InvalidBackup(reason) => write!(f, "invalid backup: {reason}"),
        }
    }
}

impl std::error::Error for WorkspaceError {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub content: String,
    pub modified: bool,
    pub parent: Option<FolderId>,
    pub created: i64,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub name: String,
    pub parent: Option<FolderId>,
    pub expanded: bool,
    pub created: i64,
    pub timestamp: String,
}

/// Everything removed by a cascading folder delete.
#[derive(Debug, Default)]
pub struct DeletedSubtree {
    pub files: Vec<FileId>,
    pub folders: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkspaceState {
    files: FxHashMap<FileId, FileEntry>,
    folders: FxHashMap<FolderId, FolderEntry>,
    ids: IdAllocator,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        files: FxHashMap<FileId, FileEntry>,
        folders: FxHashMap<FolderId, FolderEntry>,
        mut ids: IdAllocator,
    ) -> Self {
        ids.reconcile(files.keys(), folders.keys());
        Self {
            files,
            folders,
            ids,
        }
    }

    pub fn files(&self) -> &FxHashMap<FileId, FileEntry> {
        &self.files
    }

    pub fn folders(&self) -> &FxHashMap<FolderId, FolderEntry> {
        &self.folders
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn file(&self, id: &FileId) -> Option<&FileEntry> {
        self.files.get(id)
    }

    pub fn folder(&self, id: &FolderId) -> Option<&FolderEntry> {
        self.folders.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Direct children of `parent` (`None` = root), each kind sorted by
    /// `(name, id)` so projections over the same state are byte-identical.
    pub fn child_folders(&self, parent: Option<&FolderId>) -> Vec<(&FolderId, &FolderEntry)> {
        let mut out: Vec<_> = self
            .folders
            .iter()
            .filter(|(_, f)| f.parent.as_ref() == parent)
            .collect();
        out.sort_by(|(aid, a), (bid, b)| a.name.cmp(&b.name).then_with(|| aid.cmp(bid)));
        out
    }

    pub fn child_files(&self, parent: Option<&FolderId>) -> Vec<(&FileId, &FileEntry)> {
        let mut out: Vec<_> = self
            .files
            .iter()
            .filter(|(_, f)| f.parent.as_ref() == parent)
            .collect();
        out.sort_by(|(aid, a), (bid, b)| a.name.cmp(&b.name).then_with(|| aid.cmp(bid)));
        out
    }

    pub fn create_folder(&mut self, name: &str, parent: Option<FolderId>) -> Option<FolderId> {
        if let Some(parent_id) = parent.as_ref() {
            if !self.folders.contains_key(parent_id) {
                warn!(parent = %parent_id, "create_folder: parent does not exist, ignoring");
                return None;
            }
        }

        let id = self.ids.next_folder();
        let now = Utc::now();
        self.folders.insert(
            id.clone(),
            FolderEntry {
                name: name.to_string(),
                parent,
                expanded: true,
                created: now.timestamp_millis(),
                timestamp: now.format("%Y-%m-%dT%H-%M-%S").to_string(),
            },
        );
        debug!(folder = %id, name, "folder created");
        Some(id)
    }

    pub fn create_file(
        &mut self,
        name: &str,
        content: &str,
        parent: Option<FolderId>,
    ) -> Option<FileId> {
        if let Some(parent_id) = parent.as_ref() {
            if !self.folders.contains_key(parent_id) {
                warn!(parent = %parent_id, "create_file: parent does not exist, ignoring");
                return None;
            }
        }

        let body = if content.trim().is_empty() {
            default_body(name)
        } else {
            content.to_string()
        };

        let id = self.ids.next_file();
        let now = Utc::now();
        self.files.insert(
            id.clone(),
            FileEntry {
                name: name.to_string(),
                content: body,
                modified: false,
                parent,
                created: now.timestamp_millis(),
                timestamp: now.format("%Y-%m-%dT%H-%M-%S").to_string(),
            },
        );
        debug!(file = %id, name, "file created");
        Some(id)
    }

    pub fn rename_file(&mut self, id: &FileId, new_name: &str) -> Result<(), WorkspaceError> {
        let Some(parent) = self.files.get(id).map(|f| f.parent.clone()) else {
            debug!(file = %id, "rename_file: unknown id, ignoring");
            return Ok(());
        };
        validate_name(new_name)?;
        let taken = self
            .files
            .iter()
            .any(|(fid, f)| fid != id && f.parent == parent && f.name == new_name);
        if taken {
            return Err(WorkspaceError::DuplicateFileName(new_name.to_string()));
        }
        if let Some(file) = self.files.get_mut(id) {
            file.name = new_name.to_string();
        }
        Ok(())
    }

    pub fn rename_folder(&mut self, id: &FolderId, new_name: &str) -> Result<(), WorkspaceError> {
        let Some(parent) = self.folders.get(id).map(|f| f.parent.clone()) else {
            debug!(folder = %id, "rename_folder: unknown id, ignoring");
            return Ok(());
        };
        validate_name(new_name)?;
        let taken = self
            .folders
            .iter()
            .any(|(fid, f)| fid != id && f.parent == parent && f.name == new_name);
        if taken {
            return Err(WorkspaceError::DuplicateFolderName(new_name.to_string()));
        }
        if let Some(folder) = self.folders.get_mut(id) {
            folder.name = new_name.to_string();
        }
        Ok(())
    }

    pub fn update_content(&mut self, id: &FileId, content: String) {
        if let Some(file) = self.files.get_mut(id) {
            file.content = content;
            file.modified = true;
        }
    }

    pub fn mark_saved(&mut self, id: &FileId) {
        if let Some(file) = self.files.get_mut(id) {
            file.modified = false;
        }
    }

    pub fn toggle_folder(&mut self, id: &FolderId) -> bool {
        match self.folders.get_mut(id) {
            Some(folder) => {
                folder.expanded = !folder.expanded;
                true
            }
            None => false,
        }
    }

    pub fn delete_file(&mut self, id: &FileId) -> Option<FileEntry> {
        let removed = self.files.remove(id);
        if removed.is_some() {
            debug!(file = %id, "file deleted");
        }
        removed
    }

    /// Cascading delete of a folder and its whole subtree.
    ///
    /// Walks an explicit worklist over a children-by-parent index built
    /// once for the call, so deep hierarchies never re-scan the full maps.
    pub fn delete_folder(&mut self, id: &FolderId) -> DeletedSubtree {
        let mut deleted = DeletedSubtree::default();
        if !self.folders.contains_key(id) {
            return deleted;
        }

        let mut folder_children: FxHashMap<&FolderId, Vec<FolderId>> = FxHashMap::default();
        let mut file_children: FxHashMap<&FolderId, Vec<FileId>> = FxHashMap::default();
        for (fid, folder) in &self.folders {
            if let Some(parent) = folder.parent.as_ref() {
                folder_children.entry(parent).or_default().push(fid.clone());
            }
        }
        for (fid, file) in &self.files {
            if let Some(parent) = file.parent.as_ref() {
                file_children.entry(parent).or_default().push(fid.clone());
            }
        }

        let mut doomed_folders = Vec::new();
        let mut worklist = vec![id.clone()];
        while let Some(folder_id) = worklist.pop() {
            if let Some(files) = file_children.get(&folder_id) {
                deleted.files.extend(files.iter().cloned());
            }
            if let Some(children) = folder_children.get(&folder_id) {
                worklist.extend(children.iter().cloned());
            }
            doomed_folders.push(folder_id);
        }

        for fid in &deleted.files {
            self.files.remove(fid);
        }
        for fid in &doomed_folders {
            self.folders.remove(fid);
        }
        deleted.folders = doomed_folders.len();
        debug!(
            folder = %id,
            files = deleted.files.len(),
            folders = deleted.folders,
            "folder subtree deleted"
        );
        deleted
    }
}

fn validate_name(name: &str) -> Result<(), WorkspaceError> {
    if name.is_empty() {
        return Err(WorkspaceError::EmptyName);
    }
    if name.chars().any(|c| INVALID_NAME_CHARS.contains(&c)) {
        return Err(WorkspaceError::InvalidCharacters);
    }
    Ok(())
}

/// Body synthesized for files created with no content: a title derived
/// from the name plus the creation instant.
fn default_body(name: &str) -> String {
    let title = name.strip_suffix(".md").unwrap_or(name);
    format!(
        "# {title}\n\n*Created: {}*\n\n",
        Local::now().format("%Y-%m-%d %H:%M")
    )
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;
