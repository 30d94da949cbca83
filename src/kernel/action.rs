use super::ids::{FileId, FolderId};
use super::preview::PreviewSurface;
use super::session::SplitId;

/// Everything that mutates the store, plus completions for work the
/// runtime did on its behalf.
#[derive(Debug, Clone)]
pub enum Action {
    CreateFile {
        name: String,
        content: String,
        parent: Option<FolderId>,
    },
    CreateFolder {
        name: String,
        parent: Option<FolderId>,
    },
    /// A `[[name]]` token with no target was clicked.
    CreateFileFromLink {
        name: String,
    },
    RenameFile {
        id: FileId,
        new_name: String,
    },
    RenameFolder {
        id: FolderId,
        new_name: String,
    },
    DeleteFile {
        id: FileId,
    },
    /// Cascades through the whole subtree. Confirmation happens in the
    /// shell before this is dispatched.
    DeleteFolder {
        id: FolderId,
    },
    UpdateContent {
        id: FileId,
        content: String,
    },
    /// Explicit save: clears the modified flag. The shell pairs this with
    /// handing the bytes to the user (download); the core only persists.
    SaveFile {
        id: FileId,
    },
    OpenFile {
        id: FileId,
        add_to_open: bool,
    },
    CloseFile {
        id: FileId,
    },
    ToggleFolder {
        id: FolderId,
    },
    TogglePreview,
    OpenInSplit {
        id: FileId,
    },
    CreateSplit {
        file: Option<FileId>,
    },
    CloseSplit {
        id: SplitId,
    },
    MarkdownRendered {
        surface: PreviewSurface,
        seq: u64,
        html: String,
    },
    DiagramRendered {
        surface: PreviewSurface,
        seq: u64,
        index: usize,
        result: Result<String, String>,
    },
    ImportBackup {
        json: String,
    },
}
