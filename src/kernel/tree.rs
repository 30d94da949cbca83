//! Tree materializer: read-only projections of the workspace hierarchy.
//!
//! Both projections are pure functions of store state — same input, same
//! bytes out. Each level lists folders before files, both sorted by
//! `(name, id)`; collapsed folders are not descended.

use super::ids::{FileId, FolderId};
use super::session::SessionState;
use super::workspace::WorkspaceState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeItem {
    Folder(FolderId),
    File(FileId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub item: TreeItem,
    pub name: String,
    pub depth: u16,
    pub expanded: bool,
    pub modified: bool,
    pub active: bool,
    pub last_sibling: bool,
}

/// Flatten the visible hierarchy into rows, depth-first.
pub fn tree_rows(ws: &WorkspaceState, session: &SessionState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_level(ws, session, None, 0, &mut rows);
    rows
}

fn push_level(
    ws: &WorkspaceState,
    session: &SessionState,
    parent: Option<&FolderId>,
    depth: u16,
    rows: &mut Vec<TreeRow>,
) {
    for (item, last_sibling) in level_items(ws, parent) {
        match item {
            TreeItem::Folder(id) => {
                let folder = &ws.folders()[&id];
                let expanded = folder.expanded;
                rows.push(TreeRow {
                    name: folder.name.clone(),
                    depth,
                    expanded,
                    modified: false,
                    active: false,
                    last_sibling,
                    item: TreeItem::Folder(id.clone()),
                });
                if expanded {
                    push_level(ws, session, Some(&id), depth + 1, rows);
                }
            }
            TreeItem::File(id) => {
                let file = &ws.files()[&id];
                rows.push(TreeRow {
                    name: file.name.clone(),
                    depth,
                    expanded: false,
                    modified: file.modified,
                    active: session.active_file.as_ref() == Some(&id),
                    last_sibling,
                    item: TreeItem::File(id),
                });
            }
        }
    }
}

/// One level's items in render order, tagged with last-sibling across the
/// combined folder+file run.
fn level_items(ws: &WorkspaceState, parent: Option<&FolderId>) -> Vec<(TreeItem, bool)> {
    let folders = ws.child_folders(parent);
    let files = ws.child_files(parent);
    let total = folders.len() + files.len();

    let mut items = Vec::with_capacity(total);
    for (id, _) in folders {
        items.push(TreeItem::Folder(id.clone()));
    }
    for (id, _) in files {
        items.push(TreeItem::File(id.clone()));
    }
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (item, i + 1 == total))
        .collect()
}

/// Render the hierarchy as a textual directory tree.
///
/// Folders carry a trailing `/`, modified files a trailing ` •`.
pub fn ascii_tree(ws: &WorkspaceState) -> String {
    let mut out = String::new();
    ascii_level(ws, None, "", &mut out);
    out
}

fn ascii_level(ws: &WorkspaceState, parent: Option<&FolderId>, prefix: &str, out: &mut String) {
    for (item, last) in level_items(ws, parent) {
        let glyph = if last { "└── " } else { "├── " };
        match item {
            TreeItem::Folder(id) => {
                let folder = &ws.folders()[&id];
                out.push_str(prefix);
                out.push_str(glyph);
                out.push_str(&folder.name);
                out.push_str("/\n");
                if folder.expanded {
                    let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
                    ascii_level(ws, Some(&id), &child_prefix, out);
                }
            }
            TreeItem::File(id) => {
                let file = &ws.files()[&id];
                out.push_str(prefix);
                out.push_str(glyph);
                out.push_str(&file.name);
                if file.modified {
                    out.push_str(" •");
                }
                out.push('\n');
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tree.rs"]
mod tests;
