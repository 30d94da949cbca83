//! Per-file export artifacts and archive entry trees.
//!
//! The core produces bytes and name→content pairs; compression and PDF
//! engines are external. "PDF" export is therefore the printable-HTML
//! fallback: a print-styled standalone document the shell hands to the
//! browser's print path.

use super::ids::FolderId;
use super::services::ports::render::{MarkdownRenderer, Result};
use super::workspace::{FileEntry, WorkspaceState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Text,
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "md" => Some(Self::Markdown),
            "txt" => Some(Self::Text),
            "html" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown",
            Self::Text => "text/plain",
            Self::Html | Self::Pdf => "text/html",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Build the artifact for one file.
///
/// The raw formats cannot fail; Html/Pdf propagate renderer errors so the
/// caller can fall back or surface them.
pub fn export_file(
    file: &FileEntry,
    format: ExportFormat,
    renderer: &dyn MarkdownRenderer,
) -> Result<ExportArtifact> {
    let stem = file_stem(&file.name);
    let artifact = match format {
        ExportFormat::Markdown => ExportArtifact {
            filename: format!("{stem}.md"),
            mime: format.mime(),
            bytes: file.content.clone().into_bytes(),
        },
        ExportFormat::Text => ExportArtifact {
            filename: format!("{stem}.txt"),
            mime: format.mime(),
            bytes: file.content.clone().into_bytes(),
        },
        ExportFormat::Html => {
            let body = renderer.render(&file.content)?;
            ExportArtifact {
                filename: format!("{stem}.html"),
                mime: format.mime(),
                bytes: html_document(&file.name, &body).into_bytes(),
            }
        }
        ExportFormat::Pdf => {
            let body = renderer.render(&file.content)?;
            ExportArtifact {
                filename: format!("{stem}_printable.html"),
                mime: format.mime(),
                bytes: printable_document(&file.name, &body).into_bytes(),
            }
        }
    };
    Ok(artifact)
}

/// Name minus its last extension (`notes.md` → `notes`).
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Sanitized archive basename: anything non-alphanumeric becomes `_`.
pub fn archive_basename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Whole-workspace entry tree for the external compressor: root files at
/// the top level, folders as `/`-joined paths. Ordering follows the
/// materializer's sort, so it is deterministic.
pub fn archive_entries(ws: &WorkspaceState) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for (_, file) in ws.child_files(None) {
        entries.push((file.name.clone(), file.content.clone()));
    }
    for (id, folder) in ws.child_folders(None) {
        push_folder_entries(ws, id, &folder.name, &mut entries);
    }
    entries
}

/// Entry tree for one folder's subtree, rooted at the folder's name.
pub fn folder_archive_entries(ws: &WorkspaceState, folder: &FolderId) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    if let Some(entry) = ws.folder(folder) {
        push_folder_entries(ws, folder, &entry.name, &mut entries);
    }
    entries
}

fn push_folder_entries(
    ws: &WorkspaceState,
    folder: &FolderId,
    path: &str,
    entries: &mut Vec<(String, String)>,
) {
    for (_, file) in ws.child_files(Some(folder)) {
        entries.push((format!("{path}/{}", file.name), file.content.clone()));
    }
    for (id, child) in ws.child_folders(Some(folder)) {
        let child_path = format!("{path}/{}", child.name);
        push_folder_entries(ws, id, &child_path, entries);
    }
}

fn html_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }}
code {{ background: #f4f4f4; padding: 2px 4px; border-radius: 3px; }}
pre {{ background: #f4f4f4; padding: 12px; border-radius: 4px; overflow-x: auto; }}
blockquote {{ border-left: 4px solid #ddd; margin: 0; padding-left: 12px; color: #666; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ddd; padding: 8px 12px; text-align: left; }}
th {{ background: #f4f4f4; }}
</style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

fn printable_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} - Print Version</title>
<style>
@media print {{
    body {{ margin: 0; }}
    .no-print {{ display: none; }}
}}
body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
    line-height: 1.6;
    color: #333;
}}
h1 {{ font-size: 2em; border-bottom: 1px solid #eee; padding-bottom: 8px; }}
code {{ background: #f6f8fa; padding: 2px 4px; border-radius: 3px; }}
pre {{ background: #f6f8fa; padding: 16px; border-radius: 6px; overflow-x: auto; }}
pre code {{ background: none; padding: 0; }}
blockquote {{ border-left: 4px solid #dfe2e5; margin: 0; padding-left: 16px; color: #6a737d; }}
table {{ border-collapse: collapse; width: 100%; margin: 16px 0; }}
th, td {{ border: 1px solid #dfe2e5; padding: 8px 12px; text-align: left; }}
th {{ background: #f6f8fa; font-weight: 600; }}
.print-instructions {{
    background: #fff3cd;
    border: 1px solid #ffeaa7;
    border-radius: 4px;
    padding: 15px;
    margin-bottom: 20px;
    text-align: center;
}}
</style>
</head>
<body>
<div class="print-instructions no-print">Use your browser's Print dialog (Ctrl/Cmd+P) and choose "Save as PDF".</div>
{body}
<script>window.addEventListener('load', function () {{ window.print(); }});</script>
</body>
</html>"#
    )
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/export.rs"]
mod tests;
