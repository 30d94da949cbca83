use super::*;
use crate::kernel::services::ports::render::RenderError;

struct TagRenderer;

impl MarkdownRenderer for TagRenderer {
    fn render(&self, source: &str) -> Result<String> {
        Ok(format!("<article>{source}</article>"))
    }
}

struct BrokenRenderer;

impl MarkdownRenderer for BrokenRenderer {
    fn render(&self, _source: &str) -> Result<String> {
        Err(RenderError("engine unavailable".to_string()))
    }
}

fn sample_file() -> FileEntry {
    let mut ws = WorkspaceState::new();
    let id = ws.create_file("notes.md", "# Hello", None).unwrap();
    ws.file(&id).unwrap().clone()
}

#[test]
fn stem_strips_only_the_last_extension() {
    assert_eq!(file_stem("notes.md"), "notes");
    assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
    assert_eq!(file_stem("plain"), "plain");
}

#[test]
fn format_kinds_round_trip() {
    for kind in ["md", "txt", "html", "pdf"] {
        assert!(ExportFormat::from_kind(kind).is_some());
    }
    assert_eq!(ExportFormat::from_kind("docx"), None);
}

#[test]
fn markdown_and_text_exports_carry_raw_content() {
    let file = sample_file();
    let md = export_file(&file, ExportFormat::Markdown, &TagRenderer).unwrap();
    assert_eq!(md.filename, "notes.md");
    assert_eq!(md.mime, "text/markdown");
    assert_eq!(md.bytes, b"# Hello");

    let txt = export_file(&file, ExportFormat::Text, &TagRenderer).unwrap();
    assert_eq!(txt.filename, "notes.txt");
    assert_eq!(txt.mime, "text/plain");
    assert_eq!(txt.bytes, b"# Hello");
}

#[test]
fn html_export_wraps_rendered_body_in_a_document() {
    let file = sample_file();
    let html = export_file(&file, ExportFormat::Html, &TagRenderer).unwrap();
    assert_eq!(html.filename, "notes.html");
    let text = String::from_utf8(html.bytes).unwrap();
    assert!(text.starts_with("<!DOCTYPE html>"));
    assert!(text.contains("<title>notes.md</title>"));
    assert!(text.contains("<article># Hello</article>"));
}

#[test]
fn pdf_export_falls_back_to_printable_html() {
    let file = sample_file();
    let pdf = export_file(&file, ExportFormat::Pdf, &TagRenderer).unwrap();
    assert_eq!(pdf.filename, "notes_printable.html");
    assert_eq!(pdf.mime, "text/html");
    let text = String::from_utf8(pdf.bytes).unwrap();
    assert!(text.contains("@media print"));
    assert!(text.contains("window.print()"));
}

#[test]
fn renderer_failures_surface_for_rendered_formats_only() {
    let file = sample_file();
    assert!(export_file(&file, ExportFormat::Html, &BrokenRenderer).is_err());
    assert!(export_file(&file, ExportFormat::Markdown, &BrokenRenderer).is_ok());
}

#[test]
fn archive_entries_join_folder_paths() {
    let mut ws = WorkspaceState::new();
    let docs = ws.create_folder("Docs", None).unwrap();
    let sub = ws.create_folder("Sub", Some(docs.clone())).unwrap();
    ws.create_file("root.md", "r", None).unwrap();
    ws.create_file("a.md", "a", Some(docs.clone())).unwrap();
    ws.create_file("deep.md", "d", Some(sub)).unwrap();

    let entries = archive_entries(&ws);
    let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["root.md", "Docs/a.md", "Docs/Sub/deep.md"]);

    let subtree = folder_archive_entries(&ws, &docs);
    let names: Vec<&str> = subtree.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Docs/a.md", "Docs/Sub/deep.md"]);
}

#[test]
fn folder_archive_of_unknown_folder_is_empty() {
    let ws = WorkspaceState::new();
    assert!(folder_archive_entries(&ws, &FolderId::from("folder_9")).is_empty());
}

#[test]
fn archive_basename_flattens_punctuation() {
    assert_eq!(archive_basename("My Docs (2024)"), "My_Docs__2024_");
    assert_eq!(archive_basename("plain"), "plain");
}
