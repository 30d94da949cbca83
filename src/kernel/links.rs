//! Link resolver: rewrites `[[name]]` cross-reference tokens in rendered
//! HTML into openable links, or broken-link markers offering to create
//! the missing file.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::ids::FileId;
use super::workspace::WorkspaceState;

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("link token regex"))
}

/// Resolve a token against the workspace's file names.
///
/// A file matches when, case-insensitively, its name equals the token,
/// the token plus `.md`, or the token with `.md` stripped. Ambiguity is
/// pinned: candidates are scanned in ascending lexicographic id order, so
/// resolution is stable across runs.
pub fn resolve_name<'a>(ws: &'a WorkspaceState, token: &str) -> Option<(&'a FileId, &'a str)> {
    let wanted = token.to_lowercase();
    let mut candidates: Vec<_> = ws.files().iter().collect();
    candidates.sort_by(|(a, _), (b, _)| a.cmp(b));

    candidates.into_iter().find_map(|(id, file)| {
        let name = file.name.to_lowercase();
        let matches = name == wanted
            || name == format!("{wanted}.md")
            || name.strip_suffix(".md") == Some(wanted.as_str());
        matches.then_some((id, file.name.as_str()))
    })
}

/// Rewrite every `[[name]]` token in `html`.
///
/// Hits become anchors tagged with `data-open-file`; misses become a
/// struck-through marker plus a `data-create-file` affordance (`.md`
/// appended when absent). The shell wires the data attributes to store
/// actions.
pub fn rewrite_links(ws: &WorkspaceState, html: &str) -> String {
    token_regex()
        .replace_all(html, |caps: &Captures| {
            let token = &caps[1];
            match resolve_name(ws, token) {
                Some((id, name)) => format!(
                    "<a href=\"#\" class=\"internal-link\" data-open-file=\"{id}\" \
                     title=\"Open {name}\">📄 {token}</a>"
                ),
                None => {
                    let create = link_target_name(token);
                    format!(
                        "<span class=\"broken-link\" title=\"File not found\">📄 {token}</span> \
                         <a href=\"#\" class=\"create-link\" data-create-file=\"{create}\">[Create]</a>"
                    )
                }
            }
        })
        .into_owned()
}

/// File name to create for an unresolved token.
pub fn link_target_name(token: &str) -> String {
    if token.ends_with(".md") {
        token.to_string()
    } else {
        format!("{token}.md")
    }
}

/// Body for a file created from a broken link.
pub fn link_file_body(token: &str) -> String {
    format!("# {token}\n\nThis file was created from a link.\n")
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/links.rs"]
mod tests;
