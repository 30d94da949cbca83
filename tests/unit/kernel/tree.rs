use super::*;

fn fixture() -> (WorkspaceState, SessionState) {
    let mut ws = WorkspaceState::new();
    let docs = ws.create_folder("Docs", None).unwrap();
    ws.create_file("guide.md", "x", Some(docs.clone())).unwrap();
    ws.create_file("api.md", "x", Some(docs)).unwrap();
    ws.create_file("readme.md", "x", None).unwrap();
    (ws, SessionState::new())
}

#[test]
fn rows_list_folders_before_files_depth_first() {
    let (ws, session) = fixture();
    let rows = tree_rows(&ws, &session);
    let names: Vec<(&str, u16)> = rows.iter().map(|r| (r.name.as_str(), r.depth)).collect();
    assert_eq!(
        names,
        vec![
            ("Docs", 0),
            ("api.md", 1),
            ("guide.md", 1),
            ("readme.md", 0),
        ]
    );
}

#[test]
fn last_sibling_spans_the_combined_run() {
    let (ws, session) = fixture();
    let rows = tree_rows(&ws, &session);
    // Root level: Docs then readme.md — only readme.md is last.
    assert!(!rows[0].last_sibling);
    assert!(rows[3].last_sibling);
    // Inside Docs: api.md, then guide.md last.
    assert!(!rows[1].last_sibling);
    assert!(rows[2].last_sibling);
}

#[test]
fn collapsed_folders_are_not_descended() {
    let (mut ws, session) = fixture();
    let docs = ws.child_folders(None)[0].0.clone();
    ws.toggle_folder(&docs);
    let rows = tree_rows(&ws, &session);
    assert_eq!(rows.len(), 2);
    assert!(!rows[0].expanded);
}

#[test]
fn rows_flag_active_and_modified_files() {
    let (mut ws, mut session) = fixture();
    let readme = ws
        .child_files(None)
        .first()
        .map(|(id, _)| (*id).clone())
        .unwrap();
    ws.update_content(&readme, "changed".to_string());
    session.open_file(readme.clone(), true);

    let rows = tree_rows(&ws, &session);
    let row = rows
        .iter()
        .find(|r| r.item == TreeItem::File(readme.clone()))
        .unwrap();
    assert!(row.modified);
    assert!(row.active);
}

#[test]
fn ascii_tree_renders_branch_glyphs() {
    let (mut ws, _session) = fixture();
    let readme = ws
        .child_files(None)
        .first()
        .map(|(id, _)| (*id).clone())
        .unwrap();
    ws.update_content(&readme, "changed".to_string());

    assert_eq!(
        ascii_tree(&ws),
        "├── Docs/\n\
         │   ├── api.md\n\
         │   └── guide.md\n\
         └── readme.md •\n"
    );
}

#[test]
fn ascii_tree_uses_blank_prefix_under_last_folder() {
    let mut ws = WorkspaceState::new();
    let docs = ws.create_folder("Docs", None).unwrap();
    ws.create_file("a.md", "x", Some(docs)).unwrap();

    assert_eq!(ascii_tree(&ws), "└── Docs/\n    └── a.md\n");
}

#[test]
fn materialization_is_deterministic() {
    let (ws, session) = fixture();
    assert_eq!(ascii_tree(&ws), ascii_tree(&ws));
    assert_eq!(tree_rows(&ws, &session), tree_rows(&ws, &session));
}
