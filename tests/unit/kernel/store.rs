use super::*;
use crate::kernel::services::adapters::MemoryStore;
use crate::kernel::session::SplitId;

fn store() -> Store {
    Store::open(PersistenceGateway::new(Box::new(MemoryStore::new())))
}

fn create(store: &mut Store, name: &str) -> FileId {
    store.dispatch(Action::CreateFile {
        name: name.to_string(),
        content: format!("# {name}"),
        parent: None,
    });
    store
        .state()
        .session
        .active_file
        .clone()
        .expect("create_file opens the new file")
}

#[test]
fn create_file_opens_it_and_requests_a_render() {
    let mut store = store();
    let result = store.dispatch(Action::CreateFile {
        name: "a.md".to_string(),
        content: "# A".to_string(),
        parent: None,
    });

    assert!(result.state_changed);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RenderMarkdown {
            surface: PreviewSurface::Primary,
            ..
        }]
    ));

    let state = store.state();
    let id = state.session.active_file.clone().unwrap();
    assert_eq!(state.session.open_files, vec![id.clone()]);
    assert_eq!(state.workspace.file(&id).unwrap().name, "a.md");
}

#[test]
fn open_and_close_follow_most_recently_opened_order() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    let b = create(&mut store, "b.md");

    store.dispatch(Action::CloseFile { id: b.clone() });
    assert_eq!(store.state().session.active_file, Some(a.clone()));

    store.dispatch(Action::CloseFile { id: a });
    assert_eq!(store.state().session.active_file, None);
    assert!(store.state().session.open_files.is_empty());
}

#[test]
fn reopening_does_not_duplicate_tabs() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    let _b = create(&mut store, "b.md");

    store.dispatch(Action::OpenFile {
        id: a.clone(),
        add_to_open: true,
    });
    assert_eq!(store.state().session.open_files.len(), 2);
    assert_eq!(store.state().session.active_file, Some(a));
}

#[test]
fn open_unknown_file_is_a_noop() {
    let mut store = store();
    let result = store.dispatch(Action::OpenFile {
        id: FileId::from("file_9"),
        add_to_open: true,
    });
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn update_content_rerenders_the_active_surface() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    let result = store.dispatch(Action::UpdateContent {
        id: a.clone(),
        content: "changed".to_string(),
    });

    assert!(result.state_changed);
    assert_eq!(result.effects.len(), 1);
    assert!(store.state().workspace.file(&a).unwrap().modified);
}

#[test]
fn update_content_renders_diagram_blocks_separately() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    let result = store.dispatch(Action::UpdateContent {
        id: a,
        content: "# T\n\n```mermaid\ngraph TD\n```\n".to_string(),
    });

    let kinds: Vec<&str> = result
        .effects
        .iter()
        .map(|e| match e {
            Effect::RenderMarkdown { .. } => "md",
            Effect::RenderDiagram { kind, .. } => kind.as_str(),
        })
        .collect();
    assert_eq!(kinds, vec!["md", "mermaid"]);
}

#[test]
fn stale_render_results_are_discarded() {
    let mut store = store();
    let a = create(&mut store, "a.md");

    let first = store.dispatch(Action::UpdateContent {
        id: a.clone(),
        content: "one".to_string(),
    });
    let Effect::RenderMarkdown { surface, seq, .. } = first.effects[0].clone() else {
        panic!("expected markdown render");
    };

    // A newer edit supersedes the in-flight render.
    store.dispatch(Action::UpdateContent {
        id: a,
        content: "two".to_string(),
    });

    let late = store.dispatch(Action::MarkdownRendered {
        surface,
        seq,
        html: "<p>one</p>".to_string(),
    });
    assert!(!late.state_changed);
    assert_eq!(store.state().preview.html(surface), None);
}

#[test]
fn rendered_html_gets_link_tokens_rewritten() {
    let mut store = store();
    let _notes = create(&mut store, "Notes.md");
    let a = create(&mut store, "a.md");

    let result = store.dispatch(Action::UpdateContent {
        id: a,
        content: "see [[Notes]]".to_string(),
    });
    let Effect::RenderMarkdown { surface, seq, .. } = result.effects[0].clone() else {
        panic!("expected markdown render");
    };

    store.dispatch(Action::MarkdownRendered {
        surface,
        seq,
        html: "<p>see [[Notes]]</p>".to_string(),
    });
    let html = store.state().preview.html(surface).unwrap();
    assert!(html.contains("data-open-file"));
    assert!(!html.contains("[["));
}

#[test]
fn delete_folder_scenario_clears_active_file() {
    let mut store = store();
    store.dispatch(Action::CreateFolder {
        name: "Docs".to_string(),
        parent: None,
    });
    let docs = store
        .state()
        .workspace
        .child_folders(None)
        .first()
        .map(|(id, _)| (*id).clone())
        .unwrap();

    store.dispatch(Action::CreateFile {
        name: "a.md".to_string(),
        content: "a".to_string(),
        parent: Some(docs.clone()),
    });
    store.dispatch(Action::CreateFile {
        name: "b.md".to_string(),
        content: "b".to_string(),
        parent: Some(docs.clone()),
    });
    assert!(store.state().session.active_file.is_some());

    store.dispatch(Action::DeleteFolder { id: docs });
    let state = store.state();
    assert!(state.workspace.is_empty());
    assert_eq!(state.session.active_file, None);
    assert!(state.session.open_files.is_empty());
}

#[test]
fn delete_file_promotes_most_recently_opened_survivor() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    let b = create(&mut store, "b.md");
    let c = create(&mut store, "c.md");
    assert_eq!(store.state().session.active_file, Some(c.clone()));

    store.dispatch(Action::DeleteFile { id: c });
    assert_eq!(store.state().session.active_file, Some(b.clone()));
    assert_eq!(store.state().session.open_files, vec![a, b]);
}

#[test]
fn rename_conflict_sets_status_and_keeps_name() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    let _b = create(&mut store, "b.md");

    let result = store.dispatch(Action::RenameFile {
        id: a.clone(),
        new_name: "b.md".to_string(),
    });
    assert!(result.state_changed);
    assert_eq!(store.state().workspace.file(&a).unwrap().name, "a.md");
    assert!(store
        .state()
        .status
        .as_deref()
        .unwrap()
        .contains("already exists"));
}

#[test]
fn rename_success_reports_status() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    store.dispatch(Action::RenameFile {
        id: a,
        new_name: "renamed.md".to_string(),
    });
    assert_eq!(
        store.state().status.as_deref(),
        Some("Renamed: a.md → renamed.md")
    );
}

#[test]
fn open_in_split_renders_both_panes() {
    let mut store = store();
    let _a = create(&mut store, "a.md");
    let b = create(&mut store, "b.md");

    let result = store.dispatch(Action::OpenInSplit { id: b });
    assert!(store.state().session.split_mode);
    assert_eq!(store.state().session.splits.len(), 2);

    let split_renders = result
        .effects
        .iter()
        .filter(|e| {
            matches!(
                e,
                Effect::RenderMarkdown {
                    surface: PreviewSurface::Split(_),
                    ..
                }
            )
        })
        .count();
    assert_eq!(split_renders, 2);
}

#[test]
fn opening_a_file_in_split_mode_retargets_the_first_split() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    let b = create(&mut store, "b.md");
    store.dispatch(Action::OpenInSplit { id: b.clone() });

    store.dispatch(Action::OpenFile {
        id: a.clone(),
        add_to_open: false,
    });
    let splits = &store.state().session.splits;
    assert_eq!(splits[0].file, Some(a));
    assert_eq!(splits[1].file, Some(b));
}

#[test]
fn closing_the_last_split_reverts_to_primary_surface() {
    let mut store = store();
    let _a = create(&mut store, "a.md");
    let b = create(&mut store, "b.md");
    store.dispatch(Action::OpenInSplit { id: b });

    let splits: Vec<SplitId> = store.state().session.splits.iter().map(|s| s.id).collect();
    for id in &splits[..splits.len() - 1] {
        store.dispatch(Action::CloseSplit { id: *id });
    }
    let result = store.dispatch(Action::CloseSplit {
        id: splits[splits.len() - 1],
    });

    assert!(!store.state().session.split_mode);
    assert!(matches!(
        result.effects.first(),
        Some(Effect::RenderMarkdown {
            surface: PreviewSurface::Primary,
            ..
        })
    ));
}

#[test]
fn create_file_from_link_appends_extension_and_opens() {
    let mut store = store();
    store.dispatch(Action::CreateFileFromLink {
        name: "Ideas".to_string(),
    });
    let state = store.state();
    let id = state.session.active_file.clone().unwrap();
    let file = state.workspace.file(&id).unwrap();
    assert_eq!(file.name, "Ideas.md");
    assert!(file.content.contains("created from a link"));
}

#[test]
fn import_backup_replaces_the_whole_workspace() {
    let mut store = store();
    let _old = create(&mut store, "old.md");

    let json = r#"{
        "files": {
            "file_1": {
                "name": "imported.md", "content": "x", "modified": false,
                "parent": null, "created": 0, "timestamp": "t"
            }
        },
        "folders": {},
        "openFiles": ["file_1"],
        "fileCounter": 1,
        "folderCounter": 0
    }"#;
    let result = store.dispatch(Action::ImportBackup {
        json: json.to_string(),
    });

    assert!(result.state_changed);
    let state = store.state();
    assert_eq!(state.workspace.files().len(), 1);
    let active = state.session.active_file.as_ref().unwrap();
    assert_eq!(active.as_str(), "file_1");
    assert_eq!(state.workspace.file(active).unwrap().name, "imported.md");
}

#[test]
fn invalid_backup_leaves_state_and_reports() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    store.dispatch(Action::ImportBackup {
        json: r#"{"version":"1.0"}"#.to_string(),
    });
    assert!(store.state().workspace.file(&a).is_some());
    assert!(store
        .state()
        .status
        .as_deref()
        .unwrap()
        .contains("invalid backup"));
}

#[test]
fn save_file_clears_the_modified_flag() {
    let mut store = store();
    let a = create(&mut store, "a.md");
    store.dispatch(Action::UpdateContent {
        id: a.clone(),
        content: "changed".to_string(),
    });
    assert!(store.state().workspace.file(&a).unwrap().modified);

    store.dispatch(Action::SaveFile { id: a.clone() });
    assert!(!store.state().workspace.file(&a).unwrap().modified);
}

#[test]
fn toggle_preview_is_not_persisted_but_changes_state() {
    let mut store = store();
    let result = store.dispatch(Action::TogglePreview);
    assert!(result.state_changed);
    assert!(!store.state().session.preview_visible);
}
