use tracing::debug;

use crate::kernel::backup::parse_backup;
use crate::kernel::links::{link_file_body, link_target_name};
use crate::kernel::Action;

impl super::Store {
    pub(super) fn reduce_workspace_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::CreateFile {
                name,
                content,
                parent,
            } => {
                let Some(id) = self.state.workspace.create_file(&name, &content, parent) else {
                    return super::DispatchResult::unchanged();
                };
                let effects = self.activate_file(id, true);
                self.persist();
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::CreateFolder { name, parent } => {
                if self.state.workspace.create_folder(&name, parent).is_none() {
                    return super::DispatchResult::unchanged();
                }
                self.persist();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::CreateFileFromLink { name } => {
                let target = link_target_name(&name);
                let body = link_file_body(&name);
                let Some(id) = self.state.workspace.create_file(&target, &body, None) else {
                    return super::DispatchResult::unchanged();
                };
                debug!(file = %id, name = target, "file created from broken link");
                let effects = self.activate_file(id, true);
                self.persist();
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::RenameFile { id, new_name } => {
                let Some(old_name) = self.state.workspace.file(&id).map(|f| f.name.clone()) else {
                    return super::DispatchResult::unchanged();
                };
                match self.state.workspace.rename_file(&id, &new_name) {
                    Ok(()) => {
                        self.state.status = Some(format!("Renamed: {old_name} → {new_name}"));
                        self.persist();
                    }
                    Err(e) => {
                        self.state.status = Some(e.to_string());
                    }
                }
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::RenameFolder { id, new_name } => {
                let Some(old_name) = self.state.workspace.folder(&id).map(|f| f.name.clone())
                else {
                    return super::DispatchResult::unchanged();
                };
                match self.state.workspace.rename_folder(&id, &new_name) {
                    Ok(()) => {
                        self.state.status = Some(format!("Renamed: {old_name} → {new_name}"));
                        self.persist();
                    }
                    Err(e) => {
                        self.state.status = Some(e.to_string());
                    }
                }
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::DeleteFile { id } => {
                if self.state.workspace.delete_file(&id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                self.state.session.files_deleted(std::slice::from_ref(&id));
                let effects = self.refresh_all_surfaces();
                self.persist();
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::DeleteFolder { id } => {
                if self.state.workspace.folder(&id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                let deleted = self.state.workspace.delete_folder(&id);
                self.state.session.files_deleted(&deleted.files);
                let effects = self.refresh_all_surfaces();
                self.persist();
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::UpdateContent { id, content } => {
                if self.state.workspace.file(&id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                self.state.workspace.update_content(&id, content);

                let mut effects = Vec::new();
                if self.state.session.split_mode {
                    let showing: Vec<_> = self
                        .state
                        .session
                        .splits
                        .iter()
                        .filter(|s| s.file.as_ref() == Some(&id))
                        .map(|s| s.id)
                        .collect();
                    for split in showing {
                        effects.extend(
                            self.refresh_surface(super::PreviewSurface::Split(split), Some(&id)),
                        );
                    }
                } else if self.state.session.active_file.as_ref() == Some(&id) {
                    effects.extend(
                        self.refresh_surface(super::PreviewSurface::Primary, Some(&id)),
                    );
                }
                self.persist();
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::SaveFile { id } => {
                if self.state.workspace.file(&id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                self.state.workspace.mark_saved(&id);
                self.persist();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::ToggleFolder { id } => {
                if !self.state.workspace.toggle_folder(&id) {
                    return super::DispatchResult::unchanged();
                }
                self.persist();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::ImportBackup { json } => match parse_backup(&json) {
                Ok(data) => {
                    let (workspace, session) = data.restore();
                    self.state.workspace = workspace;
                    self.state.session = session;
                    self.state.status = Some("Backup imported".to_string());
                    let effects = self.refresh_all_surfaces();
                    self.persist();
                    super::DispatchResult {
                        effects,
                        state_changed: true,
                    }
                }
                Err(e) => {
                    self.state.status = Some(e.to_string());
                    super::DispatchResult {
                        effects: Vec::new(),
                        state_changed: true,
                    }
                }
            },
            _ => unreachable!("non-workspace action passed to reduce_workspace_action"),
        }
    }
}
