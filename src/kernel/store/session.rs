use crate::kernel::preview::PreviewSurface;
use crate::kernel::Action;

impl super::Store {
    pub(super) fn reduce_session_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::OpenFile { id, add_to_open } => {
                if self.state.workspace.file(&id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                let effects = self.activate_file(id, add_to_open);
                self.persist();
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::CloseFile { id } => {
                if self.state.workspace.file(&id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                let was_active = self.state.session.active_file.as_ref() == Some(&id);
                self.state.session.close_file(&id);

                let effects = if was_active {
                    match self.state.session.active_file.clone() {
                        Some(next) => self.activate_file(next, false),
                        None => {
                            self.state.preview.clear(PreviewSurface::Primary);
                            Vec::new()
                        }
                    }
                } else {
                    Vec::new()
                };
                self.persist();
                super::DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::TogglePreview => {
                self.state.session.toggle_preview();
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Action::OpenInSplit { id } => {
                if self.state.workspace.file(&id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                self.state.session.open_in_split(id);
                super::DispatchResult {
                    effects: self.refresh_all_surfaces(),
                    state_changed: true,
                }
            }
            Action::CreateSplit { file } => {
                let file = file.filter(|id| self.state.workspace.file(id).is_some());
                self.state.session.create_split(file);
                super::DispatchResult {
                    effects: self.refresh_all_surfaces(),
                    state_changed: true,
                }
            }
            Action::CloseSplit { id } => {
                if self.state.session.split(id).is_none() {
                    return super::DispatchResult::unchanged();
                }
                self.state.session.close_split(id);
                super::DispatchResult {
                    effects: self.refresh_all_surfaces(),
                    state_changed: true,
                }
            }
            _ => unreachable!("non-session action passed to reduce_session_action"),
        }
    }
}
