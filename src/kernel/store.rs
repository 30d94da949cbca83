use tracing::debug;

use super::ids::FileId;
use super::persistence::PersistenceGateway;
use super::preview::{extract_diagram_blocks, PreviewSurface};
use super::{Action, AppState, Effect};

mod preview;
mod session;
mod workspace;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }
}

/// Owns the aggregate and the write-through gateway. Every mutation runs
/// to completion — maps updated, session repaired, snapshot written —
/// before the result (with its render effects) is handed back.
pub struct Store {
    state: AppState,
    gateway: PersistenceGateway,
}

impl Store {
    /// Load the persisted snapshot (failing soft to empty) and build the
    /// store around it.
    pub fn open(gateway: PersistenceGateway) -> Self {
        let (workspace, session) = gateway.load();
        debug!(
            files = workspace.files().len(),
            folders = workspace.folders().len(),
            open = session.open_files.len(),
            "store opened"
        );
        Self {
            state: AppState {
                workspace,
                session,
                ..AppState::new()
            },
            gateway,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Render effects for the restored session; the runtime executes these
    /// right after `open` to fill the initial preview.
    pub fn bootstrap_effects(&mut self) -> Vec<Effect> {
        self.refresh_all_surfaces()
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::CreateFile { .. }
            | Action::CreateFolder { .. }
            | Action::CreateFileFromLink { .. }
            | Action::RenameFile { .. }
            | Action::RenameFolder { .. }
            | Action::DeleteFile { .. }
            | Action::DeleteFolder { .. }
            | Action::UpdateContent { .. }
            | Action::SaveFile { .. }
            | Action::ToggleFolder { .. }
            | Action::ImportBackup { .. } => self.reduce_workspace_action(action),
            Action::OpenFile { .. }
            | Action::CloseFile { .. }
            | Action::TogglePreview
            | Action::OpenInSplit { .. }
            | Action::CreateSplit { .. }
            | Action::CloseSplit { .. } => self.reduce_session_action(action),
            Action::MarkdownRendered { .. } | Action::DiagramRendered { .. } => {
                self.reduce_preview_action(action)
            }
        }
    }

    fn persist(&mut self) {
        self.gateway
            .save(&self.state.workspace, &self.state.session);
    }

    /// Activate a file the way the UI does: tab bookkeeping, then either
    /// the first split (split mode) or the primary surface re-renders.
    fn activate_file(&mut self, id: FileId, add_to_open: bool) -> Vec<Effect> {
        self.state.session.open_file(id.clone(), add_to_open);
        if self.state.session.split_mode {
            self.state.session.retarget_first_split(&id);
            match self.state.session.splits.first() {
                Some(split) => {
                    let surface = PreviewSurface::Split(split.id);
                    let file = split.file.clone();
                    self.refresh_surface(surface, file.as_ref())
                }
                None => Vec::new(),
            }
        } else {
            let active = self.state.session.active_file.clone();
            self.refresh_surface(PreviewSurface::Primary, active.as_ref())
        }
    }

    /// Issue a fresh render generation for one surface. Empty or missing
    /// content clears the surface instead; no effect is produced.
    fn refresh_surface(&mut self, surface: PreviewSurface, file: Option<&FileId>) -> Vec<Effect> {
        let source = file
            .and_then(|id| self.state.workspace.file(id))
            .map(|f| f.content.clone());
        match source {
            Some(source) if !source.trim().is_empty() => {
                let blocks = extract_diagram_blocks(&source);
                let seq = self.state.preview.issue(surface, blocks.clone());
                let mut effects = vec![Effect::RenderMarkdown {
                    surface,
                    seq,
                    source,
                }];
                for (index, block) in blocks.into_iter().enumerate() {
                    effects.push(Effect::RenderDiagram {
                        surface,
                        seq,
                        index,
                        kind: block.kind,
                        source: block.source,
                    });
                }
                effects
            }
            _ => {
                self.state.preview.clear(surface);
                Vec::new()
            }
        }
    }

    /// Re-render every live surface and forget dead ones. Layout changes
    /// (entering/leaving split mode, deletes) funnel through here.
    fn refresh_all_surfaces(&mut self) -> Vec<Effect> {
        let targets: Vec<(PreviewSurface, Option<FileId>)> = if self.state.session.split_mode {
            self.state
                .session
                .splits
                .iter()
                .map(|s| (PreviewSurface::Split(s.id), s.file.clone()))
                .collect()
        } else {
            vec![(
                PreviewSurface::Primary,
                self.state.session.active_file.clone(),
            )]
        };

        let alive: Vec<PreviewSurface> = targets.iter().map(|(s, _)| *s).collect();
        self.state.preview.retain_surfaces(|s| alive.contains(s));

        let mut effects = Vec::new();
        for (surface, file) in targets {
            effects.extend(self.refresh_surface(surface, file.as_ref()));
        }
        effects
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
