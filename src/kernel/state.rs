use super::preview::PreviewState;
use super::session::SessionState;
use super::workspace::WorkspaceState;

/// The whole aggregate. One instance, owned by the `Store`; nothing
/// outside the store mutates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub workspace: WorkspaceState,
    pub session: SessionState,
    pub preview: PreviewState,
    /// Transient status-bar text (rename confirmations, validation
    /// failures). The shell decides display and timeout.
    pub status: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
