use crate::kernel::links::rewrite_links;
use crate::kernel::Action;

impl super::Store {
    pub(super) fn reduce_preview_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::MarkdownRendered { surface, seq, html } => {
                // Cross-reference tokens are resolved against the live
                // workspace at the moment the render lands.
                let html = rewrite_links(&self.state.workspace, &html);
                let state_changed = self.state.preview.accept_html(surface, seq, html);
                super::DispatchResult {
                    effects: Vec::new(),
                    state_changed,
                }
            }
            Action::DiagramRendered {
                surface,
                seq,
                index,
                result,
            } => super::DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.preview.accept_diagram(surface, seq, index, result),
            },
            _ => unreachable!("non-preview action passed to reduce_preview_action"),
        }
    }
}
