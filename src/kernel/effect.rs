use super::preview::PreviewSurface;

/// Fire-and-forget work for the runtime: render requests against the
/// external engines. Results come back as completion actions carrying the
/// same seq; the preview state drops anything stale.
///
/// Persistence is deliberately not an effect — snapshots are written
/// inside dispatch, before the result is returned.
#[derive(Debug, Clone)]
pub enum Effect {
    RenderMarkdown {
        surface: PreviewSurface,
        seq: u64,
        source: String,
    },
    RenderDiagram {
        surface: PreviewSurface,
        seq: u64,
        index: usize,
        kind: String,
        source: String,
    },
}
