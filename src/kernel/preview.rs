//! Preview surfaces and render sequencing.
//!
//! Rendering is asynchronous and fire-and-forget; what keeps a surface
//! consistent is the sequence number. Every render request for a surface
//! carries the latest issued seq, and a completion is applied only when
//! its seq is still the latest — stale results are discarded, so a slow
//! render can never overwrite a newer one.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::session::SplitId;

/// Fence languages handed to the diagram renderer rather than the
/// markdown renderer.
pub const DIAGRAM_FENCES: &[&str] = &["mermaid"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreviewSurface {
    Primary,
    Split(SplitId),
}

/// A fenced diagram block lifted out of markdown source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramBlock {
    pub kind: String,
    pub source: String,
}

/// Per-block render outcome; errors hold the message shown inline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagramSlot {
    pub kind: String,
    pub source: String,
    pub result: Option<Result<String, String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct SurfaceRender {
    issued: u64,
    applied: u64,
    html: Option<String>,
    diagrams: Vec<DiagramSlot>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewState {
    surfaces: FxHashMap<PreviewSurface, SurfaceRender>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new render generation for a surface; returns the seq every
    /// request of this generation must carry.
    pub fn issue(&mut self, surface: PreviewSurface, blocks: Vec<DiagramBlock>) -> u64 {
        let render = self.surfaces.entry(surface).or_default();
        render.issued += 1;
        render.diagrams = blocks
            .into_iter()
            .map(|b| DiagramSlot {
                kind: b.kind,
                source: b.source,
                result: None,
            })
            .collect();
        render.issued
    }

    /// Apply a markdown completion; stale seqs are dropped.
    pub fn accept_html(&mut self, surface: PreviewSurface, seq: u64, html: String) -> bool {
        let Some(render) = self.surfaces.get_mut(&surface) else {
            return false;
        };
        if seq != render.issued {
            debug!(?surface, seq, issued = render.issued, "stale preview render discarded");
            return false;
        }
        render.applied = seq;
        render.html = Some(html);
        true
    }

    /// Apply a diagram completion; same staleness rule as `accept_html`.
    pub fn accept_diagram(
        &mut self,
        surface: PreviewSurface,
        seq: u64,
        index: usize,
        result: Result<String, String>,
    ) -> bool {
        let Some(render) = self.surfaces.get_mut(&surface) else {
            return false;
        };
        if seq != render.issued {
            debug!(?surface, seq, issued = render.issued, "stale diagram render discarded");
            return false;
        }
        match render.diagrams.get_mut(index) {
            Some(slot) => {
                slot.result = Some(result);
                true
            }
            None => false,
        }
    }

    /// Empty content: drop the surface's html outright (no render issued).
    pub fn clear(&mut self, surface: PreviewSurface) {
        if let Some(render) = self.surfaces.get_mut(&surface) {
            render.issued += 1;
            render.html = None;
            render.diagrams.clear();
        }
    }

    /// Forget surfaces that no longer exist (closed splits).
    pub fn retain_surfaces(&mut self, alive: impl Fn(&PreviewSurface) -> bool) {
        self.surfaces.retain(|surface, _| alive(surface));
    }

    pub fn html(&self, surface: PreviewSurface) -> Option<&str> {
        self.surfaces.get(&surface)?.html.as_deref()
    }

    pub fn diagrams(&self, surface: PreviewSurface) -> &[DiagramSlot] {
        self.surfaces
            .get(&surface)
            .map(|r| r.diagrams.as_slice())
            .unwrap_or(&[])
    }

    pub fn latest_seq(&self, surface: PreviewSurface) -> u64 {
        self.surfaces.get(&surface).map(|r| r.issued).unwrap_or(0)
    }
}

/// Lift top-level fenced blocks whose info string names a diagram fence.
pub fn extract_diagram_blocks(source: &str) -> Vec<DiagramBlock> {
    let mut blocks = Vec::new();
    let mut in_fence = false;
    let mut is_diagram = false;
    let mut lang = String::new();
    let mut body: Vec<&str> = Vec::new();

    for line in source.lines() {
        let trimmed = line.trim_start();
        if !in_fence {
            if let Some(info) = trimmed.strip_prefix("```") {
                in_fence = true;
                lang = info.trim().split_whitespace().next().unwrap_or("").to_string();
                is_diagram = DIAGRAM_FENCES.contains(&lang.as_str());
                body.clear();
            }
        } else if trimmed.starts_with("```") {
            if is_diagram {
                blocks.push(DiagramBlock {
                    kind: lang.clone(),
                    source: body.join("\n"),
                });
            }
            in_fence = false;
        } else if is_diagram {
            body.push(line);
        }
    }

    blocks
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/preview.rs"]
mod tests;
