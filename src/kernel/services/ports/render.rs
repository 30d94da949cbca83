//! Render ports: markdown and diagram engines live outside the core.
//!
//! The core hands raw source out through effects and takes finished HTML
//! (or an error message, for the inline placeholder) back through
//! completion actions.

use std::fmt;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug)]
pub struct RenderError(pub String);

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render failed: {}", self.0)
    }
}

impl std::error::Error for RenderError {}

/// Markdown source in, HTML fragment out.
pub trait MarkdownRenderer {
    fn render(&self, source: &str) -> Result<String>;
}

/// One diagram engine per fence language (`mermaid`, ...).
pub trait DiagramRenderer {
    fn kind(&self) -> &'static str;
    fn render(&self, source: &str) -> Result<String>;
}
