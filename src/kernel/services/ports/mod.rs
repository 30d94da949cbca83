//! Service ports: traits + data contracts.

pub mod render;
pub mod storage;

pub use render::{DiagramRenderer, MarkdownRenderer, RenderError};
pub use storage::{SnapshotStore, StorageError};
