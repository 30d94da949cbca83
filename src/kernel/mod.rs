//! Headless application core (state/action/effect).

pub mod action;
pub mod backup;
pub mod diagram;
pub mod effect;
pub mod export;
pub mod ids;
pub mod links;
pub mod persistence;
pub mod preview;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
pub mod tree;
pub mod workspace;

pub use action::Action;
pub use effect::Effect;
pub use ids::{FileId, FolderId, IdAllocator};
pub use persistence::{PersistenceGateway, Snapshot, SNAPSHOT_KEY};
pub use preview::{DiagramSlot, PreviewState, PreviewSurface};
pub use session::{SessionState, SplitId, SplitView};
pub use state::AppState;
pub use store::{DispatchResult, Store};
pub use tree::{ascii_tree, tree_rows, TreeItem, TreeRow};
pub use workspace::{FileEntry, FolderEntry, WorkspaceError, WorkspaceState};
