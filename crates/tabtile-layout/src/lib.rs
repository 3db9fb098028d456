// ABOUTME: Pane layout management for the tabbed workspace.
// ABOUTME: Tree of tab and split panes with drag, resize, and closed-tab history.

pub mod drop_zone;
pub mod geometry;
pub mod history;
mod ids;
pub mod pane;
pub mod persist;
pub mod registry;
pub mod resize;
pub mod snapshot;
pub mod tab;
pub mod tree;
pub mod workspace;

pub use drop_zone::{classify_drop_zone, DragSession, DropIntent, DropZone, DropZoneClassifier};
pub use geometry::Rect;
pub use history::ClosedTabs;
pub use ids::{PaneId, TabId};
pub use pane::{Direction, Pane, Side, SplitPane, TabPane};
pub use persist::{PersistError, Persister};
pub use registry::{ContentError, ContentRegistry};
pub use resize::{ResizeController, ResizeState};
pub use snapshot::WorkspaceSnapshot;
pub use tab::{ContentRef, Tab, TabContent, TabMeta, TabSpec};
pub use workspace::{SplitOutcome, Workspace};
