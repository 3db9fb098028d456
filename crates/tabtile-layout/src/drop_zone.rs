// ABOUTME: Drop zone classification and drag-and-drop commit.
// ABOUTME: Maps a pointer inside a pane to move-vs-split and applies it once at drop.

use tabtile_core::DropZoneSettings;

use crate::geometry::{self, Rect};
use crate::pane::{Direction, Pane, Side};
use crate::workspace::Workspace;
use crate::{PaneId, TabId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

/// What dropping a tab into a zone does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    /// Move the tab into the pane, no split
    Move,
    Split { direction: Direction, side: Side },
}

impl DropZone {
    pub fn intent(self) -> DropIntent {
        let (direction, side) = match self {
            DropZone::Center => return DropIntent::Move,
            DropZone::Left => (Direction::Horizontal, Side::Before),
            DropZone::Right => (Direction::Horizontal, Side::After),
            DropZone::Top => (Direction::Vertical, Side::Before),
            DropZone::Bottom => (Direction::Vertical, Side::After),
        };
        DropIntent::Split { direction, side }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZoneClassifier {
    pub max_edge: f32,
    pub edge_ratio: f32,
}

impl Default for DropZoneClassifier {
    fn default() -> Self {
        DropZoneSettings::default().into()
    }
}

impl From<DropZoneSettings> for DropZoneClassifier {
    fn from(settings: DropZoneSettings) -> Self {
        Self {
            max_edge: settings.max_edge,
            edge_ratio: settings.edge_ratio,
        }
    }
}

impl DropZoneClassifier {
    /// Classify a point given relative to a pane of `width` x `height`.
    ///
    /// Left/right win over top/bottom in corners.
    pub fn classify(&self, x: f32, y: f32, width: f32, height: f32) -> DropZone {
        let edge = self
            .max_edge
            .min(width * self.edge_ratio)
            .min(height * self.edge_ratio);

        if x < edge {
            DropZone::Left
        } else if x > width - edge {
            DropZone::Right
        } else if y < edge {
            DropZone::Top
        } else if y > height - edge {
            DropZone::Bottom
        } else {
            DropZone::Center
        }
    }

    /// Find the tab pane under a point and the zone it falls in
    pub fn locate(&self, root: &Pane, bounds: Rect, x: f32, y: f32) -> Option<(PaneId, DropZone)> {
        let (id, rect) = geometry::tab_pane_at(root, bounds, x, y)?;
        let (local_x, local_y) = rect.local(x, y);
        Some((id, self.classify(local_x, local_y, rect.width, rect.height)))
    }
}

/// Classify with the default edge band
pub fn classify_drop_zone(x: f32, y: f32, width: f32, height: f32) -> DropZone {
    DropZoneClassifier::default().classify(x, y, width, height)
}

/// A tab being dragged, captured at drag start.
///
/// Nothing in the workspace changes until `drop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    tab_id: TabId,
    source_pane: PaneId,
}

impl DragSession {
    pub fn begin(tab_id: TabId, source_pane: PaneId) -> Self {
        Self {
            tab_id,
            source_pane,
        }
    }

    pub fn tab_id(&self) -> &TabId {
        &self.tab_id
    }

    pub fn source_pane(&self) -> &PaneId {
        &self.source_pane
    }

    /// Commit the drag. A `None` target cancels.
    pub fn drop(self, target: Option<(PaneId, DropZone)>, workspace: &mut Workspace) -> bool {
        let Some((target, zone)) = target else {
            tracing::debug!("Drag of tab {} dropped outside any zone", self.tab_id);
            return false;
        };
        let same_pane = target == self.source_pane;

        match zone.intent() {
            DropIntent::Move => {
                if same_pane {
                    return false;
                }
                workspace.move_tab_to_pane(&self.tab_id, &self.source_pane, &target, None)
            }
            DropIntent::Split { direction, side } => {
                if same_pane {
                    let splittable = workspace
                        .find_pane_by_id(&target)
                        .and_then(Pane::as_tabs)
                        .is_some_and(|pane| pane.tab_ids.len() > 1);
                    if !splittable {
                        return false;
                    }
                }
                workspace
                    .split_tab_into_pane(
                        &self.tab_id,
                        &self.source_pane,
                        &target,
                        direction,
                        side,
                    )
                    .is_some()
            }
        }
    }
}
