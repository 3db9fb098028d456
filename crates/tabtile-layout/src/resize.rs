// ABOUTME: Interactive split resizing driven by pointer drags on a split handle.
// ABOUTME: Clamps and renormalizes sizes before committing them to the workspace.

use tabtile_core::ResizeSettings;

use crate::geometry::Rect;
use crate::pane::Direction;
use crate::tree;
use crate::workspace::Workspace;
use crate::PaneId;

/// Drag in progress on the handle after child `index`
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveResize {
    pub split_id: PaneId,
    pub index: usize,
    pub direction: Direction,
    /// Pointer position along the split axis at pointer-down
    pub start: f32,
    /// Sizes at pointer-down; every move is computed from these
    pub snapshot: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing(ActiveResize),
}

#[derive(Debug, Clone)]
pub struct ResizeController {
    state: ResizeState,
    settings: ResizeSettings,
}

impl ResizeController {
    pub fn new(settings: ResizeSettings) -> Self {
        Self {
            state: ResizeState::Idle,
            settings,
        }
    }

    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    /// Start dragging the handle between children `index` and `index + 1`
    pub fn pointer_down(
        &mut self,
        workspace: &Workspace,
        split_id: &PaneId,
        index: usize,
        x: f32,
        y: f32,
    ) -> bool {
        let Some(split) = tree::find_split_pane(workspace.root(), split_id) else {
            return false;
        };
        if index + 1 >= split.children.len() {
            return false;
        }
        let start = axis(split.direction, x, y);
        self.state = ResizeState::Resizing(ActiveResize {
            split_id: split_id.clone(),
            index,
            direction: split.direction,
            start,
            snapshot: split.sizes.clone(),
        });
        true
    }

    /// Recompute sizes for the pointer position and commit them.
    ///
    /// `container` is the split pane's on-screen rectangle. Returns the
    /// committed sizes.
    pub fn pointer_move(
        &mut self,
        workspace: &mut Workspace,
        x: f32,
        y: f32,
        container: Rect,
    ) -> Option<Vec<f32>> {
        let ResizeState::Resizing(active) = &self.state else {
            return None;
        };
        let extent = container.extent(active.direction);
        if extent <= 0.0 {
            return None;
        }

        let delta = (axis(active.direction, x, y) - active.start) / extent * 100.0;
        let sizes = resized_sizes(
            &active.snapshot,
            active.index,
            delta,
            self.settings.min_size,
            self.settings.max_size,
        );
        workspace
            .resize_split(&active.split_id, sizes.clone())
            .then_some(sizes)
    }

    /// End the drag wherever the pointer was released; the last committed
    /// sizes stay.
    pub fn pointer_up(&mut self) -> Option<ActiveResize> {
        match std::mem::take(&mut self.state) {
            ResizeState::Resizing(active) => Some(active),
            ResizeState::Idle => None,
        }
    }
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(ResizeSettings::default())
    }
}

fn axis(direction: Direction, x: f32, y: f32) -> f32 {
    match direction {
        Direction::Horizontal => x,
        Direction::Vertical => y,
    }
}

/// Shift `delta` percent from child `index + 1` to child `index`, clamp
/// both to `[min, max]`, then rescale everything to sum to 100.
pub fn resized_sizes(snapshot: &[f32], index: usize, delta: f32, min: f32, max: f32) -> Vec<f32> {
    let mut sizes = snapshot.to_vec();
    if index + 1 >= sizes.len() {
        return sizes;
    }
    sizes[index] = (snapshot[index] + delta).clamp(min, max);
    sizes[index + 1] = (snapshot[index + 1] - delta).clamp(min, max);

    let total: f32 = sizes.iter().sum();
    sizes.iter().map(|size| size * 100.0 / total).collect()
}
