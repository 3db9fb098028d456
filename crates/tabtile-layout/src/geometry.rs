// ABOUTME: Pane geometry: lays the tree out inside a bounding rectangle.
// ABOUTME: Split children get slices proportional to their percentage sizes.

use std::collections::HashMap;

use crate::pane::{Direction, Pane};
use crate::PaneId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Unit rectangle (0.0 to 1.0) for normalized layouts
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Point relative to this rectangle's top-left corner
    pub fn local(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }

    /// Length along the axis a split in `direction` resizes
    pub fn extent(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Horizontal => self.width,
            Direction::Vertical => self.height,
        }
    }
}

/// Get every pane (splits included) with its rectangle inside `bounds`
pub fn pane_rects(root: &Pane, bounds: Rect) -> HashMap<PaneId, Rect> {
    let mut result = HashMap::new();
    collect_rects(root, bounds, &mut result);
    result
}

/// Tab pane under a point, with its rectangle
pub fn tab_pane_at(root: &Pane, bounds: Rect, x: f32, y: f32) -> Option<(PaneId, Rect)> {
    if !bounds.contains(x, y) {
        return None;
    }
    match root {
        Pane::Tabs(pane) => Some((pane.id.clone(), bounds)),
        Pane::Split(split) => split_child_rects(&split.sizes, split.direction, bounds)
            .into_iter()
            .zip(&split.children)
            .find(|(rect, _)| rect.contains(x, y))
            .and_then(|(rect, child)| tab_pane_at(child, rect, x, y)),
    }
}

fn collect_rects(node: &Pane, rect: Rect, out: &mut HashMap<PaneId, Rect>) {
    out.insert(node.id().clone(), rect);
    if let Pane::Split(split) = node {
        let rects = split_child_rects(&split.sizes, split.direction, rect);
        for (child, child_rect) in split.children.iter().zip(rects) {
            collect_rects(child, child_rect, out);
        }
    }
}

fn split_child_rects(sizes: &[f32], direction: Direction, rect: Rect) -> Vec<Rect> {
    let total: f32 = sizes.iter().sum();
    let total = if total > 0.0 { total } else { 100.0 };

    let mut offset = 0.0;
    sizes
        .iter()
        .map(|size| {
            let fraction = size / total;
            let child = match direction {
                Direction::Horizontal => Rect {
                    x: rect.x + rect.width * offset,
                    y: rect.y,
                    width: rect.width * fraction,
                    height: rect.height,
                },
                Direction::Vertical => Rect {
                    x: rect.x,
                    y: rect.y + rect.height * offset,
                    width: rect.width,
                    height: rect.height * fraction,
                },
            };
            offset += fraction;
            child
        })
        .collect()
}
