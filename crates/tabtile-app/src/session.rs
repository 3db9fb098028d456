// ABOUTME: UI command replay: applies scripted pointer/keyboard actions to a workspace.
// ABOUTME: Mirrors what the window's event handlers do, one command per event turn.

use serde::Deserialize;
use serde_json::Value;

use tabtile_core::Config;
use tabtile_layout::geometry::{self, Rect};
use tabtile_layout::{
    ContentRegistry, Direction, DragSession, DropZoneClassifier, PaneId, ResizeController, Side,
    TabId, Workspace,
};

/// Logical window size used for pointer coordinates
pub const WINDOW_WIDTH: f32 = 1200.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

fn default_forward() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Open {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        data: Value,
        title: Option<String>,
        #[serde(default)]
        background: bool,
        #[serde(default)]
        pinned: bool,
    },
    Close {
        tab: TabId,
    },
    CloseOthers {
        tab: TabId,
    },
    CloseRight {
        tab: TabId,
    },
    CloseActive {
        pane: PaneId,
    },
    Reopen,
    Activate {
        tab: TabId,
    },
    Cycle {
        pane: PaneId,
        #[serde(default = "default_forward")]
        forward: bool,
    },
    Rename {
        tab: TabId,
        title: String,
    },
    Reorder {
        pane: PaneId,
        from: usize,
        to: usize,
    },
    MoveToPane {
        tab: TabId,
        from: PaneId,
        to: PaneId,
        index: Option<usize>,
    },
    Split {
        pane: PaneId,
        tab: TabId,
        direction: Direction,
        side: Side,
    },
    Resize {
        split: PaneId,
        sizes: Vec<f32>,
    },
    Collapse {
        split: PaneId,
        child: PaneId,
    },
    /// Drag a tab and release it at a window position
    Drag {
        tab: TabId,
        from: PaneId,
        x: f32,
        y: f32,
    },
    /// Drag the handle after child `handle` of a split between two points
    DragHandle {
        split: PaneId,
        handle: usize,
        start: [f32; 2],
        end: [f32; 2],
    },
}

pub struct Session {
    workspace: Workspace,
    classifier: DropZoneClassifier,
    resize: ResizeController,
    bounds: Rect,
}

impl Session {
    pub fn new(workspace: Workspace, config: &Config) -> Self {
        Self {
            workspace,
            classifier: config.drop_zone.into(),
            resize: ResizeController::new(config.resize),
            bounds: Rect::new(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Apply one command; returns whether the workspace changed
    pub fn apply(&mut self, command: Command, registry: &ContentRegistry) -> bool {
        let revision = self.workspace.revision();
        let ws = &mut self.workspace;
        match command {
            Command::Open {
                kind,
                data,
                title,
                background,
                pinned,
            } => {
                let mut spec = match registry.tab_spec(&kind, data) {
                    Ok(spec) => spec,
                    Err(e) => {
                        tracing::warn!("Cannot open tab: {}", e);
                        return false;
                    }
                };
                if let Some(title) = title {
                    spec = spec.title(title);
                }
                if pinned {
                    spec = spec.pinned();
                }
                let id = if background {
                    ws.add_tab_in_background(spec)
                } else {
                    ws.add_tab(spec)
                };
                tracing::info!("Opened {} tab {}", kind, id);
            }
            Command::Close { tab } => {
                ws.close_tab(&tab);
            }
            Command::CloseOthers { tab } => {
                ws.close_other_tabs(&tab);
            }
            Command::CloseRight { tab } => {
                ws.close_tabs_to_right(&tab);
            }
            Command::CloseActive { pane } => {
                ws.close_active_tab(&pane);
            }
            Command::Reopen => {
                ws.reopen_last_closed_tab();
            }
            Command::Activate { tab } => {
                ws.activate_tab(&tab);
            }
            Command::Cycle { pane, forward } => {
                ws.cycle_active_tab(&pane, forward);
            }
            Command::Rename { tab, title } => {
                ws.update_tab_title(&tab, title);
            }
            Command::Reorder { pane, from, to } => {
                ws.move_tab(from, to, &pane);
            }
            Command::MoveToPane {
                tab,
                from,
                to,
                index,
            } => {
                ws.move_tab_to_pane(&tab, &from, &to, index);
            }
            Command::Split {
                pane,
                tab,
                direction,
                side,
            } => {
                ws.split_pane(&pane, &tab, direction, side);
            }
            Command::Resize { split, sizes } => {
                ws.resize_split(&split, sizes);
            }
            Command::Collapse { split, child } => {
                ws.collapse_split(&split, &child);
            }
            Command::Drag { tab, from, x, y } => {
                let drag = DragSession::begin(tab, from);
                let target = self.classifier.locate(ws.root(), self.bounds, x, y);
                drag.drop(target, ws);
            }
            Command::DragHandle {
                split,
                handle,
                start,
                end,
            } => {
                let Some(container) = geometry::pane_rects(ws.root(), self.bounds).remove(&split)
                else {
                    tracing::debug!("No split {} on screen", split);
                    return false;
                };
                if self.resize.pointer_down(ws, &split, handle, start[0], start[1]) {
                    self.resize.pointer_move(ws, end[0], end[1], container);
                    self.resize.pointer_up();
                }
            }
        }
        self.workspace.revision() != revision
    }
}
