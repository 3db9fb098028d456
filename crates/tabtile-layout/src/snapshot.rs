// ABOUTME: Serializable workspace snapshot and restore.
// ABOUTME: Restore rebuilds live tabs via the content registry and repairs the tree.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ids::PANE_PREFIX;
use crate::pane::{Pane, TabPane};
use crate::registry::ContentRegistry;
use crate::tab::{Tab, TabMeta};
use crate::tree;
use crate::workspace::Workspace;
use crate::{PaneId, TabId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    pub tabs: Vec<TabMeta>,
    pub root_pane: Pane,
}

fn current_version() -> u32 {
    WorkspaceSnapshot::CURRENT_VERSION
}

impl WorkspaceSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn capture(workspace: &Workspace) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            tabs: workspace.tabs().iter().map(Tab::meta).collect(),
            root_pane: workspace.root().clone(),
        }
    }

    /// Rebuild a workspace, dropping anything that cannot be restored
    pub fn restore(self, registry: &ContentRegistry) -> Workspace {
        let mut tabs = Vec::with_capacity(self.tabs.len());
        let mut known = HashSet::new();
        for meta in self.tabs {
            if known.contains(&meta.id) {
                tracing::warn!("Dropping duplicate persisted tab {}", meta.id);
                continue;
            }
            match registry.resolve(&meta.kind, &meta.data) {
                Ok(content) => {
                    known.insert(meta.id.clone());
                    tabs.push(meta.into_tab(Some(content)));
                }
                Err(e) => tracing::warn!("Dropping persisted tab {}: {}", meta.id, e),
            }
        }

        let mut repair = Repair {
            known: &known,
            placed: HashSet::new(),
            seen_panes: HashSet::new(),
            next_pane: max_pane_sequence(&self.root_pane),
        };
        let root = repair.pane(self.root_pane);
        let mut root = match tree::prune(root) {
            Some(root) => root,
            None => Pane::Tabs(TabPane::empty(repair.fresh_pane_id())),
        };

        let unplaced: Vec<TabId> = tabs
            .iter()
            .map(|tab| tab.id.clone())
            .filter(|id| !repair.placed.contains(id))
            .collect();
        if !unplaced.is_empty() {
            tracing::warn!("Placing {} persisted tabs missing from the layout", unplaced.len());
            if let Some(first) = tree::first_tab_pane(&root).map(|pane| pane.id.clone()) {
                root = tree::update_tab_pane(root, &first, |mut pane| {
                    if pane.active_tab_id.is_none() {
                        pane.active_tab_id = unplaced.first().cloned();
                    }
                    pane.tab_ids.extend(unplaced);
                    pane
                });
            }
        }

        tracing::info!(
            "Restored workspace: {} tabs in {} panes",
            tabs.len(),
            tree::tab_pane_ids(&root).len()
        );
        Workspace::from_parts(tabs, root)
    }
}

impl Workspace {
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot::capture(self)
    }

    pub fn restore(snapshot: WorkspaceSnapshot, registry: &ContentRegistry) -> Self {
        snapshot.restore(registry)
    }
}

fn max_pane_sequence(root: &Pane) -> u64 {
    tree::all_pane_ids(root)
        .iter()
        .filter_map(|id| id.sequence(PANE_PREFIX))
        .max()
        .unwrap_or(0)
}

/// Walks a persisted tree re-establishing the tree invariants
struct Repair<'a> {
    known: &'a HashSet<TabId>,
    placed: HashSet<TabId>,
    seen_panes: HashSet<PaneId>,
    next_pane: u64,
}

impl Repair<'_> {
    fn fresh_pane_id(&mut self) -> PaneId {
        self.next_pane += 1;
        PaneId(format!("{PANE_PREFIX}{}", self.next_pane))
    }

    fn unique_id(&mut self, id: PaneId) -> PaneId {
        if self.seen_panes.insert(id.clone()) {
            return id;
        }
        let fresh = self.fresh_pane_id();
        tracing::warn!("Reassigning duplicate pane id {} to {}", id, fresh);
        self.seen_panes.insert(fresh.clone());
        fresh
    }

    fn pane(&mut self, node: Pane) -> Pane {
        match node {
            Pane::Tabs(mut pane) => {
                pane.id = self.unique_id(pane.id);
                pane.tab_ids
                    .retain(|id| self.known.contains(id) && self.placed.insert(id.clone()));
                let active_ok = pane
                    .active_tab_id
                    .as_ref()
                    .is_some_and(|active| pane.tab_ids.contains(active));
                if !active_ok {
                    pane.active_tab_id = pane.tab_ids.first().cloned();
                }
                Pane::Tabs(pane)
            }
            Pane::Split(mut split) => {
                split.id = self.unique_id(split.id);
                split.children = split
                    .children
                    .into_iter()
                    .map(|child| self.pane(child))
                    .collect();
                let usable = split.sizes.len() == split.children.len()
                    && split.sizes.iter().all(|size| size.is_finite() && *size > 0.0);
                split.sizes = if usable {
                    tree::normalize_sizes(&split.sizes)
                } else {
                    tree::equal_sizes(split.children.len())
                };
                Pane::Split(split)
            }
        }
    }
}
