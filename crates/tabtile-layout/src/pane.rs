// ABOUTME: Pane tree node types: tab panes (leaves) and split panes.
// ABOUTME: Serialized with a "type" tag so persisted layouts stay readable.

use serde::{Deserialize, Serialize};

use crate::{PaneId, TabId};

/// Axis a split pane arranges its children along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children side by side, resized along x
    Horizontal,
    /// Children stacked, resized along y
    Vertical,
}

/// Which side of the remainder a split-off pane lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Before,
    After,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabPane {
    pub id: PaneId,
    pub tab_ids: Vec<TabId>,
    pub active_tab_id: Option<TabId>,
}

impl TabPane {
    pub fn empty(id: PaneId) -> Self {
        Self {
            id,
            tab_ids: Vec::new(),
            active_tab_id: None,
        }
    }

    pub fn with_tab(id: PaneId, tab: TabId) -> Self {
        Self {
            id,
            tab_ids: vec![tab.clone()],
            active_tab_id: Some(tab),
        }
    }

    pub fn contains(&self, tab: &TabId) -> bool {
        self.tab_ids.contains(tab)
    }

    pub fn position(&self, tab: &TabId) -> Option<usize> {
        self.tab_ids.iter().position(|t| t == tab)
    }

    /// Remove a tab; if it was active, the left neighbour takes over
    pub(crate) fn remove_tab(&mut self, tab: &TabId) -> bool {
        let Some(index) = self.position(tab) else {
            return false;
        };
        self.tab_ids.remove(index);
        if self.active_tab_id.as_ref() == Some(tab) {
            self.active_tab_id = self.tab_ids.get(index.saturating_sub(1)).cloned();
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPane {
    pub id: PaneId,
    pub direction: Direction,
    /// Percent share of each child, summing to 100
    pub sizes: Vec<f32>,
    pub children: Vec<Pane>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Pane {
    Tabs(TabPane),
    Split(SplitPane),
}

impl Pane {
    pub fn id(&self) -> &PaneId {
        match self {
            Pane::Tabs(pane) => &pane.id,
            Pane::Split(split) => &split.id,
        }
    }

    pub fn as_tabs(&self) -> Option<&TabPane> {
        match self {
            Pane::Tabs(pane) => Some(pane),
            Pane::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitPane> {
        match self {
            Pane::Split(split) => Some(split),
            Pane::Tabs(_) => None,
        }
    }

    /// True for a lone tab pane holding nothing
    pub fn is_empty_root(&self) -> bool {
        matches!(self, Pane::Tabs(pane) if pane.tab_ids.is_empty())
    }
}

impl Default for Pane {
    fn default() -> Self {
        Pane::Tabs(TabPane::default())
    }
}
