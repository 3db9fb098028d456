// ABOUTME: Authoritative tab workspace: the flat tab list plus the pane tree.
// ABOUTME: Every mutation is a tolerant no-op on stale ids and keeps tree invariants.

use crate::history::ClosedTabs;
use crate::ids::{PANE_PREFIX, TAB_PREFIX};
use crate::pane::{Direction, Pane, Side, SplitPane, TabPane};
use crate::tab::{Tab, TabSpec};
use crate::tree;
use crate::{PaneId, TabId};

/// Ids created by a successful `split_pane`.
///
/// `split_id` is gone again if the source pane was emptied by the split and
/// the new split collapsed into `pane_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    pub split_id: PaneId,
    pub pane_id: PaneId,
}

#[derive(Debug, Clone)]
pub struct Workspace {
    tabs: Vec<Tab>,
    root: Pane,
    closed: ClosedTabs,
    next_tab: u64,
    next_pane: u64,
    revision: u64,
}

impl Workspace {
    pub fn new() -> Self {
        let mut workspace = Self {
            tabs: Vec::new(),
            root: Pane::default(),
            closed: ClosedTabs::new(),
            next_tab: 0,
            next_pane: 0,
            revision: 0,
        };
        let id = workspace.fresh_pane_id();
        workspace.root = Pane::Tabs(TabPane::empty(id));
        workspace
    }

    /// Assemble a workspace from already-consistent parts
    pub(crate) fn from_parts(tabs: Vec<Tab>, root: Pane) -> Self {
        let next_tab = tabs
            .iter()
            .filter_map(|tab| tab.id.sequence(TAB_PREFIX))
            .max()
            .unwrap_or(0);
        let next_pane = tree::all_pane_ids(&root)
            .iter()
            .filter_map(|id| id.sequence(PANE_PREFIX))
            .max()
            .unwrap_or(0);
        Self {
            tabs,
            root,
            closed: ClosedTabs::new(),
            next_tab,
            next_pane,
            revision: 0,
        }
    }

    pub fn root(&self) -> &Pane {
        &self.root
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| &tab.id == id)
    }

    pub fn closed_tabs(&self) -> &ClosedTabs {
        &self.closed
    }

    /// Bumped once per mutation that changed anything
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find_pane_by_id(&self, id: &PaneId) -> Option<&Pane> {
        tree::find_pane_by_id(&self.root, id)
    }

    pub fn find_pane_containing_tab(&self, tab: &TabId) -> Option<&TabPane> {
        tree::find_pane_containing_tab(&self.root, tab)
    }

    pub fn all_pane_ids(&self) -> Vec<PaneId> {
        tree::all_pane_ids(&self.root)
    }

    pub fn tab_pane_ids(&self) -> Vec<PaneId> {
        tree::tab_pane_ids(&self.root)
    }

    pub fn active_tab(&self, pane: &PaneId) -> Option<&TabId> {
        tree::find_tab_pane(&self.root, pane)?.active_tab_id.as_ref()
    }

    /// Open a tab in the first pane and activate it, or activate an open
    /// tab already showing the same view.
    pub fn add_tab(&mut self, spec: TabSpec) -> TabId {
        self.open_tab(spec, true)
    }

    /// Like `add_tab` but never changes which tab is active
    pub fn add_tab_in_background(&mut self, spec: TabSpec) -> TabId {
        self.open_tab(spec, false)
    }

    fn open_tab(&mut self, spec: TabSpec, activate: bool) -> TabId {
        if let Some(existing) = self
            .tabs
            .iter()
            .find(|tab| tab.same_view(&spec.kind, &spec.data))
        {
            let id = existing.id.clone();
            tracing::debug!("Tab {} already shows {} view, reusing it", id, spec.kind);
            if activate {
                self.activate_tab(&id);
            }
            return id;
        }

        let id = self.fresh_tab_id();
        self.tabs.push(spec.into_tab(id.clone()));

        let target = match tree::first_tab_pane(&self.root) {
            Some(pane) => pane.id.clone(),
            None => {
                let pane_id = self.fresh_pane_id();
                self.root = Pane::Tabs(TabPane::empty(pane_id.clone()));
                pane_id
            }
        };
        let root = std::mem::take(&mut self.root);
        self.root = tree::update_tab_pane(root, &target, |mut pane| {
            pane.tab_ids.push(id.clone());
            if activate {
                pane.active_tab_id = Some(id.clone());
            }
            pane
        });
        self.bump();
        tracing::debug!("Opened tab {} in pane {}", id, target);
        id
    }

    pub fn activate_tab(&mut self, id: &TabId) -> bool {
        let Some(pane) = tree::find_pane_containing_tab(&self.root, id) else {
            tracing::debug!("Activate ignored: tab {} is not open", id);
            return false;
        };
        if pane.active_tab_id.as_ref() == Some(id) {
            return false;
        }
        let pane_id = pane.id.clone();
        let root = std::mem::take(&mut self.root);
        self.root = tree::update_tab_pane(root, &pane_id, |mut pane| {
            pane.active_tab_id = Some(id.clone());
            pane
        });
        self.bump();
        true
    }

    /// Step the active tab of a pane forwards or backwards, wrapping around
    pub fn cycle_active_tab(&mut self, pane_id: &PaneId, forward: bool) -> Option<TabId> {
        let pane = tree::find_tab_pane(&self.root, pane_id)?;
        let len = pane.tab_ids.len();
        if len == 0 {
            return None;
        }
        let next = match pane.active_tab_id.as_ref().and_then(|id| pane.position(id)) {
            Some(current) if forward => (current + 1) % len,
            Some(current) => (current + len - 1) % len,
            None => 0,
        };
        let id = pane.tab_ids[next].clone();
        self.activate_tab(&id);
        Some(id)
    }

    pub fn close_active_tab(&mut self, pane_id: &PaneId) -> bool {
        match self.active_tab(pane_id).cloned() {
            Some(id) => self.close_tab(&id),
            None => false,
        }
    }

    pub fn update_tab_title(&mut self, id: &TabId, title: impl Into<String>) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|tab| &tab.id == id) else {
            return false;
        };
        tab.title = title.into();
        self.bump();
        true
    }

    /// Close a tab, remembering it for `reopen_last_closed_tab`
    pub fn close_tab(&mut self, id: &TabId) -> bool {
        let Some(index) = self.tabs.iter().position(|tab| &tab.id == id) else {
            tracing::debug!("Close ignored: tab {} is not open", id);
            return false;
        };
        if !self.tabs[index].closable {
            tracing::debug!("Close ignored: tab {} is not closable", id);
            return false;
        }

        let tab = self.tabs.remove(index);
        self.closed.push(tab);

        if let Some(pane_id) = tree::find_pane_containing_tab(&self.root, id).map(|p| p.id.clone()) {
            let root = std::mem::take(&mut self.root);
            let root = tree::update_tab_pane(root, &pane_id, |mut pane| {
                pane.remove_tab(id);
                pane
            });
            self.settle(root);
        }
        self.bump();
        true
    }

    /// Reopen the most recently closed tab in the first pane.
    ///
    /// The history entry is consumed even when the tab, or another tab
    /// showing the same view, is open again already. In the latter case
    /// that tab is activated instead.
    pub fn reopen_last_closed_tab(&mut self) -> Option<TabId> {
        let tab = self.closed.pop()?;
        let id = tab.id.clone();
        if self.tab(&id).is_some() || tree::find_pane_containing_tab(&self.root, &id).is_some() {
            tracing::debug!("Reopen skipped: tab {} is already open", id);
            return None;
        }
        if let Some(existing) = self
            .tabs
            .iter()
            .find(|open| open.same_view(&tab.kind, &tab.data))
        {
            let existing = existing.id.clone();
            tracing::debug!("Reopen of {} skipped: tab {} shows the same view", id, existing);
            self.activate_tab(&existing);
            return None;
        }

        self.tabs.push(tab);
        let target = match tree::first_tab_pane(&self.root) {
            Some(pane) => pane.id.clone(),
            None => {
                let pane_id = self.fresh_pane_id();
                self.root = Pane::Tabs(TabPane::empty(pane_id.clone()));
                pane_id
            }
        };
        let root = std::mem::take(&mut self.root);
        self.root = tree::update_tab_pane(root, &target, |mut pane| {
            pane.tab_ids.push(id.clone());
            pane.active_tab_id = Some(id.clone());
            pane
        });
        self.bump();
        Some(id)
    }

    /// Close every closable tab in `id`'s pane except `id`
    pub fn close_other_tabs(&mut self, id: &TabId) -> bool {
        let Some(pane) = tree::find_pane_containing_tab(&self.root, id) else {
            return false;
        };
        let doomed: Vec<TabId> = pane
            .tab_ids
            .iter()
            .filter(|tab| *tab != id && self.is_closable(tab))
            .cloned()
            .collect();
        let pane_id = pane.id.clone();
        self.close_in_pane(&pane_id, id, doomed)
    }

    /// Close every closable tab positioned right of `id` in its pane
    pub fn close_tabs_to_right(&mut self, id: &TabId) -> bool {
        let Some(pane) = tree::find_pane_containing_tab(&self.root, id) else {
            return false;
        };
        let Some(position) = pane.position(id) else {
            return false;
        };
        let doomed: Vec<TabId> = pane.tab_ids[position + 1..]
            .iter()
            .filter(|tab| self.is_closable(tab))
            .cloned()
            .collect();
        let pane_id = pane.id.clone();
        self.close_in_pane(&pane_id, id, doomed)
    }

    fn is_closable(&self, id: &TabId) -> bool {
        self.tab(id).is_some_and(|tab| tab.closable)
    }

    fn close_in_pane(&mut self, pane_id: &PaneId, keep: &TabId, doomed: Vec<TabId>) -> bool {
        if doomed.is_empty() {
            return false;
        }
        for id in &doomed {
            if let Some(index) = self.tabs.iter().position(|tab| &tab.id == id) {
                let tab = self.tabs.remove(index);
                self.closed.push(tab);
            }
        }

        let root = std::mem::take(&mut self.root);
        self.root = tree::update_tab_pane(root, pane_id, |mut pane| {
            pane.tab_ids.retain(|tab| !doomed.contains(tab));
            let active_survives = pane
                .active_tab_id
                .as_ref()
                .is_some_and(|active| pane.tab_ids.contains(active));
            if !active_survives {
                pane.active_tab_id = Some(keep.clone());
            }
            pane
        });
        self.bump();
        tracing::debug!("Closed {} tabs in pane {}", doomed.len(), pane_id);
        true
    }

    /// Reorder a tab within one pane
    pub fn move_tab(&mut self, from: usize, to: usize, pane_id: &PaneId) -> bool {
        let Some(pane) = tree::find_tab_pane(&self.root, pane_id) else {
            return false;
        };
        let len = pane.tab_ids.len();
        if from >= len || to >= len {
            tracing::debug!("Move ignored: index {} -> {} outside 0..{}", from, to, len);
            return false;
        }
        if from == to {
            return false;
        }

        let root = std::mem::take(&mut self.root);
        self.root = tree::update_tab_pane(root, pane_id, |mut pane| {
            let tab = pane.tab_ids.remove(from);
            pane.tab_ids.insert(to, tab);
            pane
        });
        self.bump();
        true
    }

    /// Move a tab into another pane at `target_index` (default: the end).
    ///
    /// The source pane is pruned if this leaves it empty.
    pub fn move_tab_to_pane(
        &mut self,
        tab_id: &TabId,
        from: &PaneId,
        to: &PaneId,
        target_index: Option<usize>,
    ) -> bool {
        let Some(source) = tree::find_tab_pane(&self.root, from) else {
            return false;
        };
        let Some(position) = source.position(tab_id) else {
            tracing::debug!("Move ignored: tab {} is not in pane {}", tab_id, from);
            return false;
        };
        let Some(target) = tree::find_tab_pane(&self.root, to) else {
            tracing::debug!("Move ignored: no tab pane {}", to);
            return false;
        };

        if from == to {
            let last = target.tab_ids.len() - 1;
            let index = target_index.map_or(last, |index| index.min(last));
            return self.move_tab(position, index, from);
        }

        let root = std::mem::take(&mut self.root);
        let root = tree::update_tab_pane(root, from, |mut pane| {
            pane.remove_tab(tab_id);
            pane
        });
        let root = tree::update_tab_pane(root, to, |mut pane| {
            let index = target_index.map_or(pane.tab_ids.len(), |i| i.min(pane.tab_ids.len()));
            pane.tab_ids.insert(index, tab_id.clone());
            if pane.active_tab_id.is_none() {
                pane.active_tab_id = Some(tab_id.clone());
            }
            pane
        });
        self.settle(root);
        self.bump();
        tracing::debug!("Moved tab {} from pane {} to pane {}", tab_id, from, to);
        true
    }

    /// Split `tab_id` out of `pane_id` into a new pane on `side` of the rest
    pub fn split_pane(
        &mut self,
        pane_id: &PaneId,
        tab_id: &TabId,
        direction: Direction,
        side: Side,
    ) -> Option<SplitOutcome> {
        self.split_off(tab_id, pane_id, pane_id, direction, side)
    }

    /// Take `tab_id` out of `from` and split `to` around it, as one change.
    ///
    /// With `from == to` this is `split_pane`.
    pub fn split_tab_into_pane(
        &mut self,
        tab_id: &TabId,
        from: &PaneId,
        to: &PaneId,
        direction: Direction,
        side: Side,
    ) -> Option<SplitOutcome> {
        self.split_off(tab_id, from, to, direction, side)
    }

    fn split_off(
        &mut self,
        tab_id: &TabId,
        from: &PaneId,
        to: &PaneId,
        direction: Direction,
        side: Side,
    ) -> Option<SplitOutcome> {
        let source = tree::find_tab_pane(&self.root, from)?;
        if !source.contains(tab_id) {
            tracing::debug!("Split ignored: tab {} is not in pane {}", tab_id, from);
            return None;
        }
        tree::find_tab_pane(&self.root, to)?;

        let new_pane_id = self.fresh_pane_id();
        let split_id = self.fresh_pane_id();
        let new_pane = Pane::Tabs(TabPane::with_tab(new_pane_id.clone(), tab_id.clone()));

        let root = std::mem::take(&mut self.root);
        let root = tree::update_tab_pane(root, from, |mut pane| {
            pane.remove_tab(tab_id);
            pane
        });
        // `from` may be empty now; settle prunes it after the split lands
        let root = tree::replace_pane(root, to, |remainder| {
            let children = match side {
                Side::Before => vec![new_pane, remainder],
                Side::After => vec![remainder, new_pane],
            };
            Pane::Split(SplitPane {
                id: split_id.clone(),
                direction,
                sizes: vec![50.0, 50.0],
                children,
            })
        });
        self.settle(root);
        self.bump();
        tracing::debug!(
            "Split tab {} out of pane {} beside pane {} into pane {} ({:?}, {:?})",
            tab_id,
            from,
            to,
            new_pane_id,
            direction,
            side
        );
        Some(SplitOutcome {
            split_id,
            pane_id: new_pane_id,
        })
    }

    /// Replace a split's sizes.
    ///
    /// Callers clamp; this only rejects unusable vectors and rescales the
    /// rest to sum to 100.
    pub fn resize_split(&mut self, split_id: &PaneId, sizes: Vec<f32>) -> bool {
        let Some(split) = tree::find_split_pane(&self.root, split_id) else {
            return false;
        };
        let usable = sizes.len() == split.children.len()
            && sizes.iter().all(|size| size.is_finite() && *size > 0.0);
        if !usable {
            tracing::debug!("Resize ignored for split {}: sizes {:?}", split_id, sizes);
            return false;
        }

        let sizes = tree::normalize_sizes(&sizes);
        let root = std::mem::take(&mut self.root);
        self.root = tree::replace_pane(root, split_id, |node| match node {
            Pane::Split(mut split) => {
                split.sizes = sizes;
                Pane::Split(split)
            }
            other => other,
        });
        self.bump();
        true
    }

    /// Remove a child from a split, handing its tabs to the neighbouring
    /// sibling so no tab is lost.
    pub fn collapse_split(&mut self, split_id: &PaneId, child_id: &PaneId) -> bool {
        let Some(split) = tree::find_split_pane(&self.root, split_id) else {
            return false;
        };
        let Some(index) = split.children.iter().position(|c| c.id() == child_id) else {
            tracing::debug!("Collapse ignored: {} is not a child of {}", child_id, split_id);
            return false;
        };

        let orphans = tree::all_tab_ids(&split.children[index]);
        let recipient = if index > 0 {
            tree::last_tab_pane(&split.children[index - 1])
        } else {
            split.children.get(1).and_then(tree::first_tab_pane)
        }
        .map(|pane| pane.id.clone());

        let root = std::mem::take(&mut self.root);
        let mut root = tree::replace_pane(root, split_id, |node| match node {
            Pane::Split(split) => tree::without_child(split, index),
            other => other,
        });
        if let Some(recipient) = recipient.filter(|_| !orphans.is_empty()) {
            root = tree::update_tab_pane(root, &recipient, |mut pane| {
                if pane.active_tab_id.is_none() {
                    pane.active_tab_id = orphans.first().cloned();
                }
                pane.tab_ids.extend(orphans);
                pane
            });
        }
        self.settle(root);
        self.bump();
        true
    }

    /// Install a rebuilt root, pruning empty panes.
    ///
    /// An all-empty tree becomes a fresh empty root pane.
    fn settle(&mut self, root: Pane) {
        self.root = match tree::prune(root) {
            Some(root) => root,
            None => Pane::Tabs(TabPane::empty(self.fresh_pane_id())),
        };
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn fresh_tab_id(&mut self) -> TabId {
        loop {
            self.next_tab += 1;
            let id = TabId(format!("{TAB_PREFIX}{}", self.next_tab));
            if self.tab(&id).is_none() && !self.closed.contains(&id) {
                return id;
            }
        }
    }

    fn fresh_pane_id(&mut self) -> PaneId {
        loop {
            self.next_pane += 1;
            let id = PaneId(format!("{PANE_PREFIX}{}", self.next_pane));
            if tree::find_pane_by_id(&self.root, &id).is_none() {
                return id;
            }
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    pub(crate) fn doc(id: &str) -> TabSpec {
        TabSpec::new("doc", json!({ "id": id })).title(id)
    }

    fn tid(id: &str) -> TabId {
        TabId::from(id)
    }

    fn ids(pane: &TabPane) -> Vec<&str> {
        pane.tab_ids.iter().map(TabId::as_str).collect()
    }

    fn root_tabs(ws: &Workspace) -> &TabPane {
        ws.root().as_tabs().expect("root should be a tab pane")
    }

    /// Checks the structural invariants every operation must preserve
    pub(crate) fn assert_invariants(ws: &Workspace) {
        let mut pane_ids = HashSet::new();
        tree::visit(ws.root(), &mut |pane| {
            assert!(pane_ids.insert(pane.id().clone()), "duplicate pane id {}", pane.id());
            match pane {
                Pane::Split(split) => {
                    assert!(split.children.len() >= 2, "split {} under-filled", split.id);
                    assert_eq!(split.sizes.len(), split.children.len());
                    let total: f32 = split.sizes.iter().sum();
                    assert!((total - 100.0).abs() < 0.01, "sizes sum to {}", total);
                }
                Pane::Tabs(tabs) => {
                    if let Some(active) = &tabs.active_tab_id {
                        assert!(tabs.contains(active));
                    }
                }
            }
        });

        let placed = tree::all_tab_ids(ws.root());
        let unique: HashSet<_> = placed.iter().collect();
        assert_eq!(unique.len(), placed.len(), "tab placed twice");
        let listed: HashSet<_> = ws.tabs().iter().map(|tab| &tab.id).collect();
        assert_eq!(unique, listed);

        if let Pane::Split(_) = ws.root() {
            for id in ws.tab_pane_ids() {
                let pane = tree::find_tab_pane(ws.root(), &id).unwrap();
                assert!(!pane.tab_ids.is_empty(), "empty pane {} not pruned", id);
            }
        }
    }

    /// Root pane holding a, b, c with b active
    fn abc() -> Workspace {
        let mut ws = Workspace::new();
        for id in ["a", "b", "c"] {
            ws.add_tab(doc(id));
        }
        let b = ws.tabs()[1].id.clone();
        ws.activate_tab(&b);
        ws
    }

    #[test]
    fn add_tab_to_empty_root() {
        let mut ws = Workspace::new();
        let id = ws.add_tab(TabSpec::new("doc", json!({"id": "x"})));

        assert_eq!(id, tid("t1"));
        let root = root_tabs(&ws);
        assert_eq!(ids(root), ["t1"]);
        assert_eq!(root.active_tab_id, Some(tid("t1")));
        assert_invariants(&ws);
    }

    #[test]
    fn add_tab_dedupes_and_activates_existing() {
        let mut ws = Workspace::new();
        let first = ws.add_tab(doc("x"));
        ws.add_tab(doc("y"));

        let again = ws.add_tab(doc("x"));
        assert_eq!(again, first);
        assert_eq!(ws.tabs().len(), 2);
        assert_eq!(root_tabs(&ws).active_tab_id, Some(first));
    }

    #[test]
    fn background_add_keeps_active_tab() {
        let mut ws = Workspace::new();
        let first = ws.add_tab(doc("x"));
        let second = ws.add_tab_in_background(doc("y"));

        assert_ne!(first, second);
        assert_eq!(ids(root_tabs(&ws)), ["t1", "t2"]);
        assert_eq!(root_tabs(&ws).active_tab_id, Some(first.clone()));

        ws.add_tab_in_background(doc("x"));
        ws.activate_tab(&second);
        ws.add_tab_in_background(doc("x"));
        assert_eq!(root_tabs(&ws).active_tab_id, Some(second));
    }

    #[test]
    fn add_tab_goes_to_first_pane_in_pre_order() {
        let mut ws = abc();
        let pane = root_tabs(&ws).id.clone();
        let outcome = ws
            .split_pane(&pane, &tid("t3"), Direction::Horizontal, Side::Before)
            .unwrap();

        let id = ws.add_tab(doc("d"));
        let owner = ws.find_pane_containing_tab(&id).unwrap();
        assert_eq!(owner.id, outcome.pane_id);
        assert_invariants(&ws);
    }

    #[test]
    fn close_active_tab_activates_left_neighbour() {
        let mut ws = abc();
        assert!(ws.close_tab(&tid("t2")));

        let root = root_tabs(&ws);
        assert_eq!(ids(root), ["t1", "t3"]);
        assert_eq!(root.active_tab_id, Some(tid("t1")));
        assert_eq!(ws.closed_tabs().peek().unwrap().id, tid("t2"));
        assert_invariants(&ws);
    }

    #[test]
    fn closing_last_tab_leaves_fresh_empty_root() {
        let mut ws = Workspace::new();
        let original = ws.root().id().clone();
        let id = ws.add_tab(doc("a"));

        assert!(ws.close_tab(&id));
        assert!(ws.root().is_empty_root());
        assert_ne!(ws.root().id(), &original);
        assert!(ws.tabs().is_empty());
        assert_invariants(&ws);
    }

    #[test]
    fn pinned_tab_cannot_be_closed() {
        let mut ws = Workspace::new();
        let id = ws.add_tab(doc("a").pinned());
        let revision = ws.revision();

        assert!(!ws.close_tab(&id));
        assert_eq!(ws.revision(), revision);
        assert_eq!(ws.tabs().len(), 1);
        assert!(!ws.close_tab(&tid("missing")));
    }

    #[test]
    fn closing_tab_prunes_emptied_split_child() {
        let mut ws = abc();
        let pane = root_tabs(&ws).id.clone();
        ws.split_pane(&pane, &tid("t3"), Direction::Vertical, Side::After)
            .unwrap();
        assert!(ws.root().as_split().is_some());

        ws.close_tab(&tid("t3"));
        assert_eq!(ws.root().id(), &pane);
        assert_eq!(ids(root_tabs(&ws)), ["t1", "t2"]);
        assert_invariants(&ws);
    }

    #[test]
    fn reopen_restores_most_recent() {
        let mut ws = abc();
        ws.close_tab(&tid("t1"));
        ws.close_tab(&tid("t3"));

        assert_eq!(ws.reopen_last_closed_tab(), Some(tid("t3")));
        let root = root_tabs(&ws);
        assert_eq!(ids(root), ["t2", "t3"]);
        assert_eq!(root.active_tab_id, Some(tid("t3")));
        assert_eq!(ws.reopen_last_closed_tab(), Some(tid("t1")));
        assert_eq!(ws.reopen_last_closed_tab(), None);
        assert_invariants(&ws);
    }

    #[test]
    fn reopen_into_empty_root() {
        let mut ws = Workspace::new();
        let id = ws.add_tab(doc("a"));
        ws.close_tab(&id);

        assert_eq!(ws.reopen_last_closed_tab(), Some(id.clone()));
        assert_eq!(root_tabs(&ws).active_tab_id, Some(id));
        assert_invariants(&ws);
    }

    #[test]
    fn reopen_discards_entry_already_present() {
        let mut ws = abc();
        ws.close_tab(&tid("t3"));
        // Race: the closed tab got back into the workspace some other way
        let tab = ws.closed.peek().unwrap().clone();
        ws.tabs.push(tab);
        let root = std::mem::take(&mut ws.root);
        let pane = root.id().clone();
        ws.root = tree::update_tab_pane(root, &pane, |mut p| {
            p.tab_ids.push(tid("t3"));
            p
        });

        assert_eq!(ws.reopen_last_closed_tab(), None);
        assert!(ws.closed_tabs().is_empty());
        assert_eq!(ids(root_tabs(&ws)), ["t1", "t2", "t3"]);
        assert_invariants(&ws);
    }

    #[test]
    fn reopen_after_view_was_opened_again_activates_it() {
        let mut ws = Workspace::new();
        let first = ws.add_tab(doc("x"));
        ws.add_tab(doc("y"));
        ws.close_tab(&first);
        let second = ws.add_tab(doc("x"));
        assert_ne!(first, second);
        ws.add_tab(doc("z"));

        assert_eq!(ws.reopen_last_closed_tab(), None);
        assert!(ws.closed_tabs().is_empty());
        let showing_x: Vec<_> = ws
            .tabs()
            .iter()
            .filter(|tab| tab.same_view("doc", &json!({ "id": "x" })))
            .map(|tab| tab.id.clone())
            .collect();
        assert_eq!(showing_x, vec![second.clone()]);
        assert_eq!(root_tabs(&ws).active_tab_id, Some(second));
        assert_invariants(&ws);
    }

    #[test]
    fn new_ids_never_collide_with_closed_history() {
        let mut ws = Workspace::new();
        let a = ws.add_tab(doc("a"));
        ws.close_tab(&a);
        let b = ws.add_tab(doc("b"));
        assert_ne!(a, b);
    }

    #[test]
    fn close_other_tabs_keeps_pinned() {
        let mut ws = Workspace::new();
        ws.add_tab(doc("a").pinned());
        ws.add_tab(doc("b"));
        ws.add_tab(doc("c"));
        ws.add_tab(doc("d"));

        assert!(ws.close_other_tabs(&tid("t3")));
        let root = root_tabs(&ws);
        assert_eq!(ids(root), ["t1", "t3"]);
        assert_eq!(root.active_tab_id, Some(tid("t3")));
        let closed: Vec<_> = ws.closed_tabs().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(closed, ["t2", "t4"]);
        assert_invariants(&ws);
    }

    #[test]
    fn close_tabs_to_right_only_touches_right_side() {
        let mut ws = Workspace::new();
        ws.add_tab(doc("a"));
        ws.add_tab(doc("b"));
        ws.add_tab(doc("c").pinned());
        ws.add_tab(doc("d"));
        ws.activate_tab(&tid("t1"));

        assert!(ws.close_tabs_to_right(&tid("t2")));
        let root = root_tabs(&ws);
        assert_eq!(ids(root), ["t1", "t2", "t3"]);
        assert_eq!(root.active_tab_id, Some(tid("t1")));

        assert!(!ws.close_tabs_to_right(&tid("t2")));
        assert!(!ws.close_tabs_to_right(&tid("missing")));
        assert_invariants(&ws);
    }

    #[test]
    fn close_tabs_scoped_to_owning_pane() {
        let mut ws = abc();
        let pane = root_tabs(&ws).id.clone();
        ws.split_pane(&pane, &tid("t1"), Direction::Horizontal, Side::Before)
            .unwrap();

        ws.close_other_tabs(&tid("t2"));
        assert!(ws.tab(&tid("t1")).is_some());
        assert!(ws.tab(&tid("t3")).is_none());
        assert_invariants(&ws);
    }

    #[test]
    fn move_tab_reorders_within_pane() {
        let mut ws = abc();
        let pane = root_tabs(&ws).id.clone();

        assert!(ws.move_tab(0, 2, &pane));
        assert_eq!(ids(root_tabs(&ws)), ["t2", "t3", "t1"]);
        assert_eq!(root_tabs(&ws).active_tab_id, Some(tid("t2")));
    }

    #[test]
    fn move_tab_same_index_is_noop() {
        let mut ws = abc();
        let pane = root_tabs(&ws).id.clone();
        let before = ws.root().clone();
        let revision = ws.revision();

        assert!(!ws.move_tab(1, 1, &pane));
        assert!(!ws.move_tab(0, 3, &pane));
        assert!(!ws.move_tab(0, 1, &PaneId::from("missing")));
        assert_eq!(ws.root(), &before);
        assert_eq!(ws.revision(), revision);
    }

    #[test]
    fn move_tab_to_pane_inserts_and_prunes_source() {
        let mut ws = abc();
        let left = root_tabs(&ws).id.clone();
        let right = ws
            .split_pane(&left, &tid("t3"), Direction::Horizontal, Side::After)
            .unwrap()
            .pane_id;

        assert!(ws.move_tab_to_pane(&tid("t1"), &left, &right, Some(0)));
        let target = tree::find_tab_pane(ws.root(), &right).unwrap();
        assert_eq!(ids(target), ["t1", "t3"]);
        assert_eq!(target.active_tab_id, Some(tid("t3")));
        let source = tree::find_tab_pane(ws.root(), &left).unwrap();
        assert_eq!(source.active_tab_id, Some(tid("t2")));

        assert!(ws.move_tab_to_pane(&tid("t2"), &left, &right, None));
        assert_eq!(ws.root().id(), &right);
        assert_eq!(ids(root_tabs(&ws)), ["t1", "t3", "t2"]);
        assert_invariants(&ws);
    }

    #[test]
    fn move_tab_to_pane_ignores_stale_references() {
        let mut ws = abc();
        let pane = root_tabs(&ws).id.clone();
        let revision = ws.revision();

        assert!(!ws.move_tab_to_pane(&tid("t1"), &pane, &PaneId::from("gone"), None));
        assert!(!ws.move_tab_to_pane(&tid("zz"), &pane, &pane, None));
        assert!(!ws.move_tab_to_pane(&tid("t1"), &PaneId::from("gone"), &pane, None));
        assert_eq!(ws.revision(), revision);
        assert_eq!(ids(root_tabs(&ws)), ["t1", "t2", "t3"]);
    }

    #[test]
    fn move_tab_to_same_pane_reorders() {
        let mut ws = abc();
        let pane = root_tabs(&ws).id.clone();
        assert!(ws.move_tab_to_pane(&tid("t1"), &pane, &pane, None));
        assert_eq!(ids(root_tabs(&ws)), ["t2", "t3", "t1"]);
    }

    #[test]
    fn split_sole_tab_collapses_to_new_pane() {
        let mut ws = Workspace::new();
        let a = ws.add_tab(doc("a"));
        let p = root_tabs(&ws).id.clone();

        let outcome = ws
            .split_pane(&p, &a, Direction::Vertical, Side::After)
            .unwrap();
        let root = root_tabs(&ws);
        assert_eq!(root.id, outcome.pane_id);
        assert_eq!(ids(root), ["t1"]);
        assert_eq!(root.active_tab_id, Some(a));
        assert!(ws.find_pane_by_id(&outcome.split_id).is_none());
        assert_invariants(&ws);
    }

    #[test]
    fn split_orders_children_by_side() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();

        let outcome = ws
            .split_pane(&p, &tid("t2"), Direction::Horizontal, Side::Before)
            .unwrap();
        let split = ws.root().as_split().unwrap();
        assert_eq!(split.id, outcome.split_id);
        assert_eq!(split.direction, Direction::Horizontal);
        assert_eq!(split.sizes, vec![50.0, 50.0]);
        assert_eq!(split.children[0].id(), &outcome.pane_id);
        assert_eq!(split.children[1].id(), &p);

        let remainder = split.children[1].as_tabs().unwrap();
        assert_eq!(ids(remainder), ["t1", "t3"]);
        assert_eq!(remainder.active_tab_id, Some(tid("t1")));
        assert_invariants(&ws);
    }

    #[test]
    fn nested_split_replaces_pane_inside_parent() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        let first = ws
            .split_pane(&p, &tid("t3"), Direction::Horizontal, Side::After)
            .unwrap();
        let second = ws
            .split_pane(&p, &tid("t2"), Direction::Vertical, Side::After)
            .unwrap();

        let root = ws.root().as_split().unwrap();
        assert_eq!(root.id, first.split_id);
        assert_eq!(root.children[0].id(), &second.split_id);
        assert_eq!(ws.tab_pane_ids().len(), 3);
        assert_eq!(ws.all_pane_ids().len(), 5);
        assert_invariants(&ws);
    }

    #[test]
    fn split_with_stale_ids_is_noop() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        assert!(ws
            .split_pane(&p, &tid("zz"), Direction::Horizontal, Side::After)
            .is_none());
        assert!(ws
            .split_pane(&PaneId::from("gone"), &tid("t1"), Direction::Horizontal, Side::After)
            .is_none());
        assert_eq!(ids(root_tabs(&ws)), ["t1", "t2", "t3"]);
    }

    #[test]
    fn split_then_collapse_round_trips_tab_set() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        let outcome = ws
            .split_pane(&p, &tid("t2"), Direction::Horizontal, Side::After)
            .unwrap();

        assert!(ws.collapse_split(&outcome.split_id, &outcome.pane_id));
        let root = root_tabs(&ws);
        assert_eq!(root.id, p);
        let mut tabs = ids(root);
        tabs.sort();
        assert_eq!(tabs, ["t1", "t2", "t3"]);
        assert_invariants(&ws);
    }

    #[test]
    fn collapse_after_resize_returns_to_single_pane() {
        let mut ws = Workspace::new();
        for id in ["a", "b", "c"] {
            ws.add_tab(doc(id));
        }
        let p = root_tabs(&ws).id.clone();
        let outer = ws
            .split_pane(&p, &tid("t3"), Direction::Horizontal, Side::After)
            .unwrap();
        ws.resize_split(&outer.split_id, vec![60.0, 40.0]);
        ws.collapse_split(&outer.split_id, &outer.pane_id);
        assert_eq!(ws.root().id(), &p);
        assert_invariants(&ws);

        assert!(!ws.collapse_split(&PaneId::from("gone"), &p));
    }

    #[test]
    fn collapse_first_child_hands_tabs_to_next_sibling() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        let outcome = ws
            .split_pane(&p, &tid("t2"), Direction::Horizontal, Side::Before)
            .unwrap();
        let split = ws.root().as_split().unwrap();
        assert_eq!(split.children[0].id(), &outcome.pane_id);

        assert!(ws.collapse_split(&outcome.split_id, &outcome.pane_id));
        let root = root_tabs(&ws);
        assert_eq!(root.id, p);
        assert_eq!(ids(root), ["t1", "t3", "t2"]);
        assert_eq!(root.active_tab_id, Some(tid("t1")));
        assert_invariants(&ws);
    }

    #[test]
    fn collapse_split_child_moves_whole_subtree() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        let outer = ws
            .split_pane(&p, &tid("t3"), Direction::Horizontal, Side::After)
            .unwrap();
        let inner = ws
            .split_pane(&p, &tid("t2"), Direction::Vertical, Side::After)
            .unwrap();
        let split = ws.root().as_split().unwrap();
        assert_eq!(split.children[0].id(), &inner.split_id);

        let revision = ws.revision();
        assert!(ws.collapse_split(&outer.split_id, &inner.split_id));
        assert_eq!(ws.revision(), revision + 1);
        let root = root_tabs(&ws);
        assert_eq!(root.id, outer.pane_id);
        assert_eq!(ids(root), ["t3", "t1", "t2"]);
        assert_eq!(root.active_tab_id, Some(tid("t3")));
        assert!(ws.find_pane_by_id(&p).is_none());
        assert!(ws.find_pane_by_id(&inner.pane_id).is_none());
        assert_invariants(&ws);
    }

    #[test]
    fn split_tab_into_other_pane_is_one_change() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        let right = ws
            .split_pane(&p, &tid("t3"), Direction::Horizontal, Side::After)
            .unwrap()
            .pane_id;

        let revision = ws.revision();
        let outcome = ws
            .split_tab_into_pane(&tid("t1"), &p, &right, Direction::Vertical, Side::Before)
            .unwrap();
        assert_eq!(ws.revision(), revision + 1);
        assert_eq!(ws.find_pane_containing_tab(&tid("t1")).unwrap().id, outcome.pane_id);
        let inner = tree::find_split_pane(ws.root(), &outcome.split_id).unwrap();
        assert_eq!(inner.direction, Direction::Vertical);
        assert_eq!(inner.children[1].id(), &right);
        assert_eq!(ws.active_tab(&p), Some(&tid("t2")));
        assert_invariants(&ws);

        // tab not in the source pane, or unknown target
        let revision = ws.revision();
        assert!(ws
            .split_tab_into_pane(&tid("t2"), &right, &p, Direction::Vertical, Side::After)
            .is_none());
        assert!(ws
            .split_tab_into_pane(
                &tid("t2"),
                &p,
                &PaneId::from("gone"),
                Direction::Vertical,
                Side::After
            )
            .is_none());
        assert_eq!(ws.revision(), revision);
    }

    #[test]
    fn resize_normalizes_and_rejects_bad_vectors() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        let outcome = ws
            .split_pane(&p, &tid("t1"), Direction::Horizontal, Side::Before)
            .unwrap();

        assert!(ws.resize_split(&outcome.split_id, vec![30.0, 70.0]));
        assert_eq!(ws.root().as_split().unwrap().sizes, vec![30.0, 70.0]);

        assert!(ws.resize_split(&outcome.split_id, vec![1.0, 3.0]));
        assert_eq!(ws.root().as_split().unwrap().sizes, vec![25.0, 75.0]);

        assert!(!ws.resize_split(&outcome.split_id, vec![100.0]));
        assert!(!ws.resize_split(&outcome.split_id, vec![f32::NAN, 50.0]));
        assert!(!ws.resize_split(&outcome.split_id, vec![-10.0, 110.0]));
        assert!(!ws.resize_split(&p, vec![50.0, 50.0]));
        assert_invariants(&ws);
    }

    #[test]
    fn cycle_active_tab_wraps() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();

        assert_eq!(ws.cycle_active_tab(&p, true), Some(tid("t3")));
        assert_eq!(ws.cycle_active_tab(&p, true), Some(tid("t1")));
        assert_eq!(ws.cycle_active_tab(&p, false), Some(tid("t3")));
        assert_eq!(ws.cycle_active_tab(&PaneId::from("gone"), true), None);
    }

    #[test]
    fn close_active_tab_in_pane() {
        let mut ws = abc();
        let p = root_tabs(&ws).id.clone();
        assert!(ws.close_active_tab(&p));
        assert_eq!(root_tabs(&ws).active_tab_id, Some(tid("t1")));
    }

    #[test]
    fn update_title_bumps_revision() {
        let mut ws = abc();
        let revision = ws.revision();
        assert!(ws.update_tab_title(&tid("t1"), "Renamed"));
        assert_eq!(ws.tab(&tid("t1")).unwrap().title, "Renamed");
        assert!(ws.revision() > revision);
        assert!(!ws.update_tab_title(&tid("zz"), "x"));
    }

    #[test]
    fn mixed_sequence_preserves_invariants() {
        let mut ws = Workspace::new();
        for i in 0..6 {
            ws.add_tab(doc(&i.to_string()));
        }
        let root = ws.root().id().clone();
        let a = ws
            .split_pane(&root, &tid("t2"), Direction::Horizontal, Side::After)
            .unwrap();
        let b = ws
            .split_pane(&root, &tid("t3"), Direction::Vertical, Side::Before)
            .unwrap();
        assert_invariants(&ws);

        ws.move_tab_to_pane(&tid("t4"), &root, &a.pane_id, None);
        ws.move_tab_to_pane(&tid("t3"), &b.pane_id, &a.pane_id, Some(0));
        assert_invariants(&ws);
        ws.close_tab(&tid("t2"));
        ws.close_other_tabs(&tid("t1"));
        assert_invariants(&ws);
        while ws.reopen_last_closed_tab().is_some() {}
        assert_invariants(&ws);
        for tab in ws.tabs().to_vec() {
            ws.close_tab(&tab.id);
        }
        assert!(ws.root().is_empty_root());
        assert_invariants(&ws);
    }
}
