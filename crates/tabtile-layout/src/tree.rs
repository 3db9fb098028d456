// ABOUTME: Read-only queries and by-value rebuild helpers for the pane tree.
// ABOUTME: Rebuilds move nodes along the path instead of mutating shared ones.

use crate::pane::{Pane, SplitPane, TabPane};
use crate::{PaneId, TabId};

/// Find any pane (tab or split) by id
pub fn find_pane_by_id<'a>(root: &'a Pane, id: &PaneId) -> Option<&'a Pane> {
    if root.id() == id {
        return Some(root);
    }
    match root {
        Pane::Tabs(_) => None,
        Pane::Split(split) => split
            .children
            .iter()
            .find_map(|child| find_pane_by_id(child, id)),
    }
}

pub fn find_tab_pane<'a>(root: &'a Pane, id: &PaneId) -> Option<&'a TabPane> {
    find_pane_by_id(root, id).and_then(Pane::as_tabs)
}

pub fn find_split_pane<'a>(root: &'a Pane, id: &PaneId) -> Option<&'a SplitPane> {
    find_pane_by_id(root, id).and_then(Pane::as_split)
}

/// Find the tab pane that owns a tab
pub fn find_pane_containing_tab<'a>(root: &'a Pane, tab: &TabId) -> Option<&'a TabPane> {
    match root {
        Pane::Tabs(pane) => pane.contains(tab).then_some(pane),
        Pane::Split(split) => split
            .children
            .iter()
            .find_map(|child| find_pane_containing_tab(child, tab)),
    }
}

/// Split pane whose direct children include `id`
pub fn find_parent<'a>(root: &'a Pane, id: &PaneId) -> Option<&'a SplitPane> {
    let Pane::Split(split) = root else {
        return None;
    };
    if split.children.iter().any(|child| child.id() == id) {
        return Some(split);
    }
    split
        .children
        .iter()
        .find_map(|child| find_parent(child, id))
}

/// First tab pane in pre-order
pub fn first_tab_pane(root: &Pane) -> Option<&TabPane> {
    match root {
        Pane::Tabs(pane) => Some(pane),
        Pane::Split(split) => split.children.iter().find_map(first_tab_pane),
    }
}

/// Last tab pane in pre-order
pub fn last_tab_pane(root: &Pane) -> Option<&TabPane> {
    match root {
        Pane::Tabs(pane) => Some(pane),
        Pane::Split(split) => split.children.iter().rev().find_map(last_tab_pane),
    }
}

/// Get all pane IDs, pre-order
pub fn all_pane_ids(root: &Pane) -> Vec<PaneId> {
    let mut result = Vec::new();
    visit(root, &mut |pane| result.push(pane.id().clone()));
    result
}

/// Get the IDs of the leaf panes that hold tabs
pub fn tab_pane_ids(root: &Pane) -> Vec<PaneId> {
    let mut result = Vec::new();
    visit(root, &mut |pane| {
        if let Pane::Tabs(tabs) = pane {
            result.push(tabs.id.clone());
        }
    });
    result
}

/// Every tab id referenced by the tree, in display order
pub fn all_tab_ids(root: &Pane) -> Vec<TabId> {
    let mut result = Vec::new();
    visit(root, &mut |pane| {
        if let Pane::Tabs(tabs) = pane {
            result.extend(tabs.tab_ids.iter().cloned());
        }
    });
    result
}

pub(crate) fn visit(node: &Pane, f: &mut impl FnMut(&Pane)) {
    f(node);
    if let Pane::Split(split) = node {
        for child in &split.children {
            visit(child, f);
        }
    }
}

/// Rebuild the tree with the pane `id` replaced by `f(pane)`
pub(crate) fn replace_pane<F>(root: Pane, id: &PaneId, f: F) -> Pane
where
    F: FnOnce(Pane) -> Pane,
{
    let mut f = Some(f);
    replace_in(root, id, &mut f)
}

fn replace_in<F>(node: Pane, id: &PaneId, f: &mut Option<F>) -> Pane
where
    F: FnOnce(Pane) -> Pane,
{
    if node.id() == id {
        return match f.take() {
            Some(f) => f(node),
            None => node,
        };
    }
    match node {
        Pane::Tabs(_) => node,
        Pane::Split(mut split) => {
            split.children = split
                .children
                .into_iter()
                .map(|child| {
                    if f.is_some() {
                        replace_in(child, id, f)
                    } else {
                        child
                    }
                })
                .collect();
            Pane::Split(split)
        }
    }
}

/// Rebuild the tree with the tab pane `id` replaced by `f(pane)`
pub(crate) fn update_tab_pane<F>(root: Pane, id: &PaneId, f: F) -> Pane
where
    F: FnOnce(TabPane) -> TabPane,
{
    replace_pane(root, id, |node| match node {
        Pane::Tabs(pane) => Pane::Tabs(f(pane)),
        split => split,
    })
}

/// Drop empty tab panes and collapse splits left with a single child.
///
/// Returns `None` when nothing survives.
pub(crate) fn prune(node: Pane) -> Option<Pane> {
    match node {
        Pane::Tabs(pane) => (!pane.tab_ids.is_empty()).then_some(Pane::Tabs(pane)),
        Pane::Split(split) => {
            let SplitPane {
                id,
                direction,
                sizes,
                children,
            } = split;
            let before = children.len();

            let mut kept = Vec::with_capacity(before);
            let mut kept_sizes = Vec::with_capacity(before);
            for (index, child) in children.into_iter().enumerate() {
                if let Some(child) = prune(child) {
                    kept_sizes.push(sizes.get(index).copied().unwrap_or(0.0));
                    kept.push(child);
                }
            }

            match kept.len() {
                0 => None,
                1 => kept.pop(),
                n => {
                    let sizes = if n == before && sizes.len() == n {
                        sizes
                    } else {
                        normalize_sizes(&kept_sizes)
                    };
                    Some(Pane::Split(SplitPane {
                        id,
                        direction,
                        sizes,
                        children: kept,
                    }))
                }
            }
        }
    }
}

/// Remove the child at `index`, collapsing the split if one child remains
pub(crate) fn without_child(split: SplitPane, index: usize) -> Pane {
    let SplitPane {
        id,
        direction,
        mut sizes,
        mut children,
    } = split;
    children.remove(index);
    if index < sizes.len() {
        sizes.remove(index);
    }

    if children.len() == 1 {
        return children.remove(0);
    }
    Pane::Split(SplitPane {
        id,
        direction,
        sizes: normalize_sizes(&sizes),
        children,
    })
}

/// Scale sizes proportionally so they sum to 100.
///
/// Falls back to equal shares when the input has no usable total.
pub fn normalize_sizes(sizes: &[f32]) -> Vec<f32> {
    let total: f32 = sizes.iter().sum();
    if sizes.is_empty() || !total.is_finite() || total <= 0.0 {
        return equal_sizes(sizes.len());
    }
    sizes.iter().map(|size| size * 100.0 / total).collect()
}

pub fn equal_sizes(count: usize) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    vec![100.0 / count as f32; count]
}
