// ABOUTME: Closed-tab history used by reopen.
// ABOUTME: Append-only LIFO; reopen always consumes the newest entry.

use crate::tab::Tab;
use crate::TabId;

#[derive(Debug, Clone, Default)]
pub struct ClosedTabs {
    entries: Vec<Tab>,
}

impl ClosedTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tab: Tab) {
        self.entries.push(tab);
    }

    pub fn pop(&mut self) -> Option<Tab> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&Tab> {
        self.entries.last()
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.entries.iter().any(|tab| &tab.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.entries.iter()
    }
}
