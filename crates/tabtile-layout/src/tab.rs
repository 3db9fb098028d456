// ABOUTME: Tab model: the open-tab record and the request used to open one.
// ABOUTME: Content references are live handles and never serialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::TabId;

/// Renderable unit hosted inside a tab, produced by the content resolver
pub trait TabContent: fmt::Debug + Send + Sync {}

pub type ContentRef = Arc<dyn TabContent>;

#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub icon: Option<String>,
    /// Logical view kind, e.g. "document" or "flashcards"
    pub kind: String,
    pub content: Option<ContentRef>,
    pub closable: bool,
    /// View parameters; together with `kind` identifies the logical view
    pub data: Value,
}

impl Tab {
    /// Two tabs show the same logical view when kind and data are equal
    pub fn same_view(&self, kind: &str, data: &Value) -> bool {
        self.kind == kind && &self.data == data
    }

    pub fn meta(&self) -> TabMeta {
        TabMeta {
            id: self.id.clone(),
            title: self.title.clone(),
            icon: self.icon.clone(),
            kind: self.kind.clone(),
            closable: self.closable,
            data: self.data.clone(),
        }
    }
}

/// Everything needed to open a tab except its id
#[derive(Debug, Clone)]
pub struct TabSpec {
    pub title: String,
    pub icon: Option<String>,
    pub kind: String,
    pub content: Option<ContentRef>,
    pub closable: bool,
    pub data: Value,
}

impl TabSpec {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        let kind = kind.into();
        Self {
            title: kind.clone(),
            icon: None,
            kind,
            content: None,
            closable: true,
            data,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn content(mut self, content: ContentRef) -> Self {
        self.content = Some(content);
        self
    }

    pub fn pinned(mut self) -> Self {
        self.closable = false;
        self
    }

    pub(crate) fn into_tab(self, id: TabId) -> Tab {
        Tab {
            id,
            title: self.title,
            icon: self.icon,
            kind: self.kind,
            content: self.content,
            closable: self.closable,
            data: self.data,
        }
    }
}

/// Serializable subset of a tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabMeta {
    pub id: TabId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_closable")]
    pub closable: bool,
    #[serde(default)]
    pub data: Value,
}

fn default_closable() -> bool {
    true
}

impl TabMeta {
    pub fn into_tab(self, content: Option<ContentRef>) -> Tab {
        Tab {
            id: self.id,
            title: self.title,
            icon: self.icon,
            kind: self.kind,
            content,
            closable: self.closable,
            data: self.data,
        }
    }
}
