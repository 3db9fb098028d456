// ABOUTME: Identifier newtypes for tabs and panes.
// ABOUTME: Ids are opaque strings so persisted layouts keep their references.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Numeric suffix after `prefix`, used to resume id counters
            pub(crate) fn sequence(&self, prefix: &str) -> Option<u64> {
                self.0.strip_prefix(prefix)?.parse().ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(TabId);
string_id!(PaneId);

pub(crate) const TAB_PREFIX: &str = "t";
pub(crate) const PANE_PREFIX: &str = "pane-";
